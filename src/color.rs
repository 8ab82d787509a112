use std::ops::{ Add, Mul };

use crate::feq;
use crate::canvas::Pixel;
use crate::consts::MAX_CHANNEL_VAL;

/// Clamps a value to the range 0.0 to 1.0 inclusive.
///
/// NaN is passed through unchanged; converting it to a channel yields 0.
pub fn clamp01(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) values. Colors are
/// nominally in the range 0.0 to 1.0, but sums of light contributions are
/// allowed to leave that range. Only `to_pixel` clamps.
///
/// # Examples
///
/// Modulate a surface color by a light color:
///
/// ```
/// # use ray_caster::color::Color;
/// let surface = Color::rgb(1.0, 0.5, 0.0);
/// let light = Color::rgb(0.5, 0.5, 0.5);
/// assert_eq!(surface * light, Color::rgb(0.5, 0.25, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Vector3`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

/// Conversion from a three element array, as found in scene files.
impl From<[f64; 3]> for Color {
    fn from(v: [f64; 3]) -> Color {
        Color { r: v[0], g: v[1], b: v[2] }
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// Creates a color with the same value in every channel.
    pub fn gray(v: f64) -> Color {
        Color { r: v, g: v, b: v }
    }

    /// The color black.
    pub fn black() -> Color {
        Color::gray(0.0)
    }

    /// The color white.
    pub fn white() -> Color {
        Color::gray(1.0)
    }

    /// Computes the Hadamard product of two colors.
    ///
    /// The hadamard product multiplies each component of the two colors, and
    /// yields a new color containing those products. This is how a surface
    /// color filters the color of a light.
    ///
    /// ```
    /// # use ray_caster::color::Color;
    /// let yellow = Color::rgb(1.0, 1.0, 0.0);
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// assert_eq!(Color::hadamard(&yellow, &purple), Color::rgb(1.0, 0.0, 0.0));
    /// ```
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        let r = c1.r * c2.r;
        let g = c1.g * c2.g;
        let b = c1.b * c2.b;

        Color { r, g, b }
    }

    /// Clamps every channel to the unit range.
    pub fn clamp01(&self) -> Color {
        Color {
            r: clamp01(self.r),
            g: clamp01(self.g),
            b: clamp01(self.b),
        }
    }

    /// Converts the color to an 8-bit pixel.
    ///
    /// Channels are clamped to the unit range, scaled to 255 and truncated.
    ///
    /// ```
    /// # use ray_caster::color::Color;
    /// # use ray_caster::canvas::Pixel;
    /// let c = Color::rgb(1.5, 0.5, -0.2);
    /// assert_eq!(c.to_pixel(), Pixel::new(255, 127, 0));
    /// ```
    pub fn to_pixel(&self) -> Pixel {
        let c = self.clamp01();
        let scale = MAX_CHANNEL_VAL as f64;

        Pixel::new(
            (c.r * scale) as u8,
            (c.g * scale) as u8,
            (c.b * scale) as u8,
        )
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

/// Multiplies a color by a scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

/// Multiplies a scalar by a color.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

/// Multiplies a color by a color.
///
/// For colors `c1` and `c2`, `c1 * c2` is shorthand for
/// `Color::hadamard(&c1, &c2)`.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 + c2, Color::rgb(1.6, 0.7, 1.0));
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);

    assert_eq!(c1 * 2.0, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(2.0 * c1, Color::rgb(0.4, 0.6, 0.8));
}

#[test]
fn clamp_range() {
    assert_eq!(clamp01(-3.0), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
    assert_eq!(clamp01(7.0), 1.0);
}

#[test]
fn pixel_conversion_truncates() {
    assert_eq!(Color::black().to_pixel(), Pixel::new(0, 0, 0));
    assert_eq!(Color::white().to_pixel(), Pixel::new(255, 255, 255));
    assert_eq!(Color::gray(0.1).to_pixel(), Pixel::new(25, 25, 25));
    assert_eq!(Color::rgb(f64::NAN, 2.0, 0.999).to_pixel(),
        Pixel::new(0, 255, 254));
}
