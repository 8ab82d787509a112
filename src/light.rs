use crate::color::Color;
use crate::vector::Vector3;
use crate::consts::SHININESS;

/// A material record.
///
/// `color` is the nominal surface color from the scene file. Shading only
/// uses the `diffuse` and `specular` colors; the loader fills `diffuse` from
/// `color` when a scene omits it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),
            diffuse: Color::white(),
            specular: Color::black(),
        }
    }
}

impl Material {
    pub fn new(color: Color, diffuse: Color, specular: Color) -> Material {
        Material { color, diffuse, specular }
    }
}

/// A light source.
///
/// A light with `theta == 0.0` is a point light, attenuated by distance
/// through the quadratic `radial_a0 + radial_a1 * d + radial_a2 * d^2`.
///
/// Any other `theta` makes a spotlight: a cone of half-angle `theta` degrees
/// around `direction`. Spotlights are not attenuated by distance; instead
/// intensity falls off as `cos(angle) ^ angular_a0` away from the axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    pub color: Color,
    pub position: Vector3,

    pub radial_a0: f64,
    pub radial_a1: f64,
    pub radial_a2: f64,

    pub direction: Option<Vector3>,
    pub theta: f64,
    pub angular_a0: f64,
}

impl Default for Light {
    fn default() -> Light {
        Light {
            color: Color::white(),
            position: Vector3::zero(),
            radial_a0: 1.0,
            radial_a1: 0.0,
            radial_a2: 0.0,
            direction: None,
            theta: 0.0,
            angular_a0: 0.0,
        }
    }
}

impl Light {
    /// Creates an unattenuated point light.
    pub fn point(color: Color, position: Vector3) -> Light {
        Light { color, position, ..Default::default() }
    }

    /// Creates a spotlight with a half-angle of `theta` degrees.
    pub fn spot(color: Color, position: Vector3, direction: Vector3,
        theta: f64, angular_a0: f64) -> Light {
        Light {
            color,
            position,
            direction: Some(direction),
            theta,
            angular_a0,
            ..Default::default()
        }
    }

    pub fn is_spotlight(&self) -> bool {
        self.theta != 0.0
    }

    /// The distance attenuation factor at distance `d` from the light.
    ///
    /// Spotlights always return 1.0. A non-positive or non-finite
    /// denominator makes the light contribute nothing.
    pub fn radial_attenuation(&self, d: f64) -> f64 {
        if self.is_spotlight() {
            return 1.0;
        }

        let denom = self.radial_a2 * d.powi(2) + self.radial_a1 * d
            + self.radial_a0;

        if !denom.is_finite() || denom <= 0.0 {
            return 0.0;
        }

        1.0 / denom
    }

    /// The angular attenuation factor for light reaching `point`.
    ///
    /// Point lights always return 1.0. For spotlights, points outside the
    /// cone (or exactly at the light) receive nothing. Inside the cone the
    /// factor is `cos(α)` raised to `angular_a0`; when a cone wider than 90°
    /// makes `cos(α)` negative, a result that is negative or undefined is
    /// treated as 0.
    pub fn angular_attenuation(&self, point: Vector3) -> f64 {
        if !self.is_spotlight() {
            return 1.0;
        }

        let axis = match self.direction.and_then(|d| d.normalize()) {
            Some(axis) => axis,
            None => return 0.0,
        };

        let to_point = match (point - self.position).normalize() {
            Some(v) => v,
            None => return 0.0,
        };

        let cos = to_point.dot(&axis).max(-1.0).min(1.0);
        if cos.acos() > self.theta.to_radians() {
            return 0.0;
        }

        let factor = cos.powf(self.angular_a0);
        if !factor.is_finite() || factor < 0.0 {
            return 0.0;
        }

        factor
    }
}

/// Calculates the diffuse and specular light reflected toward the eye.
///
/// `lightv` points from the surface toward the light, `eyev` from the surface
/// toward the viewer and `normalv` is the unit surface normal. Attenuation
/// and ambient light are left to the caller.
///
/// The diffuse term vanishes when the light is behind the surface. The
/// specular term additionally requires the viewer to be in front of the
/// surface and on the reflected side of the light.
pub fn lighting(m: &Material, light: &Light, lightv: Vector3, eyev: Vector3,
    normalv: Vector3) -> (Color, Color) {
    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal <= 0.0 {
        return (Color::black(), Color::black());
    }

    let diffuse = m.diffuse * light.color * light_dot_normal;

    let eye_dot_normal = eyev.dot(&normalv);
    let reflectv = (-lightv).reflect(&normalv);
    let reflect_dot_eye = reflectv.dot(&eyev);

    let specular = if eye_dot_normal <= 0.0 || reflect_dot_eye <= 0.0 {
        Color::black()
    } else {
        m.specular * light.color * reflect_dot_eye.powf(SHININESS)
    };

    (diffuse, specular)
}

#[test]
fn light_head_on() {
    let m = Material::new(Color::white(), Color::rgb(1.0, 0.5, 0.0),
        Color::white());
    let light = Light::point(Color::white(), Vector3::new(0.0, 0.0, 10.0));

    let n = Vector3::new(0.0, 0.0, 1.0);
    let (diffuse, specular) = lighting(&m, &light, n, n, n);

    assert_eq!(diffuse, Color::rgb(1.0, 0.5, 0.0));
    assert_eq!(specular, Color::white());
}

#[test]
fn light_behind_surface() {
    let m = Material::new(Color::white(), Color::white(), Color::white());
    let light = Light::point(Color::white(), Vector3::new(0.0, 0.0, -10.0));

    let n = Vector3::new(0.0, 0.0, 1.0);
    let (diffuse, specular) = lighting(&m, &light,
        Vector3::new(0.0, 0.0, -1.0), n, n);

    assert_eq!(diffuse, Color::black());
    assert_eq!(specular, Color::black());
}

#[test]
fn light_at_45_degrees() {
    let m = Material::new(Color::white(), Color::white(), Color::white());
    let light = Light::point(Color::white(), Vector3::new(0.0, 10.0, 10.0));

    let s = 2.0f64.sqrt() / 2.0;
    let n = Vector3::new(0.0, 0.0, 1.0);
    let lightv = Vector3::new(0.0, s, s);

    // Eye straight above the surface: half of the diffuse, and the specular
    // highlight is at cos(45)^20.
    let (diffuse, specular) = lighting(&m, &light, lightv, n, n);
    assert_eq!(diffuse, Color::gray(s));
    assert_eq!(specular, Color::gray(s.powf(SHININESS)));

    // Eye in the path of the reflection.
    let eyev = Vector3::new(0.0, -s, s);
    let (_, specular) = lighting(&m, &light, lightv, eyev, n);
    assert_eq!(specular, Color::white());
}

#[test]
fn no_specular_when_eye_behind_surface() {
    let m = Material::new(Color::white(), Color::white(), Color::white());
    let light = Light::point(Color::white(), Vector3::new(0.0, 0.0, 10.0));

    let n = Vector3::new(0.0, 0.0, 1.0);
    let eyev = Vector3::new(0.0, 0.0, -1.0);
    let (diffuse, specular) = lighting(&m, &light, n, eyev, n);

    assert_eq!(diffuse, Color::white());
    assert_eq!(specular, Color::black());
}

#[test]
fn radial_attenuation_quadratic() {
    let light = Light {
        radial_a0: 1.0,
        radial_a1: 0.0,
        radial_a2: 1.0,
        ..Default::default()
    };

    assert!(crate::feq(light.radial_attenuation(2.0), 0.2));
    assert!(crate::feq(light.radial_attenuation(0.0), 1.0));
}

#[test]
fn radial_attenuation_degenerate() {
    let light = Light {
        radial_a0: 0.0,
        ..Default::default()
    };

    assert_eq!(light.radial_attenuation(0.0), 0.0);
    assert!(crate::feq(light.radial_attenuation(f64::INFINITY), 0.0));
}

#[test]
fn spotlight_ignores_distance() {
    let light = Light {
        radial_a2: 10.0,
        ..Light::spot(Color::white(), Vector3::zero(),
            Vector3::new(0.0, -1.0, 0.0), 30.0, 2.0)
    };

    assert_eq!(light.radial_attenuation(100.0), 1.0);
}

#[test]
fn spotlight_cone() {
    let light = Light::spot(Color::white(), Vector3::zero(),
        Vector3::new(0.0, -1.0, 0.0), 30.0, 2.0);

    // On the axis.
    assert!(crate::feq(
        light.angular_attenuation(Vector3::new(0.0, -5.0, 0.0)), 1.0));

    // 20 degrees off the axis.
    let a = 20.0f64.to_radians();
    let p = Vector3::new(a.sin(), -a.cos(), 0.0);
    assert!(crate::feq(light.angular_attenuation(p), a.cos().powi(2)));

    // 45 degrees off the axis, outside the cone.
    assert_eq!(light.angular_attenuation(Vector3::new(1.0, -1.0, 0.0)), 0.0);

    // Behind the light.
    assert_eq!(light.angular_attenuation(Vector3::new(0.0, 1.0, 0.0)), 0.0);
}

#[test]
fn wide_spotlight_cone() {
    let light = Light::spot(Color::white(), Vector3::zero(),
        Vector3::new(0.0, -1.0, 0.0), 120.0, 2.0);

    // 100 degrees off the axis, still inside the cone.
    let a = 100.0f64.to_radians();
    let p = Vector3::new(a.sin(), -a.cos(), 0.0);
    assert!(crate::feq(light.angular_attenuation(p), a.cos().powi(2)));
    assert!(light.angular_attenuation(p) > 0.0);

    // Odd and fractional exponents of a negative cosine give nothing.
    let odd = Light { angular_a0: 1.0, ..light };
    assert_eq!(odd.angular_attenuation(p), 0.0);
    let half = Light { angular_a0: 0.5, ..light };
    assert_eq!(half.angular_attenuation(p), 0.0);

    // Beyond 120 degrees.
    let b = 150.0f64.to_radians();
    let q = Vector3::new(b.sin(), -b.cos(), 0.0);
    assert_eq!(light.angular_attenuation(q), 0.0);
}

#[test]
fn point_light_has_no_angular_falloff() {
    let light = Light::point(Color::white(), Vector3::zero());

    assert!(!light.is_spotlight());
    assert_eq!(light.angular_attenuation(Vector3::new(1.0, -1.0, 0.0)), 1.0);
}
