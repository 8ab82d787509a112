use std::io;
use std::io::{ BufWriter, Write };
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use crate::consts::{ MAX_CHANNEL_VAL, PPM_LINE_WIDTH };

/// An 8-bit RGB pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8) -> Pixel {
        Pixel { r, g, b }
    }
}

/// The PPM variants an image can be written as.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PpmFormat {
    /// ASCII pixels.
    P3,

    /// Binary pixels.
    P6,
}

impl FromStr for PpmFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<PpmFormat, String> {
        match s.to_ascii_lowercase().as_str() {
            "p3" => Ok(PpmFormat::P3),
            "p6" => Ok(PpmFormat::P6),
            _ => Err(format!("unknown PPM format '{}' (expected p3 or p6)", s)),
        }
    }
}

impl fmt::Display for PpmFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PpmFormat::P3 => write!(f, "P3"),
            PpmFormat::P6 => write!(f, "P6"),
        }
    }
}

/// An image the renderer draws into.
///
/// Pixels are stored row-major in a flattened vector. The caller allocates
/// the image with the desired resolution, and the renderer overwrites every
/// pixel. Once rendering finishes, the image can be saved as a PPM file.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,

    pixels: Vec<Pixel>,
}

impl Image {
    /// Creates a black image with specified width and height.
    pub fn new(width: usize, height: usize) -> Image {
        Image {
            width,
            height,
            pixels: vec![Pixel::default(); width * height],
        }
    }

    /// Writes a pixel to a location on the `Image`.
    ///
    /// Out-of-bounds pixels are ignored. `y` is the row of the pixel, and
    /// `x` is the column. Rows and columns are zero-indexed.
    ///
    /// ```
    /// # use ray_caster::canvas::{ Image, Pixel };
    /// let purple = Pixel::new(255, 0, 255);
    /// let mut image = Image::new(8, 8);
    /// image.write_pixel(4, 2, purple);
    /// assert_eq!(image.read_pixel(4, 2), Some(purple));
    /// assert_eq!(image.read_pixel(8, 2), None);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: Pixel) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = pixel;
    }

    /// Reads a pixel from a location on the `Image`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// The width of the image, in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height of the image, in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterates over the rows of the image, top to bottom.
    ///
    /// A zero-width image yields no rows.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Pixel]> {
        let width = self.width.max(1);
        let rows = if self.width == 0 { 0 } else { self.height };

        self.pixels.chunks_mut(width).take(rows)
    }

    /// Mutable access to the whole pixel buffer, for splitting into rows.
    pub(crate) fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Writes the image in PPM format.
    ///
    /// In `P3` output, lines are clamped to 70 columns. If some pixel would
    /// exceed the 70 column mark on a line, it is moved to the next line.
    pub fn write_ppm<W: Write>(&self, out: &mut W, format: PpmFormat)
        -> io::Result<()> {
        writeln!(out, "{}", format)?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "{}", MAX_CHANNEL_VAL)?;

        match format {
            PpmFormat::P3 => self.write_ascii_pixels(out)?,
            PpmFormat::P6 => {
                for p in self.pixels.iter() {
                    out.write_all(&[p.r, p.g, p.b])?;
                }
            },
        }

        out.flush()
    }

    fn write_ascii_pixels<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut col = 0;
        for pixel in self.pixels.iter() {
            for channel in [pixel.r, pixel.g, pixel.b].iter() {
                let s = channel.to_string();

                if col == 0 {
                    write!(out, "{}", s)?;
                    col = s.len();
                } else if col + 1 + s.len() > PPM_LINE_WIDTH {
                    write!(out, "\n{}", s)?;
                    col = s.len();
                } else {
                    write!(out, " {}", s)?;
                    col += s.len() + 1;
                }
            }
        }

        // Terminate the pixel data with a newline
        if col != 0 {
            writeln!(out)?;
        }

        Ok(())
    }

    /// Saves the image to a PPM file.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: PpmFormat)
        -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out, format)
    }
}

#[test]
fn new_image_is_black() {
    let image = Image::new(3, 2);

    assert_eq!(image.pixels().len(), 6);
    assert!(image.pixels().iter().all(|p| *p == Pixel::default()));
}

#[test]
fn dimensions_match_buffer() {
    let image = Image::new(4, 3);

    assert_eq!((image.width(), image.height()), (4, 3));
    assert_eq!(image.pixels().len(), image.width() * image.height());
    assert_eq!(image.read_pixel(3, 2), Some(Pixel::default()));
    assert_eq!(image.read_pixel(4, 2), None);
}

#[test]
fn rows_are_row_major() {
    let mut image = Image::new(3, 2);
    for (y, row) in image.rows_mut().enumerate() {
        assert_eq!(row.len(), 3);
        for (x, p) in row.iter_mut().enumerate() {
            *p = Pixel::new(x as u8, y as u8, 0);
        }
    }

    assert_eq!(image.read_pixel(2, 1), Some(Pixel::new(2, 1, 0)));
    assert_eq!(image.pixels()[5], Pixel::new(2, 1, 0));
}

#[test]
fn zero_width_image_has_no_rows() {
    let mut image = Image::new(0, 4);

    assert_eq!(image.rows_mut().count(), 0);
}

#[test]
fn ppm_p3_header_and_pixels() {
    let mut image = Image::new(2, 1);
    image.write_pixel(0, 0, Pixel::new(255, 0, 0));
    image.write_pixel(1, 0, Pixel::new(0, 128, 7));

    let mut out = Vec::new();
    image.write_ppm(&mut out, PpmFormat::P3).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(),
        "P3\n2 1\n255\n255 0 0 0 128 7\n");
}

#[test]
fn ppm_p3_lines_wrap_at_70_columns() {
    let mut image = Image::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            image.write_pixel(x, y, Pixel::new(255, 204, 153));
        }
    }

    let mut out = Vec::new();
    image.write_ppm(&mut out, PpmFormat::P3).unwrap();
    let text = String::from_utf8(out).unwrap();

    let body: Vec<&str> = text.lines().skip(3).collect();
    assert!(body.iter().all(|l| l.len() <= 70));
    assert_eq!(body.iter().map(|l| l.split_whitespace().count()).sum::<usize>(),
        60);
    assert!(text.ends_with('\n'));
}

#[test]
fn ppm_p6_is_binary() {
    let mut image = Image::new(1, 2);
    image.write_pixel(0, 1, Pixel::new(1, 2, 3));

    let mut out = Vec::new();
    image.write_ppm(&mut out, PpmFormat::P6).unwrap();

    let mut expected = b"P6\n1 2\n255\n".to_vec();
    expected.extend_from_slice(&[0, 0, 0, 1, 2, 3]);
    assert_eq!(out, expected);
}

#[test]
fn parse_ppm_format() {
    assert_eq!("p3".parse::<PpmFormat>(), Ok(PpmFormat::P3));
    assert_eq!("P6".parse::<PpmFormat>(), Ok(PpmFormat::P6));
    assert!("png".parse::<PpmFormat>().is_err());
}
