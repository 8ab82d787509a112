use crate::ray::Ray;
use crate::vector::Vector3;
use crate::canvas::{ Image, Pixel };
use crate::config::RenderOptions;
use crate::consts::FOCAL_DISTANCE;
use crate::error::Result;
use crate::scene::Scene;
use crate::shade::color_at;

/// A camera record for generating an image.
///
/// The camera sits at the origin looking down the negative Z axis. `width`
/// and `height` are the dimensions of its view plane, in world units, one
/// unit in front of the eye. The image resolution is independent of these;
/// the view plane is divided evenly among the image's pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Camera {
    pub width: f64,
    pub height: f64,
}

impl Camera {
    pub fn new(width: f64, height: f64) -> Camera {
        Camera { width, height }
    }

    /// Builds the primary ray through the center of pixel (`col`, `row`) of
    /// an `image_width` by `image_height` image.
    ///
    /// Row 0 is the top of the image; +Y points up in the world.
    ///
    /// Returns `None` for a zero-sized image.
    pub fn ray_for_pixel(&self, col: usize, row: usize, image_width: usize,
        image_height: usize) -> Option<Ray> {
        if image_width == 0 || image_height == 0 {
            return None;
        }

        let pixel_width = self.width / image_width as f64;
        let pixel_height = self.height / image_height as f64;

        let px = -self.width / 2.0 + pixel_width * (col as f64 + 0.5);
        let py = -(-self.height / 2.0 + pixel_height * (row as f64 + 0.5));
        let pz = -FOCAL_DISTANCE;

        let direction = Vector3::new(px, py, pz).normalize()?;
        Some(Ray::new(Vector3::zero(), direction))
    }

    /// Shades one scanline of an image into `line`.
    ///
    /// `line` must be the row's slice of the pixel buffer; its length is the
    /// image width.
    pub fn render_row(&self, scene: &Scene, options: &RenderOptions,
        row: usize, image_height: usize, line: &mut [Pixel]) {
        let image_width = line.len();

        for (col, pixel) in line.iter_mut().enumerate() {
            let color = match self.ray_for_pixel(col, row, image_width,
                image_height) {
                Some(ray) => color_at(scene, &ray, options),
                None => options.background,
            };

            *pixel = color.to_pixel();
        }
    }

    /// Renders a scene into `image` on the calling thread.
    ///
    /// See `parallel::render` for the multi-threaded version; both produce
    /// identical images.
    pub fn render(&self, scene: &Scene, image: &mut Image,
        options: &RenderOptions) {
        let height = image.height();

        for (row, line) in image.rows_mut().enumerate() {
            self.render_row(scene, options, row, height, line);
        }
    }
}

/// Renders a scene serially with its own camera.
pub fn render_serial(scene: &Scene, image: &mut Image,
    options: &RenderOptions) -> Result<()> {
    let camera = scene.camera()?;
    camera.render(scene, image, options);
    Ok(())
}

#[test]
fn ray_through_center() {
    let c = Camera::new(2.0, 2.0);
    let r = c.ray_for_pixel(50, 50, 101, 101).unwrap();

    assert_eq!(r.origin, Vector3::zero());
    assert_eq!(r.direction, Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_top_left_corner() {
    let c = Camera::new(2.0, 2.0);
    let r = c.ray_for_pixel(0, 0, 2, 2).unwrap();

    // Pixel center at (-0.5, 0.5) on the view plane.
    let expected = Vector3::new(-0.5, 0.5, -1.0).normalize().unwrap();
    assert_eq!(r.direction, expected);
}

#[test]
fn ray_through_bottom_right_corner() {
    let c = Camera::new(4.0, 2.0);
    let r = c.ray_for_pixel(3, 1, 4, 2).unwrap();

    let expected = Vector3::new(1.5, -0.5, -1.0).normalize().unwrap();
    assert_eq!(r.direction, expected);
}

#[test]
fn primary_rays_are_unit_length() {
    let c = Camera::new(3.0, 1.0);

    for row in 0..7 {
        for col in 0..11 {
            let r = c.ray_for_pixel(col, row, 11, 7).unwrap();
            assert!(crate::feq(r.direction.magnitude(), 1.0));
        }
    }
}

#[test]
fn zero_sized_image_has_no_rays() {
    let c = Camera::new(1.0, 1.0);

    assert!(c.ray_for_pixel(0, 0, 0, 5).is_none());
    assert!(c.ray_for_pixel(0, 0, 5, 0).is_none());
}

#[test]
fn serial_render_needs_camera() {
    use crate::error::RenderError;

    let mut image = Image::new(2, 2);

    assert!(matches!(
        render_serial(&Scene::new(), &mut image, &Default::default()),
        Err(RenderError::MissingCamera)));
}
