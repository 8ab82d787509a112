use std::sync::atomic::{ AtomicBool, AtomicUsize, Ordering };

use rayon::prelude::*;

use crate::canvas::Image;
use crate::config::RenderOptions;
use crate::error::{ RenderError, Result };
use crate::scene::Scene;

/// Renders a scene into `image` using every worker available.
///
/// The image is split into scanlines which are shaded independently; the
/// scene is shared read-only between workers. The result is identical to
/// `Camera::render`.
pub fn render(scene: &Scene, image: &mut Image, options: &RenderOptions)
    -> Result<()> {
    render_cancellable(scene, image, options, &AtomicBool::new(false))
}

/// Renders a scene, checking `cancel` before each scanline.
///
/// Once `cancel` is set, workers stop picking up new scanlines and
/// `RenderError::Cancelled` is returned. Scanlines already started are
/// finished; the rest of the image is left as it was.
pub fn render_cancellable(scene: &Scene, image: &mut Image,
    options: &RenderOptions, cancel: &AtomicBool) -> Result<()> {
    // Fail before touching the image.
    let camera = scene.camera()?;

    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        log::warn!("Nothing to render for a {}x{} image", width, height);
        return Ok(());
    }

    let pool = match options.threads {
        Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
        None => None,
    };
    let threads = pool.as_ref()
        .map(|p| p.current_num_threads())
        .unwrap_or_else(rayon::current_num_threads);

    log::info!("Rendering {}x{} image using {} threads...", width, height,
        threads);

    let finished = AtomicUsize::new(0);
    let pixels = image.pixels_mut();

    let mut work = || pixels
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(row, line)| {
            if cancel.load(Ordering::Relaxed) {
                return Err(RenderError::Cancelled {
                    rows: finished.load(Ordering::Relaxed),
                });
            }

            camera.render_row(scene, options, row, height, line);
            finished.fetch_add(1, Ordering::Relaxed);
            Ok(())
        });

    let result = match pool {
        Some(pool) => pool.install(work),
        None => work(),
    };

    match result {
        Ok(()) => {
            log::info!("...done.");
            Ok(())
        },
        Err(e) => {
            log::warn!("Render stopped: {}", e);
            Err(e)
        },
    }
}

/* Tests */

#[cfg(test)]
use crate::{
    camera::{ Camera, render_serial },
    canvas::Pixel,
    color::Color,
    geometry::{ Sphere, Plane },
    light::{ Light, Material },
    vector::Vector3,
};

#[cfg(test)]
fn showcase_scene() -> Scene {
    let red = Material::new(Color::rgb(1.0, 0.0, 0.0), Color::rgb(1.0, 0.0, 0.0),
        Color::white());
    let green = Material::new(Color::rgb(0.0, 1.0, 0.0), Color::rgb(0.0, 0.8, 0.2),
        Color::gray(0.5));
    let gray = Material::new(Color::gray(0.5), Color::gray(0.5), Color::black());

    Scene::new()
        .with_camera(Camera::new(2.0, 1.5))
        .with_sphere(Sphere::new(Vector3::new(-0.6, 0.0, -4.0), 0.8, red))
        .with_sphere(Sphere::new(Vector3::new(0.7, 0.2, -5.0), 1.0, green))
        .with_plane(Plane::new(Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0), gray))
        .with_light(Light {
            radial_a2: 0.01,
            ..Light::point(Color::white(), Vector3::new(2.0, 4.0, 0.0))
        })
        .with_light(Light::spot(Color::rgb(0.4, 0.4, 1.0),
            Vector3::new(-2.0, 3.0, -2.0), Vector3::new(0.5, -1.0, -0.5),
            40.0, 2.0))
}

#[test]
fn lit_sphere_through_single_pixel() {
    let scene = Scene::new()
        .with_camera(Camera::new(1.0, 1.0))
        .with_sphere(Sphere::new(Vector3::new(0.0, 0.0, -2.0), 1.0,
            Material::new(Color::rgb(1.0, 0.0, 0.0), Color::rgb(1.0, 0.0, 0.0),
                Color::white())))
        .with_light(Light::point(Color::white(), Vector3::new(0.0, 5.0, 0.0)));

    let mut image = Image::new(1, 1);
    render(&scene, &mut image, &Default::default()).unwrap();

    // Diffuse of 1/sqrt(26) in red, plus ambient in every channel.
    assert_eq!(image.read_pixel(0, 0), Some(Pixel::new(75, 25, 25)));
}

#[test]
fn empty_scene_is_background() {
    let scene = Scene::new().with_camera(Camera::new(1.0, 1.0));

    let mut image = Image::new(7, 5);
    for y in 0..5 {
        for x in 0..7 {
            image.write_pixel(x, y, Pixel::new(9, 9, 9));
        }
    }

    render(&scene, &mut image, &Default::default()).unwrap();
    assert!(image.pixels().iter().all(|p| *p == Pixel::new(0, 0, 0)));

    let options = RenderOptions {
        background: Color::white(),
        ..Default::default()
    };
    render(&scene, &mut image, &options).unwrap();
    assert!(image.pixels().iter().all(|p| *p == Pixel::new(255, 255, 255)));
}

#[test]
fn missing_camera_fails_before_rendering() {
    let mut image = Image::new(2, 2);
    image.write_pixel(1, 1, Pixel::new(1, 2, 3));

    let result = render(&Scene::new(), &mut image, &Default::default());

    assert!(matches!(result, Err(RenderError::MissingCamera)));
    assert_eq!(image.read_pixel(1, 1), Some(Pixel::new(1, 2, 3)));
}

#[test]
fn rendering_is_repeatable() {
    let scene = showcase_scene();

    let mut first = Image::new(48, 36);
    let mut second = Image::new(48, 36);
    render(&scene, &mut first, &Default::default()).unwrap();
    render(&scene, &mut second, &Default::default()).unwrap();

    assert_eq!(first, second);
    assert!(first.pixels().iter().any(|p| *p != Pixel::default()));
}

#[test]
fn parallel_matches_serial() {
    let scene = showcase_scene();
    let options = RenderOptions {
        threads: Some(3),
        ..Default::default()
    };

    let mut parallel = Image::new(40, 30);
    let mut serial = Image::new(40, 30);
    render(&scene, &mut parallel, &options).unwrap();
    render_serial(&scene, &mut serial, &options).unwrap();

    assert_eq!(parallel, serial);
}

#[test]
fn cancelled_render_stops() {
    let scene = showcase_scene();
    let mut image = Image::new(16, 16);

    let cancel = AtomicBool::new(true);
    let result = render_cancellable(&scene, &mut image, &Default::default(),
        &cancel);

    assert!(matches!(result, Err(RenderError::Cancelled { .. })));
}

#[test]
fn zero_sized_image_is_a_no_op() {
    let scene = showcase_scene();
    let mut image = Image::new(0, 10);

    assert!(render(&scene, &mut image, &Default::default()).is_ok());
}
