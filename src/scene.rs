use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::feq;
use crate::camera::Camera;
use crate::color::Color;
use crate::error::{ RenderError, Result };
use crate::geometry::{ Sphere, Plane };
use crate::light::{ Light, Material };
use crate::vector::Vector3;

/// Everything a render needs: cameras, primitives and lights.
///
/// A scene is assembled once and then only read. Primitives and lights are
/// kept in separate typed collections in declaration order.
///
/// Several cameras may be stored, but only the first is ever rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    cameras: Vec<Camera>,
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    lights: Vec<Light>,
}

impl Scene {
    /// Creates a scene with nothing in it, not even a camera.
    pub fn new() -> Scene {
        Default::default()
    }

    pub fn with_camera(mut self, camera: Camera) -> Scene {
        self.cameras.push(camera);
        self
    }

    pub fn with_sphere(mut self, sphere: Sphere) -> Scene {
        self.spheres.push(sphere);
        self
    }

    pub fn with_plane(mut self, plane: Plane) -> Scene {
        self.planes.push(plane);
        self
    }

    pub fn with_light(mut self, light: Light) -> Scene {
        self.lights.push(light);
        self
    }

    /// The camera used for rendering.
    pub fn camera(&self) -> Result<&Camera> {
        self.cameras.first().ok_or(RenderError::MissingCamera)
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn sphere(&self, index: usize) -> Option<&Sphere> {
        self.spheres.get(index)
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn plane(&self, index: usize) -> Option<&Plane> {
        self.planes.get(index)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn light(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    /// Checks the invariants the renderer relies on.
    ///
    /// Plane normals that are not unit length are only warned about; shading
    /// uses them as given.
    pub fn validate(&self) -> Result<()> {
        self.camera()?;

        if self.cameras.len() > 1 {
            log::warn!("Scene declares {} cameras; only the first is used",
                self.cameras.len());
        }

        for (index, camera) in self.cameras.iter().enumerate() {
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(camera.width) || !valid(camera.height) {
                return Err(RenderError::InvalidCamera {
                    index,
                    reason: format!("view plane must be positive, got {} x {}",
                        camera.width, camera.height),
                });
            }
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.radius.is_finite() || sphere.radius < 0.0 {
                return Err(RenderError::InvalidSphere {
                    index,
                    reason: format!("radius must be non-negative, got {}",
                        sphere.radius),
                });
            }
        }

        for (index, plane) in self.planes.iter().enumerate() {
            if !feq(plane.normal.magnitude(), 1.0) {
                log::warn!("Plane {} normal {:?} is not unit length",
                    index, plane.normal);
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            if !light.is_spotlight() {
                continue;
            }

            let direction = light.direction
                .filter(|d| d.is_finite())
                .and_then(|d| d.normalize());

            if direction.is_none() {
                return Err(RenderError::InvalidLight {
                    index,
                    reason: "spotlight needs a non-zero direction".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Parses and validates a scene from its JSON description.
    pub fn from_json(json: &str) -> Result<Scene> {
        let objects: Vec<ObjectJson> = serde_json::from_str(json)?;
        Scene::try_from(objects)
    }

    /// Reads, parses and validates a scene file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let json = fs::read_to_string(path)?;
        Scene::from_json(&json)
    }
}

/// One entry of a scene file.
///
/// Scene files are a flat list of objects, each tagged with its kind. The
/// tagged form only exists here; it is split into typed collections on
/// conversion.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectJson {
    Camera {
        width: f64,
        height: f64,
    },
    Sphere {
        color: [f64; 3],
        #[serde(default)]
        diffuse: Option<[f64; 3]>,
        #[serde(default)]
        specular: Option<[f64; 3]>,
        position: [f64; 3],
        radius: f64,
    },
    Plane {
        color: [f64; 3],
        #[serde(default)]
        diffuse: Option<[f64; 3]>,
        #[serde(default)]
        specular: Option<[f64; 3]>,
        position: [f64; 3],
        normal: [f64; 3],
    },
    Light {
        color: [f64; 3],
        position: [f64; 3],
        #[serde(default = "default_radial_a0")]
        radial_a0: f64,
        #[serde(default)]
        radial_a1: f64,
        #[serde(default)]
        radial_a2: f64,
        #[serde(default)]
        direction: Option<[f64; 3]>,
        #[serde(default)]
        theta: f64,
        #[serde(default)]
        angular_a0: f64,
    },
}

fn default_radial_a0() -> f64 {
    1.0
}

fn material(color: [f64; 3], diffuse: Option<[f64; 3]>,
    specular: Option<[f64; 3]>) -> Material {
    Material {
        color: color.into(),
        diffuse: diffuse.unwrap_or(color).into(),
        specular: specular.map(Color::from).unwrap_or_else(Color::black),
    }
}

impl TryFrom<Vec<ObjectJson>> for Scene {
    type Error = RenderError;

    fn try_from(objects: Vec<ObjectJson>) -> Result<Scene> {
        let mut scene = Scene::new();

        for object in objects.into_iter() {
            scene = match object {
                ObjectJson::Camera { width, height }
                    => scene.with_camera(Camera::new(width, height)),

                ObjectJson::Sphere { color, diffuse, specular, position, radius }
                    => scene.with_sphere(Sphere::new(
                        position.into(),
                        radius,
                        material(color, diffuse, specular),
                    )),

                ObjectJson::Plane { color, diffuse, specular, position, normal }
                    => scene.with_plane(Plane::new(
                        position.into(),
                        normal.into(),
                        material(color, diffuse, specular),
                    )),

                ObjectJson::Light { color, position, radial_a0, radial_a1,
                    radial_a2, direction, theta, angular_a0 }
                    => scene.with_light(Light {
                        color: color.into(),
                        position: position.into(),
                        radial_a0,
                        radial_a1,
                        radial_a2,
                        direction: direction.map(Vector3::from),
                        theta,
                        angular_a0,
                    }),
            };
        }

        log::debug!("Loaded scene: {} camera(s), {} sphere(s), {} plane(s), \
            {} light(s)", scene.cameras.len(), scene.spheres.len(),
            scene.planes.len(), scene.lights.len());

        scene.validate()?;
        Ok(scene)
    }
}

#[cfg(test)]
const SAMPLE_SCENE: &str = r#"[
    { "type": "camera", "width": 2.0, "height": 1.5 },
    { "type": "sphere", "color": [1.0, 0.0, 0.0], "specular": [1.0, 1.0, 1.0],
      "position": [0.0, 0.0, -5.0], "radius": 1.0 },
    { "type": "plane", "color": [0.0, 0.5, 0.0],
      "position": [0.0, -1.0, 0.0], "normal": [0.0, 1.0, 0.0] },
    { "type": "light", "color": [1.0, 1.0, 1.0], "position": [0.0, 5.0, 0.0],
      "radial_a2": 0.125 },
    { "type": "light", "color": [0.5, 0.5, 0.5], "position": [2.0, 2.0, 0.0],
      "direction": [0.0, -1.0, 0.0], "theta": 45.0, "angular_a0": 3.0 }
]"#;

#[test]
fn load_sample_scene() {
    let scene = Scene::from_json(SAMPLE_SCENE).unwrap();

    assert_eq!(*scene.camera().unwrap(), Camera::new(2.0, 1.5));
    assert_eq!(scene.spheres().len(), 1);
    assert_eq!(scene.planes().len(), 1);
    assert_eq!(scene.lights().len(), 2);

    let sphere = scene.sphere(0).unwrap();
    assert_eq!(sphere.position, Vector3::new(0.0, 0.0, -5.0));
    assert_eq!(sphere.material.diffuse, Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(sphere.material.specular, Color::white());

    let plane = scene.plane(0).unwrap();
    assert_eq!(plane.material.specular, Color::black());

    let point = scene.light(0).unwrap();
    assert!(!point.is_spotlight());
    assert_eq!(point.radial_a0, 1.0);
    assert_eq!(point.radial_a2, 0.125);

    let spot = scene.light(1).unwrap();
    assert!(spot.is_spotlight());
    assert_eq!(spot.direction, Some(Vector3::new(0.0, -1.0, 0.0)));
}

#[test]
fn scene_without_camera_is_rejected() {
    let json = r#"[
        { "type": "sphere", "color": [1.0, 0.0, 0.0],
          "position": [0.0, 0.0, -5.0], "radius": 1.0 }
    ]"#;

    match Scene::from_json(json) {
        Err(RenderError::MissingCamera) => (),
        other => panic!("expected a missing camera error, got {:?}", other),
    }
}

#[test]
fn spotlight_without_direction_is_rejected() {
    let json = r#"[
        { "type": "camera", "width": 1.0, "height": 1.0 },
        { "type": "light", "color": [1.0, 1.0, 1.0],
          "position": [0.0, 5.0, 0.0], "theta": 20.0 }
    ]"#;

    match Scene::from_json(json) {
        Err(RenderError::InvalidLight { index: 0, .. }) => (),
        other => panic!("expected an invalid light error, got {:?}", other),
    }
}

#[test]
fn spotlight_with_zero_direction_is_rejected() {
    let scene = Scene::new()
        .with_camera(Camera::new(1.0, 1.0))
        .with_light(Light::point(Color::white(), Vector3::zero()))
        .with_light(Light::spot(Color::white(), Vector3::zero(),
            Vector3::zero(), 20.0, 1.0));

    match scene.validate() {
        Err(RenderError::InvalidLight { index: 1, .. }) => (),
        other => panic!("expected an invalid light error, got {:?}", other),
    }
}

#[test]
fn degenerate_camera_is_rejected() {
    let scene = Scene::new().with_camera(Camera::new(0.0, 1.0));

    assert!(matches!(scene.validate(),
        Err(RenderError::InvalidCamera { index: 0, .. })));
}

#[test]
fn negative_radius_is_rejected() {
    let scene = Scene::new()
        .with_camera(Camera::new(1.0, 1.0))
        .with_sphere(Sphere::new(Vector3::zero(), -1.0, Default::default()));

    assert!(matches!(scene.validate(),
        Err(RenderError::InvalidSphere { index: 0, .. })));
}

#[test]
fn malformed_json_is_a_format_error() {
    let json = r#"[ { "type": "cube", "size": 1.0 } ]"#;

    assert!(matches!(Scene::from_json(json), Err(RenderError::SceneFormat(_))));
}

#[test]
fn only_first_camera_is_used() {
    let scene = Scene::new()
        .with_camera(Camera::new(1.0, 1.0))
        .with_camera(Camera::new(4.0, 3.0));

    assert!(scene.validate().is_ok());
    assert_eq!(scene.cameras().len(), 2);
    assert_eq!(*scene.camera().unwrap(), Camera::new(1.0, 1.0));
}
