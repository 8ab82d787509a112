use crate::ray::Ray;
use crate::vector::Vector3;
use crate::light::Material;
use crate::scene::Scene;

/// Identifies which primitive of a `Scene` was hit.
///
/// The index refers to the primitive's position in its collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Surface {
    Sphere(usize),
    Plane(usize),
}

/// The closest hit of a ray against a scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    /// The distance along the ray.
    pub t: f64,

    /// The point where the intersection occurs.
    pub point: Vector3,

    /// The surface normal at `point`. Unit length for spheres; planes report
    /// their stored normal.
    pub normal: Vector3,

    /// The material of the surface that was hit.
    pub material: Material,

    pub surface: Surface,
}

impl Scene {
    /// Finds the closest surface a ray hits.
    ///
    /// Every sphere and plane is tested and the smallest non-negative `t`
    /// wins. On an exact tie the primitive tested first is kept, spheres
    /// before planes, each in declaration order.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;

        // Candidates without a defined normal are skipped.
        let mut consider = |t: Option<f64>,
            normal: &dyn Fn(&Vector3) -> Option<Vector3>,
            material: Material, surface: Surface| {
            let t = match t {
                Some(t) => t,
                None => return,
            };

            if let Some(best) = nearest {
                if best.t <= t {
                    return;
                }
            }

            let point = ray.position(t);
            if let Some(normal) = normal(&point) {
                nearest = Some(Hit { t, point, normal, material, surface });
            }
        };

        for (i, sphere) in self.spheres().iter().enumerate() {
            consider(sphere.intersect(ray), &|p: &Vector3| sphere.normal_at(p),
                sphere.material, Surface::Sphere(i));
        }

        for (i, plane) in self.planes().iter().enumerate() {
            consider(plane.intersect(ray), &|p: &Vector3| plane.normal_at(p),
                plane.material, Surface::Plane(i));
        }

        nearest
    }

    /// Checks whether anything lies on a ray strictly between its origin and
    /// `max_t`.
    ///
    /// Unlike `intersect`, this stops at the first blocker found and does not
    /// care which one is closest.
    pub fn occluded(&self, ray: &Ray, max_t: f64) -> bool {
        let blocks = |t: Option<f64>| match t {
            Some(t) => t > 0.0 && t < max_t,
            None => false,
        };

        self.spheres().iter().any(|s| blocks(s.intersect(ray)))
            || self.planes().iter().any(|p| blocks(p.intersect(ray)))
    }
}

/* Tests */

#[cfg(test)]
use crate::geometry::{ Sphere, Plane };

#[test]
fn closest_hit_regardless_of_declaration_order() {
    let far = Sphere::new(Vector3::new(0.0, 0.0, -10.0), 1.0, Default::default());
    let near = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    let s1 = Scene::new().with_sphere(far).with_sphere(near);
    let h1 = s1.intersect(&r).unwrap();
    assert_eq!(h1.t, 4.0);
    assert_eq!(h1.surface, Surface::Sphere(1));

    let s2 = Scene::new().with_sphere(near).with_sphere(far);
    let h2 = s2.intersect(&r).unwrap();
    assert_eq!(h2.t, 4.0);
    assert_eq!(h2.surface, Surface::Sphere(0));
}

#[test]
fn later_plane_does_not_overwrite_closer_sphere() {
    let sphere = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, Default::default());
    let wall = Plane::new(Vector3::new(0.0, 0.0, -20.0),
        Vector3::new(0.0, 0.0, 1.0), Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    let scene = Scene::new().with_sphere(sphere).with_plane(wall);
    let hit = scene.intersect(&r).unwrap();

    assert_eq!(hit.surface, Surface::Sphere(0));
    assert_eq!(hit.point, Vector3::new(0.0, 0.0, -4.0));
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn closer_plane_beats_sphere() {
    let sphere = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, Default::default());
    let wall = Plane::new(Vector3::new(0.0, 0.0, -2.0),
        Vector3::new(0.0, 0.0, 1.0), Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    let scene = Scene::new().with_sphere(sphere).with_plane(wall);
    let hit = scene.intersect(&r).unwrap();

    assert_eq!(hit.surface, Surface::Plane(0));
    assert_eq!(hit.t, 2.0);
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn degenerate_sphere_does_not_hide_plane_behind_it() {
    let dot = Sphere::new(Vector3::new(0.0, 0.0, -2.0), 0.0, Default::default());
    let wall = Plane::new(Vector3::new(0.0, 0.0, -5.0),
        Vector3::new(0.0, 0.0, 1.0), Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    let scene = Scene::new().with_sphere(dot).with_plane(wall);
    let hit = scene.intersect(&r).unwrap();

    assert_eq!(hit.surface, Surface::Plane(0));
    assert_eq!(hit.t, 5.0);
}

#[test]
fn hit_carries_material() {
    use crate::color::Color;

    let m = Material::new(Color::white(), Color::rgb(0.2, 0.4, 0.6),
        Color::black());
    let sphere = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, m);
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    let hit = Scene::new().with_sphere(sphere).intersect(&r).unwrap();
    assert_eq!(hit.material, m);
}

#[test]
fn empty_scene_has_no_hit() {
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(Scene::new().intersect(&r), None);
}

#[test]
fn occlusion_respects_max_distance() {
    let sphere = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, Default::default());
    let scene = Scene::new().with_sphere(sphere);
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert!(scene.occluded(&r, f64::INFINITY));
    assert!(scene.occluded(&r, 10.0));
    assert!(!scene.occluded(&r, 3.0));
}
