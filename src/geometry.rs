use crate::ray::Ray;
use crate::vector::Vector3;
use crate::light::Material;

/// A sphere, given by a center and a radius in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sphere {
    pub material: Material,
    pub position: Vector3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(position: Vector3, radius: f64, material: Material) -> Sphere {
        Sphere { material, position, radius }
    }

    /// Intersects a ray with the sphere.
    ///
    /// Returns the distance along the ray to the nearest intersection which
    /// is not behind the ray origin. If the ray starts inside the sphere, the
    /// far root (where the ray exits) is returned.
    ///
    /// The ray direction must be unit length; the quadratic's `a` term is
    /// taken to be 1.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let sphere_to_ray = ray.origin - self.position;

        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - self.radius.powi(2);

        let discriminant = b.powi(2) - (4.0 * c);

        // Also catches NaN from degenerate input.
        if !(discriminant >= 0.0) || !discriminant.is_finite() {
            return None;
        }

        let t0 = (-b - discriminant.sqrt()) / 2.0;
        let t1 = (-b + discriminant.sqrt()) / 2.0;

        if t0 >= 0.0 {
            Some(t0)
        } else if t1 >= 0.0 {
            Some(t1)
        } else {
            None
        }
    }

    /// Returns the outward unit normal at a point on the sphere.
    ///
    /// A zero-radius sphere has no well-defined normal at its center, so
    /// `None` is returned there.
    pub fn normal_at(&self, at: &Vector3) -> Option<Vector3> {
        (*at - self.position).normalize()
    }
}

/// A one-sided infinite plane.
///
/// The plane is visible only from the side its normal points toward. The
/// normal is expected to be unit length; it is used for shading as stored.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Plane {
    pub material: Material,
    pub position: Vector3,
    pub normal: Vector3,
}

impl Plane {
    pub fn new(position: Vector3, normal: Vector3, material: Material) -> Plane {
        Plane { material, position, normal }
    }

    /// Intersects a ray with the plane.
    ///
    /// Rays travelling parallel to the plane, or approaching it from behind,
    /// do not intersect.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let w = self.position - ray.origin;
        let vo = w.dot(&self.normal);
        let vd = self.normal.dot(&ray.direction);

        // Not moving toward the front face (this also rejects NaN).
        if !(vd < 0.0) {
            return None;
        }

        let t = vo / vd;
        if !t.is_finite() || t < 0.0 {
            return None;
        }

        Some(t)
    }

    /// Obtains the normal at a point on a plane.
    ///
    /// A plane has the same normal vector at all points across itself.
    pub fn normal_at(&self, _at: &Vector3) -> Option<Vector3> {
        Some(self.normal)
    }
}

/* Tests */

#[test]
fn ray_hits_sphere_center_from_outside() {
    let s = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(s.intersect(&r), Some(4.0));
}

#[test]
fn ray_hits_offset_sphere_at_distance_minus_radius() {
    let center = Vector3::new(3.0, -4.0, 12.0);
    let s = Sphere::new(center, 2.5, Default::default());
    let r = Ray::towards(Vector3::new(1.0, 1.0, 1.0), center).unwrap();

    let t = s.intersect(&r).unwrap();
    let expected = Vector3::new(1.0, 1.0, 1.0).distance(&center) - 2.5;
    assert!(crate::feq(t, expected));
}

#[test]
fn ray_misses_sphere() {
    let s = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, Default::default());
    let r = Ray::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_tangent_to_sphere() {
    let s = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, Default::default());
    let r = Ray::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(s.intersect(&r), Some(5.0));
}

#[test]
fn ray_inside_sphere_returns_exit() {
    let s = Sphere::new(Vector3::zero(), 1.0, Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), Some(1.0));
}

#[test]
fn sphere_behind_ray() {
    let s = Sphere::new(Vector3::new(0.0, 0.0, 5.0), 1.0, Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn sphere_normal_points_outward() {
    let s = Sphere::new(Vector3::new(0.0, 0.0, -2.0), 1.0, Default::default());

    assert_eq!(s.normal_at(&Vector3::new(0.0, 0.0, -1.0)),
        Some(Vector3::new(0.0, 0.0, 1.0)));
    assert_eq!(s.normal_at(&Vector3::new(0.0, 0.0, -2.0)), None);
}

#[test]
fn ray_hits_plane_from_front() {
    let p = Plane::new(Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0), Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, -1.0, 0.0));

    assert_eq!(p.intersect(&r), Some(1.0));
}

#[test]
fn ray_parallel_to_plane() {
    let p = Plane::new(Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0), Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(p.intersect(&r), None);
}

#[test]
fn ray_behind_plane() {
    let p = Plane::new(Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0), Default::default());

    // Moving away from the plane's front side.
    let up = Ray::new(Vector3::zero(), Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(p.intersect(&up), None);

    // Below the plane, looking at its back face.
    let below = Ray::new(Vector3::new(0.0, -3.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(p.intersect(&below), None);
}

#[test]
fn plane_behind_ray_origin() {
    // The ray points toward the front face but the plane is behind it.
    let p = Plane::new(Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0), Default::default());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, -1.0, 0.0));

    assert_eq!(p.intersect(&r), None);
}
