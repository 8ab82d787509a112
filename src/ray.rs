use crate::vector::Vector3;

/// A ray with an origin and a direction.
///
/// The intersection math assumes `direction` is unit length; every ray the
/// renderer builds comes from a normalized vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Vector3, direction: Vector3) -> Ray {
        Ray { origin, direction }
    }

    /// Builds a ray from `origin` toward `target`.
    ///
    /// Returns `None` if the two points coincide.
    pub fn towards(origin: Vector3, target: Vector3) -> Option<Ray> {
        let direction = (target - origin).normalize()?;
        Some(Ray { origin, direction })
    }

    pub fn position(&self, t: f64) -> Vector3 {
        self.origin + (t * self.direction)
    }
}

#[test]
fn ray_position() {
    let r = Ray::new(
                Vector3::new(2.0, 3.0, 4.0),
                Vector3::new(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Vector3::new(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Vector3::new(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Vector3::new(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Vector3::new(4.5, 3.0, 4.0));
}

#[test]
fn ray_towards_point() {
    let r = Ray::towards(Vector3::zero(), Vector3::new(0.0, 0.0, -3.0)).unwrap();
    assert_eq!(r.direction, Vector3::new(0.0, 0.0, -1.0));

    assert!(Ray::towards(Vector3::zero(), Vector3::zero()).is_none());
}
