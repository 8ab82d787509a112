use crate::ray::Ray;
use crate::vector::Vector3;
use crate::color::Color;
use crate::consts::AMBIENT;
use crate::config::{ RenderOptions, ShadowPolicy, AmbientPolicy };
use crate::intersect::Hit;
use crate::light::{ Light, lighting };
use crate::scene::Scene;

/// Determines whether `light` is blocked as seen from point `p`.
///
/// `p` should already be lifted off the surface; see `shade_hit`.
pub fn is_shadowed(scene: &Scene, p: Vector3, light: &Light,
    policy: ShadowPolicy) -> bool {
    let v = light.position - p;
    let distance = v.magnitude();

    // A point sitting on the light cannot be shadowed.
    let direction = match v.normalize() {
        Some(d) => d,
        None => return false,
    };

    let ray = Ray::new(p, direction);
    match policy {
        ShadowPolicy::AnyHit => scene.occluded(&ray, f64::INFINITY),
        ShadowPolicy::NearerThanLight => scene.occluded(&ray, distance),
    }
}

/// Calculates the color of a hit from every light in the scene.
///
/// Each light that is not blocked adds the ambient term plus its attenuated
/// diffuse and specular light. Blocked lights add nothing at all.
pub fn shade_hit(scene: &Scene, ray: &Ray, hit: &Hit,
    options: &RenderOptions) -> Color {
    let eyev = -ray.direction;
    let over_point = hit.point + hit.normal * options.shadow_bias;
    let ambient = Color::gray(AMBIENT);

    let mut color = match options.ambient_policy {
        AmbientPolicy::Once => ambient,
        AmbientPolicy::PerVisibleLight => Color::black(),
    };

    for light in scene.lights() {
        if is_shadowed(scene, over_point, light, options.shadow_policy) {
            continue;
        }

        if options.ambient_policy == AmbientPolicy::PerVisibleLight {
            color = color + ambient;
        }

        let lightv = match (light.position - hit.point).normalize() {
            Some(v) => v,
            None => continue,
        };

        let radial = light.radial_attenuation(light.position.distance(&hit.point));
        let angular = light.angular_attenuation(hit.point);
        let (diffuse, specular) = lighting(&hit.material, light, lightv, eyev,
            hit.normal);

        color = color + (diffuse + specular) * (angular * radial);
    }

    color
}

/// Determines the color seen along a ray.
pub fn color_at(scene: &Scene, ray: &Ray, options: &RenderOptions) -> Color {
    match scene.intersect(ray) {
        None => options.background,
        Some(hit) => shade_hit(scene, ray, &hit, options),
    }
}

/* Tests */

#[cfg(test)]
use crate::geometry::{ Sphere, Plane };
#[cfg(test)]
use crate::light::Material;

#[cfg(test)]
fn matte_white() -> Material {
    Material::new(Color::white(), Color::white(), Color::black())
}

#[test]
fn miss_returns_background() {
    let scene = Scene::new()
        .with_light(Light::point(Color::white(), Vector3::new(0.0, 5.0, 0.0)));
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(color_at(&scene, &r, &Default::default()), Color::black());

    let options = RenderOptions {
        background: Color::rgb(0.2, 0.3, 0.4),
        ..Default::default()
    };
    assert_eq!(color_at(&scene, &r, &options), Color::rgb(0.2, 0.3, 0.4));
}

#[test]
fn shadow_light_behind_sphere() {
    let scene = Scene::new()
        .with_sphere(Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, matte_white()));
    let light = Light::point(Color::white(), Vector3::new(0.0, 0.0, -10.0));

    assert!(is_shadowed(&scene, Vector3::zero(), &light,
        ShadowPolicy::NearerThanLight));
    assert!(is_shadowed(&scene, Vector3::zero(), &light, ShadowPolicy::AnyHit));
}

#[test]
fn shadow_object_beyond_light() {
    let scene = Scene::new()
        .with_sphere(Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0, matte_white()));
    let light = Light::point(Color::white(), Vector3::new(0.0, 0.0, -2.0));

    // The sphere is behind the light, so only the literal any-hit policy
    // considers the point shadowed.
    assert!(!is_shadowed(&scene, Vector3::zero(), &light,
        ShadowPolicy::NearerThanLight));
    assert!(is_shadowed(&scene, Vector3::zero(), &light, ShadowPolicy::AnyHit));
}

#[test]
fn shadow_object_behind_point() {
    let scene = Scene::new()
        .with_sphere(Sphere::new(Vector3::new(0.0, 0.0, 5.0), 1.0, matte_white()));
    let light = Light::point(Color::white(), Vector3::new(0.0, 0.0, -5.0));

    assert!(!is_shadowed(&scene, Vector3::zero(), &light, ShadowPolicy::AnyHit));
}

#[test]
fn occluded_light_contributes_nothing() {
    let floor = Plane::new(Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0), matte_white());
    let blocker = Sphere::new(Vector3::new(0.0, 2.0, 0.0), 0.5, matte_white());
    let light = Light::point(Color::white(), Vector3::new(0.0, 5.0, 0.0));
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, -1.0, 0.0));

    let lit = Scene::new().with_plane(floor).with_light(light);
    assert_eq!(color_at(&lit, &r, &Default::default()), Color::gray(1.1));

    let shadowed = lit.clone().with_sphere(blocker);
    assert_eq!(color_at(&shadowed, &r, &Default::default()), Color::black());
}

#[test]
fn ambient_added_per_visible_light() {
    // Black lights reach the floor but carry no diffuse or specular light,
    // so only ambient remains.
    let floor = Plane::new(Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0), matte_white());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, -1.0, 0.0));

    let scene = Scene::new()
        .with_plane(floor)
        .with_light(Light::point(Color::black(), Vector3::new(3.0, 5.0, 0.0)))
        .with_light(Light::point(Color::black(), Vector3::new(-3.0, 5.0, 0.0)));

    assert_eq!(color_at(&scene, &r, &Default::default()),
        Color::gray(2.0 * AMBIENT));

    let once = RenderOptions {
        ambient_policy: AmbientPolicy::Once,
        ..Default::default()
    };
    assert_eq!(color_at(&scene, &r, &once), Color::gray(AMBIENT));
}

#[test]
fn no_lights_means_no_ambient_by_default() {
    let floor = Plane::new(Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0), matte_white());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, -1.0, 0.0));
    let scene = Scene::new().with_plane(floor);

    assert_eq!(color_at(&scene, &r, &Default::default()), Color::black());
}

#[test]
fn radial_attenuation_dims_diffuse() {
    let floor = Plane::new(Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0), matte_white());
    let light = Light {
        radial_a0: 0.0,
        radial_a1: 0.0,
        radial_a2: 1.0,
        ..Light::point(Color::white(), Vector3::new(0.0, 1.0, 0.0))
    };
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, -1.0, 0.0));
    let scene = Scene::new().with_plane(floor).with_light(light);

    // Two units from the light: 1 / 2^2 of the diffuse.
    assert_eq!(color_at(&scene, &r, &Default::default()),
        Color::gray(AMBIENT + 0.25));
}

#[test]
fn spotlight_outside_cone_leaves_ambient() {
    let floor = Plane::new(Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0), matte_white());
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, -1.0, 0.0));

    // Aimed straight down from above the hit point.
    let on_target = Light::spot(Color::white(), Vector3::new(0.0, 3.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0), 10.0, 1.0);
    let scene = Scene::new().with_plane(floor).with_light(on_target);
    assert_eq!(color_at(&scene, &r, &Default::default()),
        Color::gray(AMBIENT + 1.0));

    // Aimed away from the hit point.
    let off_target = Light::spot(Color::white(), Vector3::new(0.0, 3.0, 0.0),
        Vector3::new(1.0, -1.0, 0.0), 10.0, 1.0);
    let scene = Scene::new().with_plane(floor).with_light(off_target);
    assert_eq!(color_at(&scene, &r, &Default::default()),
        Color::gray(AMBIENT));
}
