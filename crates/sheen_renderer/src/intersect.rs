//! Ray-sphere intersection against the whole scene.

use sheen_core::{Material, Scene, Sphere};
use sheen_math::{Interval, Ray, Vec3};

/// Record of a ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Parameter t where the intersection occurs (always > 0)
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal, pointing away from the sphere center
    pub normal: Vec3,
    /// Material of the sphere that was hit
    pub material: Material,
}

/// Find the nearest sphere hit in front of the ray origin.
///
/// Every sphere is tested; the smallest positive root wins. Returns `None`
/// when no sphere yields a root with t > 0.
pub fn intersect(scene: &Scene, ray: &Ray) -> Option<HitInfo> {
    let mut closest: Option<(f32, &Sphere)> = None;
    let mut ray_t = Interval::POSITIVE;

    for sphere in scene.spheres() {
        let Some(t) = sphere_root(sphere, ray) else {
            continue;
        };
        if ray_t.surrounds(t) {
            ray_t.max = t;
            closest = Some((t, sphere));
        }
    }

    closest.map(|(t, sphere)| {
        let position = ray.at(t);
        HitInfo {
            t,
            position,
            normal: (position - sphere.center).normalize(),
            material: sphere.material,
        }
    })
}

/// Solve a*t^2 + b*t + c = 0 for one sphere and return the smaller root.
///
/// Only the near root is considered, so a ray starting inside a sphere does
/// not hit it. The sign of the root is left to the caller.
fn sphere_root(sphere: &Sphere, ray: &Ray) -> Option<f32> {
    let oc = ray.origin - sphere.center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    if a == 0.0 {
        // Degenerate direction: linear fallback, undefined when b is also 0
        if b == 0.0 {
            return None;
        }
        return Some(-c / b);
    }

    Some((-b - discriminant.sqrt()) / (2.0 * a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheen_core::Color;

    fn grey() -> Material {
        Material::diffuse(Color::splat(0.5))
    }

    fn scene_with(spheres: Vec<Sphere>) -> Scene {
        Scene::builder().spheres(spheres).build().unwrap()
    }

    #[test]
    fn test_single_sphere_hit() {
        let scene = scene_with(vec![Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = intersect(&scene, &ray).expect("ray should hit the sphere");
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!((hit.position - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert_eq!(hit.material, grey());
    }

    #[test]
    fn test_distance_minus_radius() {
        // |origin - center| = 5, radius 2
        let center = Vec3::new(4.0, 6.0, 3.0);
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let scene = scene_with(vec![Sphere::new(center, 2.0, grey())]);
        let ray = Ray::new(origin, (center - origin).normalize());

        let hit = intersect(&scene, &ray).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-4, "t = {}", hit.t);
    }

    #[test]
    fn test_unnormalized_direction() {
        let scene = scene_with(vec![Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));

        let hit = intersect(&scene, &ray).unwrap();
        // Parameter scales with the direction, the hit point does not
        assert!((hit.t - 2.0).abs() < 1e-5);
        assert!((hit.position - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
        assert!((hit.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normal_points_outward() {
        let center = Vec3::new(0.5, -0.25, -4.0);
        let scene = scene_with(vec![Sphere::new(center, 1.5, grey())]);
        let directions = [
            Vec3::new(0.1, 0.1, -1.0),
            Vec3::new(0.3, -0.2, -1.0),
            Vec3::new(-0.1, 0.05, -1.0),
        ];

        for direction in directions {
            let hit = intersect(&scene, &Ray::new(Vec3::ZERO, direction)).unwrap();
            assert!((hit.normal.length() - 1.0).abs() < 1e-5);
            assert!(hit.normal.dot(hit.position - center) > 0.0);
            assert!(hit.t > 0.0);
        }
    }

    #[test]
    fn test_miss() {
        let scene = scene_with(vec![Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(intersect(&scene, &ray).is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let scene = scene_with(vec![Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, grey())]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect(&scene, &ray).is_none());
    }

    #[test]
    fn test_origin_inside_sphere_is_not_a_hit() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 2.0, grey())]);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(intersect(&scene, &ray).is_none());
    }

    #[test]
    fn test_tangent_ray() {
        let scene = scene_with(vec![Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())]);
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = intersect(&scene, &ray).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_nearest_sphere_wins() {
        let near = Material::diffuse(Color::new(1.0, 0.0, 0.0));
        let middle = Material::diffuse(Color::new(0.0, 1.0, 0.0));
        let far = Material::diffuse(Color::new(0.0, 0.0, 1.0));

        // Insertion order should not matter
        let scene = scene_with(vec![
            Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, middle),
            Sphere::new(Vec3::new(0.0, 0.0, -20.0), 1.0, far),
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, near),
        ]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = intersect(&scene, &ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert_eq!(hit.material, near);
    }

    #[test]
    fn test_zero_direction_never_hits() {
        let scene = scene_with(vec![
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey()),
            Sphere::new(Vec3::ZERO, 1.0, grey()),
        ]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO);
        assert!(intersect(&scene, &ray).is_none());
    }

    #[test]
    fn test_empty_scene() {
        let scene = scene_with(Vec::new());
        assert!(intersect(&scene, &Ray::default()).is_none());
    }

    #[test]
    fn test_sphere_root_linear_fallback() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey());
        assert_eq!(sphere_root(&sphere, &Ray::new(Vec3::ZERO, Vec3::ZERO)), None);
    }
}
