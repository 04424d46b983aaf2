//! Built-in scene rendered when no scene file is given.

use sheen_core::{Color, Light, Material, Scene, SceneResult, SkyGradient, Sphere};
use sheen_math::Vec3;

/// Three spheres (plastic, mirror, brass) on a large ground sphere, lit by a
/// warm key light and a cool fill.
pub fn scene() -> SceneResult<Scene> {
    let ground = Material::new(Color::new(0.35, 0.35, 0.3), Color::splat(0.15), 16.0);
    let plastic = Material::new(Color::new(0.1, 0.3, 0.7), Color::splat(0.25), 64.0);
    let mirror = Material::new(Color::splat(0.02), Color::splat(0.95), 500.0);
    let brass = Material::new(Color::new(0.25, 0.18, 0.05), Color::new(0.8, 0.6, 0.25), 90.0);

    Scene::builder()
        .sphere(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground))
        .sphere(Sphere::new(Vec3::new(-2.1, 1.0, -0.5), 1.0, plastic))
        .sphere(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, mirror))
        .sphere(Sphere::new(Vec3::new(2.1, 0.7, 0.5), 0.7, brass))
        .light(Light::new(Vec3::new(-5.0, 8.0, 5.0), Color::new(0.9, 0.85, 0.75)))
        .light(Light::new(Vec3::new(6.0, 3.0, 3.0), Color::new(0.25, 0.3, 0.4)))
        .bounce_limit(4)
        .environment(SkyGradient::new(Color::new(0.9, 0.9, 0.95), Color::new(0.3, 0.5, 0.9)))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_is_valid() {
        let scene = scene().unwrap();
        assert_eq!(scene.spheres().len(), 4);
        assert_eq!(scene.lights().len(), 2);
        assert!(scene.spheres().iter().any(|s| s.material.is_reflective()));
    }
}
