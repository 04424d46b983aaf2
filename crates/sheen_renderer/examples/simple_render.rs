//! Simple ray tracer example.
//!
//! Renders a row of mirror and plastic spheres over a large ground sphere and
//! saves the result to PNG.

use sheen_core::{Light, Material, Scene, SkyGradient, Sphere};
use sheen_renderer::{render, Camera, Color, RenderConfig, Vec3};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Sheen Ray Tracer - Simple Example");
    println!("=================================");

    let scene = build_scene();

    let mut camera = Camera::new()
        .with_resolution(800, 450)
        .with_position(
            Vec3::new(0.0, 1.5, 6.0), // look_from
            Vec3::new(0.0, 0.5, 0.0), // look_at
            Vec3::new(0.0, 1.0, 0.0), // vup
        )
        .with_fov(40.0);
    camera.initialize();

    println!(
        "Rendering {}x{} with {} reflection bounces...",
        camera.image_width,
        camera.image_height,
        scene.bounce_limit()
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &scene, &RenderConfig::default());
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    if let Err(e) = image.save(filename) {
        eprintln!("Failed to save image: {}", e);
        std::process::exit(1);
    }
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let ground = Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::new(Color::new(0.4, 0.4, 0.4), Color::splat(0.1), 8.0),
    );

    let chrome = Material::new(Color::splat(0.05), Color::splat(0.9), 200.0);
    let red_plastic = Material::new(Color::new(0.7, 0.1, 0.1), Color::splat(0.3), 64.0);
    let gold = Material::new(Color::new(0.2, 0.15, 0.05), Color::new(0.9, 0.7, 0.3), 120.0);

    Scene::builder()
        .sphere(ground)
        .sphere(Sphere::new(Vec3::new(-2.2, 1.0, 0.0), 1.0, red_plastic))
        .sphere(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, chrome))
        .sphere(Sphere::new(Vec3::new(2.2, 1.0, 0.0), 1.0, gold))
        .light(Light::new(Vec3::new(-4.0, 6.0, 4.0), Color::splat(0.8)))
        .light(Light::new(Vec3::new(5.0, 4.0, 2.0), Color::new(0.4, 0.4, 0.5)))
        .bounce_limit(4)
        .environment(SkyGradient::default())
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Invalid scene: {}", e);
            std::process::exit(1);
        })
}
