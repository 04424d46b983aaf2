//! Example: Load and inspect a JSON scene file.
//!
//! Run with: cargo run --example load_scene -- scenes/mirrors.json

use std::env;

use sheen_core::load_scene;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-json>");
        println!("\nExample:");
        println!("  cargo run --example load_scene -- scenes/mirrors.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n=== Scene ===");
            println!("Bounce limit: {}", scene.bounce_limit());

            println!("\n--- Spheres ---");
            for (i, sphere) in scene.spheres().iter().enumerate() {
                let m = &sphere.material;
                println!(
                    "  [{}] center ({:.2}, {:.2}, {:.2}) radius {:.2}",
                    i, sphere.center.x, sphere.center.y, sphere.center.z, sphere.radius
                );
                println!(
                    "       k_d ({:.2}, {:.2}, {:.2}) k_s ({:.2}, {:.2}, {:.2}) n {:.1}",
                    m.diffuse.x,
                    m.diffuse.y,
                    m.diffuse.z,
                    m.specular.x,
                    m.specular.y,
                    m.specular.z,
                    m.shininess
                );
            }

            println!("\n--- Lights ---");
            for (i, light) in scene.lights().iter().enumerate() {
                println!(
                    "  [{}] at ({:.2}, {:.2}, {:.2}) intensity ({:.2}, {:.2}, {:.2})",
                    i,
                    light.position.x,
                    light.position.y,
                    light.position.z,
                    light.intensity.x,
                    light.intensity.y,
                    light.intensity.z
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
