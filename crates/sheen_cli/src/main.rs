use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use sheen_core::load_scene;
use sheen_math::Vec3;
use sheen_renderer::{render, Camera, RenderConfig, DEFAULT_BUCKET_SIZE};

mod demo;

/// Render a scene of spheres with mirror reflections and hard shadows.
#[derive(Parser, Debug)]
#[command(name = "sheen", version)]
struct Args {
    /// Scene description (JSON). The built-in demo scene is used when omitted.
    scene: Option<PathBuf>,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "sheen.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    #[arg(long, default_value_t = 450, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 40.0)]
    fov: f32,

    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        default_values_t = [0.0, 1.8, 7.0]
    )]
    look_from: Vec<f32>,

    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        default_values_t = [0.0, 0.8, 0.0]
    )]
    look_at: Vec<f32>,

    /// Override the scene's reflection bounce limit
    #[arg(long)]
    bounce_limit: Option<u32>,

    /// Bucket edge length in pixels
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    bucket_size: u32,

    /// Render threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
}

fn vec3(values: &[f32], name: &str) -> Result<Vec3> {
    ensure!(values.len() == 3, "--{name} takes exactly 3 values, got {}", values.len());
    Ok(Vec3::new(values[0], values[1], values[2]))
}

/// Reject views the camera cannot build a basis for.
fn check_view(look_from: Vec3, look_at: Vec3) -> Result<()> {
    ensure!(look_from != look_at, "--look-from and --look-at must differ");
    ensure!(
        (look_from - look_at).cross(Vec3::Y).length_squared() > 0.0,
        "view direction must not be parallel to the up axis (+Y)"
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    log::info!("Starting Sheen");

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure render threads")?;
    }

    let mut scene = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, rendering the demo scene");
            demo::scene().context("Failed to build the demo scene")?
        }
    };

    if let Some(bounce_limit) = args.bounce_limit {
        log::info!("Bounce limit overridden: {}", bounce_limit);
        scene = scene.with_bounce_limit(bounce_limit);
    }

    let look_from = vec3(&args.look_from, "look-from")?;
    let look_at = vec3(&args.look_at, "look-at")?;
    check_view(look_from, look_at)?;

    let mut camera = Camera::new()
        .with_resolution(args.width, args.height)
        .with_position(look_from, look_at, Vec3::Y)
        .with_fov(args.fov);
    camera.initialize();

    let config = RenderConfig {
        bucket_size: args.bucket_size,
    };
    let image = render(&camera, &scene, &config);
    log::info!("Coverage: {:.1}%", image.coverage() * 100.0);

    image
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sheen"]).unwrap();
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("sheen.png"));
        assert_eq!(args.width, 800);
        assert_eq!(args.height, 450);
        assert_eq!(args.bucket_size, DEFAULT_BUCKET_SIZE);
        assert!(args.bounce_limit.is_none());
        assert_eq!(vec3(&args.look_from, "look-from").unwrap(), Vec3::new(0.0, 1.8, 7.0));
    }

    #[test]
    fn test_full_arguments() {
        let args = Args::try_parse_from([
            "sheen",
            "scenes/mirrors.json",
            "-o",
            "out.png",
            "--width",
            "320",
            "--height",
            "240",
            "--look-from",
            "-1",
            "2",
            "-3.5",
            "--bounce-limit",
            "0",
            "--threads",
            "2",
        ])
        .unwrap();

        assert_eq!(args.scene, Some(PathBuf::from("scenes/mirrors.json")));
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.width, 320);
        assert_eq!(args.bounce_limit, Some(0));
        assert_eq!(args.threads, Some(2));
        assert_eq!(vec3(&args.look_from, "look-from").unwrap(), Vec3::new(-1.0, 2.0, -3.5));
    }

    #[test]
    fn test_rejects_zero_width() {
        assert!(Args::try_parse_from(["sheen", "--width", "0"]).is_err());
    }

    #[test]
    fn test_check_view() {
        assert!(check_view(Vec3::new(0.0, 1.8, 7.0), Vec3::new(0.0, 0.8, 0.0)).is_ok());
        assert!(check_view(Vec3::ONE, Vec3::ONE).is_err());
        // Looking straight down or up along the up axis
        assert!(check_view(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO).is_err());
        assert!(check_view(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)).is_err());
    }

    #[test]
    fn test_vec3_wrong_length() {
        assert!(vec3(&[1.0, 2.0], "look-at").is_err());
    }
}
