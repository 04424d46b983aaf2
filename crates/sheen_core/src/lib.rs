//! Sheen Core - Scene description for the Sheen ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Light`, `Material`
//! - **Environments**: solid color, sky gradient, cube map
//! - **Scene files**: JSON scene description loading
//!
//! # Example
//!
//! ```ignore
//! use sheen_core::load_scene;
//!
//! let scene = load_scene("scenes/mirrors.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.spheres().len(),
//!     scene.lights().len());
//! ```

pub mod description;
pub mod environment;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use description::{load_scene, load_scene_from_str, EnvironmentDescription, SceneDescription};
pub use environment::{CubeMap, Environment, SkyGradient, SolidColor};
pub use scene::{
    Color, Light, Material, Scene, SceneBuilder, SceneError, SceneResult, Sphere,
    DEFAULT_BOUNCE_LIMIT,
};
pub use texture::{load_texture, Texture, TextureError};
