//! Sheen Renderer - CPU Whitted-style ray tracing
//!
//! Traces rays against a scene of spheres lit by point lights:
//! Blinn-Phong direct lighting, hard shadows and a bounded chain of
//! mirror reflections, with an environment behind everything.
//!
//! The core entry point is [`trace`], a pure function of one scene and one
//! ray. [`render`] drives it once per pixel across a rayon thread pool.

mod bucket;
mod camera;
mod intersect;
mod renderer;
mod shade;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use intersect::{intersect, HitInfo};
pub use renderer::{color_to_rgba, linear_to_gamma, render, render_pixel, ImageBuffer, RenderConfig};
pub use shade::shade;
pub use tracer::{trace, trace_with_stats, TraceResult, TraceStats, EPSILON, MAX_BOUNCES};

/// Re-export scene and math types used in the public API
pub use sheen_core::{Color, Light, Material, Scene, Sphere};
pub use sheen_math::{Ray, Vec3, Vec4};
