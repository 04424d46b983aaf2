//! Whitted-style tracing of a single ray.
//!
//! Direct lighting at the first hit, then a bounded chain of mirror
//! reflections. Reflection is an explicit loop with running accumulators, so
//! the stack never grows with the bounce count.

use sheen_core::{Color, Scene};
use sheen_math::{reflect, Ray, Vec4};

use crate::intersect::intersect;
use crate::shade::shade_with_stats;

/// Hard cap on reflection bounces, whatever the scene asks for.
pub const MAX_BOUNCES: u32 = 5;

/// Offset along the surface normal for shadow and reflection rays.
pub const EPSILON: f32 = 1e-3;

/// Color and coverage for one traced ray.
///
/// Coverage is 1.0 when the primary ray hit a surface and 0.0 when it saw the
/// environment, so a compositor can treat background pixels as transparent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    pub color: Color,
    pub coverage: f32,
}

impl TraceResult {
    /// A ray that escaped to the environment.
    pub fn background(color: Color) -> Self {
        Self {
            color,
            coverage: 0.0,
        }
    }

    /// A ray that hit a surface.
    pub fn surface(color: Color) -> Self {
        Self {
            color,
            coverage: 1.0,
        }
    }

    /// Check if the primary ray missed every sphere.
    pub fn is_background(&self) -> bool {
        self.coverage == 0.0
    }
}

impl From<TraceResult> for Vec4 {
    fn from(result: TraceResult) -> Self {
        result.color.extend(result.coverage)
    }
}

/// Counters for the secondary rays one `trace` call cast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Reflection rays cast
    pub bounces: u32,
    /// Shadow rays cast (one per light per shaded point, except lights on the point)
    pub shadow_rays: u32,
}

/// Trace one ray through the scene.
pub fn trace(scene: &Scene, ray: &Ray) -> TraceResult {
    trace_with_stats(scene, ray).0
}

/// Trace one ray and report how many secondary rays it needed.
pub fn trace_with_stats(scene: &Scene, ray: &Ray) -> (TraceResult, TraceStats) {
    let mut stats = TraceStats::default();

    let Some(mut hit) = intersect(scene, ray) else {
        let background = scene.environment_color(ray.direction);
        return (TraceResult::background(background), stats);
    };

    let mut view = (-ray.direction).normalize();
    let (mut color, shadow_rays) = shade_with_stats(&hit.material, hit.position, hit.normal, view, scene);
    stats.shadow_rays += shadow_rays;

    // Running attenuation of the reflection chain
    let mut k = Color::ONE;

    for _ in 0..scene.bounce_limit().min(MAX_BOUNCES) {
        if !hit.material.is_reflective() {
            break;
        }

        let direction = reflect(-view, hit.normal).normalize();
        let reflection = Ray::offset_from(hit.position, hit.normal, EPSILON, direction);
        stats.bounces += 1;

        match intersect(scene, &reflection) {
            Some(next) => {
                view = -reflection.direction;
                let (direct, shadow_rays) =
                    shade_with_stats(&next.material, next.position, next.normal, view, scene);
                color += k * direct;
                stats.shadow_rays += shadow_rays;
                k *= next.material.specular;
                hit = next;
            }
            None => {
                color += k * scene.environment_color(reflection.direction);
                break;
            }
        }
    }

    (TraceResult::surface(color), stats)
}
