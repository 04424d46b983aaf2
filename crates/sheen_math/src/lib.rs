// Re-export glam for convenience
pub use glam::*;

// Sheen math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Reflect `v` about the surface normal `n`.
///
/// Returns `v - 2 * dot(v, n) * n`. `n` is expected to be unit length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
