//! Environment lighting for rays that leave the scene.
//!
//! An environment maps a direction to a color. Implementations must be pure:
//! they are sampled concurrently from every render thread.

use sheen_math::Vec3;

use crate::scene::Color;
use crate::texture::{Texture, TextureError, TextureResult};

/// A distant background sampled by direction.
pub trait Environment: Send + Sync {
    /// Color seen along `direction`. The direction need not be unit length.
    fn sample(&self, direction: Vec3) -> Color;
}

impl<F> Environment for F
where
    F: Fn(Vec3) -> Color + Send + Sync,
{
    fn sample(&self, direction: Vec3) -> Color {
        self(direction)
    }
}

/// The same color in every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor(pub Color);

impl Environment for SolidColor {
    fn sample(&self, _direction: Vec3) -> Color {
        self.0
    }
}

/// Vertical blend from `horizon` (looking down) to `zenith` (looking up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub horizon: Color,
    pub zenith: Color,
}

impl SkyGradient {
    pub fn new(horizon: Color, zenith: Color) -> Self {
        Self { horizon, zenith }
    }
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self {
            horizon: Color::new(1.0, 1.0, 1.0),
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }
}

impl Environment for SkyGradient {
    fn sample(&self, direction: Vec3) -> Color {
        let unit_direction = direction.try_normalize().unwrap_or(Vec3::Y);
        let a = 0.5 * (unit_direction.y + 1.0);
        self.horizon * (1.0 - a) + self.zenith * a
    }
}

/// Cube map face order: +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_FACE_COUNT: usize = 6;

/// Six-face environment map.
///
/// Faces use the usual cube map convention: each face is seen from inside the
/// cube, with image rows running top to bottom.
#[derive(Debug, Clone)]
pub struct CubeMap {
    faces: [Texture; CUBE_FACE_COUNT],
    z_up: bool,
}

impl CubeMap {
    /// Create a cube map. All faces must share the same dimensions.
    pub fn new(faces: [Texture; CUBE_FACE_COUNT]) -> TextureResult<Self> {
        let (expected_width, expected_height) = (faces[0].width, faces[0].height);
        for (face, texture) in faces.iter().enumerate() {
            if texture.width != expected_width || texture.height != expected_height {
                return Err(TextureError::FaceSizeMismatch {
                    face,
                    width: texture.width,
                    height: texture.height,
                    expected_width,
                    expected_height,
                });
            }
        }
        Ok(Self { faces, z_up: false })
    }

    /// Treat +Z as up: directions are swizzled (x, y, z) -> (x, z, y) before
    /// the face lookup.
    pub fn with_z_up(mut self, z_up: bool) -> Self {
        self.z_up = z_up;
        self
    }

    /// Select the face for a direction and return (face, u, v), with u and v
    /// in [0, 1] and v = 0 at the bottom of the face image.
    fn face_uv(direction: Vec3) -> (usize, f32, f32) {
        let abs = direction.abs();

        // (face, major axis magnitude, sc, tc)
        let (face, ma, sc, tc) = if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x >= 0.0 {
                (0, abs.x, -direction.z, -direction.y)
            } else {
                (1, abs.x, direction.z, -direction.y)
            }
        } else if abs.y >= abs.z {
            if direction.y >= 0.0 {
                (2, abs.y, direction.x, direction.z)
            } else {
                (3, abs.y, direction.x, -direction.z)
            }
        } else if direction.z >= 0.0 {
            (4, abs.z, direction.x, -direction.y)
        } else {
            (5, abs.z, -direction.x, -direction.y)
        };

        if ma <= 0.0 {
            return (0, 0.5, 0.5);
        }

        let s = 0.5 * (sc / ma + 1.0);
        let t = 0.5 * (tc / ma + 1.0);

        // t grows downward in the face image
        (face, s, 1.0 - t)
    }
}

impl Environment for CubeMap {
    fn sample(&self, direction: Vec3) -> Color {
        let direction = if self.z_up {
            Vec3::new(direction.x, direction.z, direction.y)
        } else {
            direction
        };
        let (face, u, v) = Self::face_uv(direction);
        self.faces[face].sample(u, v)
    }
}
