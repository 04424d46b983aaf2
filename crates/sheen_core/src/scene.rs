//! Scene types for Sheen.
//!
//! A [`Scene`] is built once per frame and then only read while tracing, so it
//! can be shared by reference across render threads.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sheen_math::Vec3;
use thiserror::Error;

use crate::environment::{Environment, SkyGradient};
use crate::texture::TextureError;

/// Color type alias (linear RGB, typically 0-1 per channel)
pub type Color = Vec3;

/// Default number of reflection bounces for a new scene.
pub const DEFAULT_BOUNCE_LIMIT: u32 = 5;

/// Errors that can occur while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene description error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Sphere {index} has invalid radius {radius} (must be finite and > 0)")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Sphere {index} has invalid shininess {shininess} (must be finite and >= 0)")]
    InvalidShininess { index: usize, shininess: f32 },

    #[error("Light {index} has invalid intensity {intensity:?} (channels must be finite and >= 0)")]
    InvalidLight { index: usize, intensity: Vec3 },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Blinn-Phong surface description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Material {
    /// Diffuse reflectance (k_d), per channel in [0, 1]
    pub diffuse: Color,

    /// Specular reflectance (k_s), per channel in [0, 1].
    /// Also scales the mirror reflection carried by the tracer.
    pub specular: Color,

    /// Phong exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::new(0.5, 0.5, 0.5), // Grey default
            specular: Color::ZERO,
            shininess: 1.0,
        }
    }
}

impl Material {
    /// Create a new material.
    pub fn new(diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
        }
    }

    /// A purely diffuse material with no specular highlight or reflection.
    pub fn diffuse(diffuse: Color) -> Self {
        Self {
            diffuse,
            specular: Color::ZERO,
            shininess: 0.0,
        }
    }

    /// A perfect mirror that reflects `specular` and has no diffuse term.
    pub fn mirror(specular: Color, shininess: f32) -> Self {
        Self {
            diffuse: Color::ZERO,
            specular,
            shininess,
        }
    }

    /// Check if this material carries any reflected energy.
    pub fn is_reflective(&self) -> bool {
        self.specular.x + self.specular.y + self.specular.z > 0.0
    }
}

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    #[serde(default)]
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Light {
    pub position: Vec3,
    pub intensity: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// The scene to trace: spheres, point lights, bounce limit and environment.
///
/// Construct it with [`SceneBuilder`], which enforces the invariants the
/// tracer relies on (positive radii, non-negative shininess and intensity).
#[derive(Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
    bounce_limit: u32,
    environment: Arc<dyn Environment>,
}

impl Scene {
    /// Start building a scene.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::new()
    }

    /// Spheres in insertion order.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Lights in insertion order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Maximum number of reflection bounces requested for this scene.
    pub fn bounce_limit(&self) -> u32 {
        self.bounce_limit
    }

    /// Sample the environment color in the given direction.
    #[inline]
    pub fn environment_color(&self, direction: Vec3) -> Color {
        self.environment.sample(direction)
    }

    /// Return a copy of this scene with a different bounce limit.
    pub fn with_bounce_limit(mut self, bounce_limit: u32) -> Self {
        self.bounce_limit = bounce_limit;
        self
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("spheres", &self.spheres.len())
            .field("lights", &self.lights.len())
            .field("bounce_limit", &self.bounce_limit)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Scene`].
pub struct SceneBuilder {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
    bounce_limit: u32,
    environment: Arc<dyn Environment>,
}

impl SceneBuilder {
    /// Create an empty builder with the default sky and bounce limit.
    pub fn new() -> Self {
        Self {
            spheres: Vec::new(),
            lights: Vec::new(),
            bounce_limit: DEFAULT_BOUNCE_LIMIT,
            environment: Arc::new(SkyGradient::default()),
        }
    }

    /// Add a sphere.
    pub fn sphere(mut self, sphere: Sphere) -> Self {
        self.spheres.push(sphere);
        self
    }

    /// Add several spheres.
    pub fn spheres(mut self, spheres: impl IntoIterator<Item = Sphere>) -> Self {
        self.spheres.extend(spheres);
        self
    }

    /// Add a point light.
    pub fn light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Add several point lights.
    pub fn lights(mut self, lights: impl IntoIterator<Item = Light>) -> Self {
        self.lights.extend(lights);
        self
    }

    /// Set the reflection bounce limit.
    pub fn bounce_limit(mut self, bounce_limit: u32) -> Self {
        self.bounce_limit = bounce_limit;
        self
    }

    /// Set the environment.
    pub fn environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Arc::new(environment);
        self
    }

    /// Set an environment that is already shared.
    pub fn shared_environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = environment;
        self
    }

    /// Validate and build the scene.
    pub fn build(self) -> SceneResult<Scene> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            let shininess = sphere.material.shininess;
            if !(shininess.is_finite() && shininess >= 0.0) {
                return Err(SceneError::InvalidShininess { index, shininess });
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            let intensity = light.intensity;
            if !intensity.is_finite() || intensity.min_element() < 0.0 {
                return Err(SceneError::InvalidLight { index, intensity });
            }
        }

        Ok(Scene {
            spheres: self.spheres,
            lights: self.lights,
            bounce_limit: self.bounce_limit,
            environment: self.environment,
        })
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
