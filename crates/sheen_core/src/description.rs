//! JSON scene descriptions.
//!
//! A description is plain data; [`SceneDescription::into_scene`] resolves
//! texture paths, loads the environment and validates the result.
//!
//! ```json
//! {
//!   "spheres": [
//!     { "center": [0, 0, -3], "radius": 1,
//!       "material": { "diffuse": [0.8, 0.2, 0.2], "specular": [0.3, 0.3, 0.3], "shininess": 64 } }
//!   ],
//!   "lights": [ { "position": [5, 5, 0], "intensity": [1, 1, 1] } ],
//!   "bounce_limit": 3,
//!   "environment": { "type": "gradient", "horizon": [1, 1, 1], "zenith": [0.5, 0.7, 1] }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::environment::{CubeMap, Environment, SkyGradient, SolidColor, CUBE_FACE_COUNT};
use crate::scene::{Color, Light, Scene, SceneResult, Sphere, DEFAULT_BOUNCE_LIMIT};
use crate::texture::load_texture;

/// Serializable scene contents.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub spheres: Vec<Sphere>,

    #[serde(default)]
    pub lights: Vec<Light>,

    #[serde(default = "default_bounce_limit")]
    pub bounce_limit: u32,

    #[serde(default)]
    pub environment: EnvironmentDescription,
}

fn default_bounce_limit() -> u32 {
    DEFAULT_BOUNCE_LIMIT
}

/// Serializable environment choice.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnvironmentDescription {
    Solid {
        color: Color,
    },
    Gradient {
        horizon: Color,
        zenith: Color,
    },
    CubeMap {
        /// Face images in +X, -X, +Y, -Y, +Z, -Z order
        faces: [PathBuf; CUBE_FACE_COUNT],
        #[serde(default)]
        z_up: bool,
    },
}

impl Default for EnvironmentDescription {
    fn default() -> Self {
        let sky = SkyGradient::default();
        Self::Gradient {
            horizon: sky.horizon,
            zenith: sky.zenith,
        }
    }
}

impl EnvironmentDescription {
    /// Build the environment, resolving relative paths against `base_dir`.
    pub fn load(&self, base_dir: Option<&Path>) -> SceneResult<Arc<dyn Environment>> {
        let environment: Arc<dyn Environment> = match self {
            Self::Solid { color } => Arc::new(SolidColor(*color)),
            Self::Gradient { horizon, zenith } => Arc::new(SkyGradient::new(*horizon, *zenith)),
            Self::CubeMap { faces, z_up } => {
                let load = |face: &PathBuf| load_texture(&resolve_path(base_dir, face));
                let [px, nx, py, ny, pz, nz] = faces;
                let textures = [load(px)?, load(nx)?, load(py)?, load(ny)?, load(pz)?, load(nz)?];
                Arc::new(CubeMap::new(textures)?.with_z_up(*z_up))
            }
        };
        Ok(environment)
    }
}

impl SceneDescription {
    /// Convert into a validated [`Scene`].
    pub fn into_scene(self, base_dir: Option<&Path>) -> SceneResult<Scene> {
        let environment = self.environment.load(base_dir)?;
        Scene::builder()
            .spheres(self.spheres)
            .lights(self.lights)
            .bounce_limit(self.bounce_limit)
            .shared_environment(environment)
            .build()
    }
}

/// Load a scene from a JSON file.
///
/// Relative texture paths are resolved against the file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&json, path.parent())?;

    log::info!(
        "Loaded scene {}: {} spheres, {} lights, bounce limit {}",
        path.display(),
        scene.spheres().len(),
        scene.lights().len(),
        scene.bounce_limit()
    );

    Ok(scene)
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(json: &str, base_dir: Option<&Path>) -> SceneResult<Scene> {
    let description: SceneDescription = serde_json::from_str(json)?;
    description.into_scene(base_dir)
}

/// Resolve a path relative to the base directory.
fn resolve_path(base_dir: Option<&Path>, path: &Path) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Material, SceneError};
    use sheen_math::Vec3;

    const TWO_SPHERES: &str = r#"{
        "spheres": [
            { "center": [0, 0, -3], "radius": 1,
              "material": { "diffuse": [0.8, 0.2, 0.2], "specular": [0.3, 0.3, 0.3], "shininess": 64 } },
            { "center": [0, -101, -3], "radius": 100 }
        ],
        "lights": [ { "position": [5, 5, 0], "intensity": [1, 1, 1] } ],
        "bounce_limit": 3,
        "environment": { "type": "solid", "color": [0.1, 0.2, 0.3] }
    }"#;

    #[test]
    fn test_load_from_str() {
        let scene = load_scene_from_str(TWO_SPHERES, None).unwrap();

        assert_eq!(scene.spheres().len(), 2);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.bounce_limit(), 3);

        let first = scene.spheres()[0];
        assert_eq!(first.center, Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(first.material.shininess, 64.0);
        assert_eq!(first.material.specular, Vec3::splat(0.3));

        // Missing material falls back to the default grey
        assert_eq!(scene.spheres()[1].material, Material::default());

        assert_eq!(scene.environment_color(Vec3::Y), Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_defaults() {
        let scene = load_scene_from_str("{}", None).unwrap();
        assert_eq!(scene.bounce_limit(), DEFAULT_BOUNCE_LIMIT);
        assert!(scene.spheres().is_empty());

        let sky = SkyGradient::default();
        assert!((scene.environment_color(Vec3::Y) - sky.zenith).length() < 1e-6);
    }

    #[test]
    fn test_partial_material() {
        let json = r#"{
            "spheres": [ { "center": [0, 0, 0], "radius": 1, "material": { "specular": [1, 1, 1] } } ]
        }"#;
        let scene = load_scene_from_str(json, None).unwrap();
        let material = scene.spheres()[0].material;
        assert_eq!(material.specular, Vec3::ONE);
        assert_eq!(material.diffuse, Material::default().diffuse);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{ "spheres": [], "cameras": [] }"#;
        assert!(matches!(
            load_scene_from_str(json, None),
            Err(SceneError::Json(_))
        ));

        let json = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 1, "color": [1, 0, 0] } ] }"#;
        assert!(matches!(
            load_scene_from_str(json, None),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_sphere_rejected() {
        let json = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": -1 } ] }"#;
        assert!(matches!(
            load_scene_from_str(json, None),
            Err(SceneError::InvalidRadius { index: 0, .. })
        ));
    }

    #[test]
    fn test_description_round_trip() {
        let description: SceneDescription = serde_json::from_str(TWO_SPHERES).unwrap();
        let json = serde_json::to_string(&description).unwrap();
        let reparsed: SceneDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(description, reparsed);
    }

    #[test]
    fn test_cube_map_description() {
        let json = r#"{
            "type": "cube_map",
            "faces": ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"],
            "z_up": true
        }"#;
        let env: EnvironmentDescription = serde_json::from_str(json).unwrap();
        match env {
            EnvironmentDescription::CubeMap { faces, z_up } => {
                assert!(z_up);
                assert_eq!(faces[4], PathBuf::from("pz.png"));
            }
            other => panic!("expected cube map, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_cube_map_face() {
        let json = r#"{
            "environment": {
                "type": "cube_map",
                "faces": ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"]
            }
        }"#;
        let result = load_scene_from_str(json, Some(Path::new("no/such/dir")));
        assert!(matches!(result, Err(SceneError::Texture(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_scene("no/such/scene.json"),
            Err(SceneError::Io(_))
        ));
    }

    #[test]
    fn test_load_bundled_scene() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenes/mirrors.json");
        let scene = load_scene(path).unwrap();
        assert_eq!(scene.spheres().len(), 4);
        assert_eq!(scene.lights().len(), 2);
        assert_eq!(scene.bounce_limit(), 5);
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("scenes");
        assert_eq!(
            resolve_path(Some(base), Path::new("sky/px.png")),
            PathBuf::from("scenes/sky/px.png")
        );
        assert_eq!(
            resolve_path(None, Path::new("sky/px.png")),
            PathBuf::from("sky/px.png")
        );
    }
}
