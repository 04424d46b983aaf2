//! Blinn-Phong direct lighting with hard shadows.

use sheen_core::{Color, Material, Scene};
use sheen_math::{Ray, Vec3};

use crate::intersect::intersect;
use crate::tracer::EPSILON;

/// Shade a surface point lit by every point light in the scene.
///
/// `view` is the unit vector from the surface toward the viewer. Each light
/// casts a shadow ray from just above the surface; an occluded light adds
/// nothing (there is no ambient term). The sum is not clamped.
pub fn shade(material: &Material, position: Vec3, normal: Vec3, view: Vec3, scene: &Scene) -> Color {
    shade_with_stats(material, position, normal, view, scene).0
}

/// Like [`shade`], also returning the number of shadow rays cast.
pub(crate) fn shade_with_stats(
    material: &Material,
    position: Vec3,
    normal: Vec3,
    view: Vec3,
    scene: &Scene,
) -> (Color, u32) {
    let mut color = Color::ZERO;
    let mut shadow_rays = 0;

    for light in scene.lights() {
        let to_light = light.position - position;
        let dist = to_light.length();
        let Some(l) = to_light.try_normalize() else {
            // Light sits on the surface point
            continue;
        };

        let shadow_ray = Ray::offset_from(position, normal, EPSILON, l);
        shadow_rays += 1;
        if intersect(scene, &shadow_ray).is_some_and(|hit| hit.t < dist) {
            continue;
        }

        let diffuse = material.diffuse * light.intensity * normal.dot(l).max(0.0);

        let specular = match (l + view).try_normalize() {
            Some(h) => {
                material.specular * light.intensity * normal.dot(h).max(0.0).powf(material.shininess)
            }
            None => Color::ZERO,
        };

        color += diffuse + specular;
    }

    (color, shadow_rays)
}
