//! Frame rendering.
//!
//! Calls the tracer once per pixel, in parallel over buckets, and collects the
//! results into an RGBA float framebuffer where alpha is coverage.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use sheen_core::Scene;
use sheen_math::{Interval, Vec4};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::tracer::{trace, TraceResult, MAX_BOUNCES};
use crate::Camera;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a traced pixel to 8-bit RGBA.
///
/// Color channels are gamma corrected and clamped; alpha is the coverage.
pub fn color_to_rgba(pixel: Vec4) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(linear_to_gamma(pixel.x))) as u8;
    let g = (255.0 * Interval::UNIT.clamp(linear_to_gamma(pixel.y))) as u8;
    let b = (255.0 * Interval::UNIT.clamp(linear_to_gamma(pixel.z))) as u8;
    let a = (255.0 * Interval::UNIT.clamp(pixel.w)) as u8;
    [r, g, b, a]
}

/// Trace the primary ray through the center of pixel (x, y).
pub fn render_pixel(camera: &Camera, scene: &Scene, x: u32, y: u32) -> TraceResult {
    trace(scene, &camera.get_ray(x, y))
}

/// Image buffer holding rgb + coverage per pixel.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, pixel: Vec4) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    /// Copy a rendered bucket into the image.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, pixel) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *pixel);
        }
    }

    /// Fraction of pixels whose primary ray hit a surface.
    pub fn coverage(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        self.pixels.iter().map(|p| p.w).sum::<f32>() / self.pixels.len() as f32
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*pixel));
        }
        bytes
    }

    /// Save as an image file; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are traced in parallel on the rayon thread pool; the scene is only
/// read.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    if scene.bounce_limit() > MAX_BOUNCES {
        log::warn!(
            "Bounce limit {} exceeds the maximum of {}, reflections stop at {}",
            scene.bounce_limit(),
            MAX_BOUNCES,
            MAX_BOUNCES
        );
    }

    let start = Instant::now();
    let buckets = generate_buckets(camera.image_width, camera.image_height, config.bucket_size);
    log::info!(
        "Rendering {}x{} in {} buckets",
        camera.image_width,
        camera.image_height,
        buckets.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, camera, scene);
            log::debug!("Bucket {} done ({} pixels)", bucket.index, pixels.len());
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());

    image
}
