//! Shared helpers for the executable examples: logging setup, a cell shader and PNG output.
use std::path::Path;

use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use poisson_field::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Hermite step that also accepts reversed edges.
fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn hash21(p: Vec2) -> f32 {
    fract(p.dot(Vec2::new(127.619, 157.583)).sin() * 43758.5453)
}

/// Paints each sample as an outlined, tinted disk with a soft drop shadow and
/// contour stripes in the gaps between disks.
pub struct CellShader<'a> {
    raster: &'a FieldRaster,
    /// Edge softness in domain units, roughly two pixels.
    softness: f32,
    shadow_offset: Vec2,
    stripe_period: f32,
    outline: f32,
    inner_outline: f32,
}

impl<'a> CellShader<'a> {
    pub fn new(raster: &'a FieldRaster) -> Self {
        let (_, height) = raster.size();
        let extent = raster.grid.domain_extent;
        let pixel = extent / height as f32;
        Self {
            raster,
            softness: 2.0 * pixel,
            shadow_offset: Vec2::new(0.005, 0.015) * extent,
            stripe_period: extent / 150.0,
            outline: 0.005 * extent,
            inner_outline: 0.008 * extent,
        }
    }

    fn palette(nearest: Vec2) -> Vec3 {
        Vec3::new(
            hash21(nearest + 0.3),
            hash21(nearest),
            hash21(nearest + 0.09),
        )
    }
}

impl FieldShader for CellShader<'_> {
    fn shade(&self, cell: &FieldCell, position: Vec2) -> [f32; 3] {
        let sf = self.softness;
        let d = cell.distance;
        let shadow = self.raster.sample_domain(position + self.shadow_offset);

        let tint = Self::palette(cell.nearest);
        let pale = tint.lerp(Vec3::ONE, 0.9);
        let stripes = (fract(-d / self.stripe_period) - 0.5).abs() * self.stripe_period;
        let (ew, ew2) = (self.outline, self.inner_outline);

        let mut col = Vec3::ONE;
        col = col.lerp(Vec3::ZERO, (1.0 - smoothstep(0.0, 3.0 * sf, stripes)) * 0.25);
        col = col.lerp(Vec3::ZERO, (1.0 - smoothstep(0.0, 2.0 * sf, shadow.distance)) * 0.4);
        col = col.lerp(Vec3::ZERO, 1.0 - smoothstep(sf, 0.0, -d));
        col = col.lerp(pale, 1.0 - smoothstep(sf, 0.0, -d - ew));
        col = col.lerp(Vec3::ZERO, 1.0 - smoothstep(sf, 0.0, -d - ew2 - ew));
        col = col.lerp(tint, 1.0 - smoothstep(sf, 0.0, -d - ew2 - ew * 2.0));

        let col = col.max(Vec3::ZERO);
        [col.x.sqrt(), col.y.sqrt(), col.z.sqrt()]
    }
}

/// Writes row-major colors with the domain's Y axis pointing up.
pub fn save_rgb_png(
    colors: &[[f32; 3]],
    width: usize,
    height: usize,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    anyhow::ensure!(
        colors.len() == width * height,
        "expected {} colors, got {}",
        width * height,
        colors.len()
    );
    let mut img = RgbImage::new(width as u32, height as u32);
    for (i, c) in colors.iter().enumerate() {
        let (x, y) = (i % width, i / width);
        let px = c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
        img.put_pixel(x as u32, (height - 1 - y) as u32, Rgb(px));
    }
    img.save(path.as_ref())?;
    tracing::info!("wrote {}", path.as_ref().display());
    Ok(())
}

/// Draws samples as filled dots on a white background.
pub fn render_points_png(
    points: &[Vec2],
    domain_extent: f32,
    image_size: u32,
    dot_radius: i32,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut img = RgbImage::from_pixel(image_size, image_size, Rgb([255, 255, 255]));
    let scale = image_size as f32 / domain_extent;
    let r2 = dot_radius * dot_radius;

    for p in points {
        let cx = (p.x * scale) as i32;
        let cy = image_size as i32 - 1 - (p.y * scale) as i32;
        for dy in -dot_radius..=dot_radius {
            for dx in -dot_radius..=dot_radius {
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 && x < image_size as i32 && y < image_size as i32 {
                    img.put_pixel(x as u32, y as u32, Rgb([0, 0, 0]));
                }
            }
        }
    }

    img.save(path.as_ref())?;
    tracing::info!("wrote {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_handles_reversed_edges() {
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(1.0, 0.0, 2.0), 0.0);
        assert_eq!(smoothstep(1.0, 0.0, -1.0), 1.0);
    }

    #[test]
    fn hash21_is_in_unit_range() {
        for i in 0..100 {
            let v = hash21(Vec2::new(i as f32 * 0.37, i as f32 * 0.11));
            assert!((0.0..=1.0).contains(&v));
        }
    }

    fn uniform_raster(extent: f32, distance: f32) -> FieldRaster {
        let grid = RasterGrid::try_new(8, 8, extent).unwrap();
        let cell = FieldCell {
            distance,
            nearest: Vec2::new(0.3, 0.6),
            reference_radius: 0.05 * extent,
        };
        FieldRaster {
            cells: vec![cell; grid.len()],
            grid,
            unresolved: 0,
        }
    }

    #[test]
    fn cell_shader_widths_follow_domain_extent() {
        let unit = uniform_raster(1.0, -0.006);
        let doubled = uniform_raster(2.0, -0.012);
        let (a, b) = (CellShader::new(&unit), CellShader::new(&doubled));

        assert!((b.outline - 2.0 * a.outline).abs() < 1e-7);
        assert!((b.inner_outline - 2.0 * a.inner_outline).abs() < 1e-7);
        assert!((b.stripe_period - 2.0 * a.stripe_period).abs() < 1e-7);

        let p = Vec2::new(0.4, 0.45);
        let color_a = a.shade(&unit.cells[0], p);
        let color_b = b.shade(&doubled.cells[0], p * 2.0);
        for (x, y) in color_a.iter().zip(&color_b) {
            assert!((x - y).abs() < 1e-5, "{color_a:?} vs {color_b:?}");
        }
    }
}
