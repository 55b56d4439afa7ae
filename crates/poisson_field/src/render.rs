//! Shading contract for consumers of a [`FieldRaster`].
//!
//! The crate ships no palette. A [`FieldShader`] turns one field cell and its domain
//! position into a linear RGB color; [`render`] applies it to every pixel of a raster.
use glam::Vec2;

use crate::field::{FieldCell, FieldRaster};

/// Maps a field cell and its query position to an RGB color.
///
/// Implementations must be pure: equal inputs give equal colors, independent of the order
/// or thread in which pixels are shaded.
pub trait FieldShader: Sync {
    fn shade(&self, cell: &FieldCell, position: Vec2) -> [f32; 3];
}

impl<F> FieldShader for F
where
    F: Fn(&FieldCell, Vec2) -> [f32; 3] + Sync,
{
    #[inline]
    fn shade(&self, cell: &FieldCell, position: Vec2) -> [f32; 3] {
        self(cell, position)
    }
}

/// Shades every pixel of `raster`, returning colors in row-major order.
pub fn render(raster: &FieldRaster, shader: &dyn FieldShader) -> Vec<[f32; 3]> {
    let width = raster.grid.width;
    let shade = |(i, cell): (usize, &FieldCell)| {
        shader.shade(cell, raster.grid.pixel_to_domain(i % width, i / width))
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        raster.cells.par_iter().enumerate().map(shade).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        raster.cells.iter().enumerate().map(shade).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::SamplerConfig;
    use crate::simulation::Simulation;

    fn inside_outside(cell: &FieldCell, _position: Vec2) -> [f32; 3] {
        if cell.distance < 0.0 {
            [0.0, 0.0, 0.0]
        } else {
            [1.0, 1.0, 1.0]
        }
    }

    #[test]
    fn render_covers_every_pixel_in_order() {
        let mut sim = Simulation::try_new(SamplerConfig::new(10, 200)).unwrap();
        sim.run(Vec2::new(0.5, 0.5), &mut StdRng::seed_from_u64(8))
            .unwrap();
        let raster = sim.field().evaluate(20, 10).unwrap();

        let colors = render(&raster, &inside_outside);
        assert_eq!(colors.len(), 200);
        for ((_, cell), color) in raster.iter().zip(&colors) {
            assert_eq!(*color, inside_outside(cell, Vec2::ZERO));
        }
        assert!(colors.iter().any(|c| c[0] == 0.0));
    }

    #[test]
    fn closures_receive_pixel_positions() {
        let mut sim = Simulation::try_new(SamplerConfig::new(4, 4)).unwrap();
        sim.run(Vec2::new(0.5, 0.5), &mut StdRng::seed_from_u64(2))
            .unwrap();
        let raster = sim.field().evaluate(2, 2).unwrap();

        let colors = render(&raster, &|_: &FieldCell, p: Vec2| [p.x, p.y, 0.0]);
        assert_eq!(colors[1], [0.75, 0.25, 0.0]);
        assert_eq!(colors[2], [0.25, 0.75, 0.0]);
    }
}
