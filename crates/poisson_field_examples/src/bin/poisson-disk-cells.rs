use anyhow::Context;
use glam::Vec2;
use poisson_field::prelude::*;
use poisson_field_examples::{init_tracing, save_rgb_png, CellShader};
use rand::rngs::StdRng;
use rand::SeedableRng;

const IMAGE_SIZE: usize = 800;

/// Usage: `poisson-disk-cells [x y]` with the origin in `[0, 1)`.
fn main() -> anyhow::Result<()> {
    init_tracing();
    let origin = parse_origin()?;

    let mut simulation = Simulation::try_new(SamplerConfig::new(20, 1000))?;
    let mut rng = StdRng::seed_from_u64(7);

    let mut sink = FnSink::new(|event| {
        if let SamplingEvent::RunFinished { outcome } = event {
            tracing::info!(
                accepted = outcome.accepted,
                trials = outcome.trials,
                out_of_domain = outcome.rejected_out_of_domain,
                too_close = outcome.rejected_too_close,
                "sampling finished"
            );
        }
    });
    simulation.run_with_events(origin, &mut rng, &mut sink)?;

    let raster = simulation.field().evaluate(IMAGE_SIZE, IMAGE_SIZE)?;
    let shader = CellShader::new(&raster);
    let colors = render(&raster, &shader);

    save_rgb_png(&colors, IMAGE_SIZE, IMAGE_SIZE, "poisson-disk-cells.png")?;
    Ok(())
}

fn parse_origin() -> anyhow::Result<Vec2> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(Vec2::new(0.5, 0.5)),
        [x, y] => {
            let x: f32 = x.parse().with_context(|| format!("invalid x '{x}'"))?;
            let y: f32 = y.parse().with_context(|| format!("invalid y '{y}'"))?;
            Ok(Vec2::new(x, y))
        }
        _ => anyhow::bail!("usage: poisson-disk-cells [x y]"),
    }
}
