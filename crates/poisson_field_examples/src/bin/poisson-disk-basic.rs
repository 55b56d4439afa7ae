use glam::Vec2;
use poisson_field::prelude::*;
use poisson_field_examples::{init_tracing, render_points_png};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SamplerConfig::new(400, 100_000);
    let mut simulation = Simulation::try_new(config)?;
    let mut rng = StdRng::seed_from_u64(42);

    let outcome = simulation.run(Vec2::new(0.5, 0.5), &mut rng)?;
    tracing::info!(
        accepted = outcome.accepted,
        state = ?outcome.state,
        "poisson disk sampling finished"
    );

    render_points_png(
        simulation.positions(),
        simulation.config().domain_extent,
        800,
        1,
        "poisson-disk-basic.png",
    )?;
    Ok(())
}
