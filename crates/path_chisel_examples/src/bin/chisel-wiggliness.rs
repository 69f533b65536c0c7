use path_chisel::prelude::*;
use path_chisel_examples::{init_tracing, render_mask_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let size = GridSize::new(24, 24);
    let (from, to) = (Cell::new(2, 2), Cell::new(21, 21));

    // Same endpoints and seed, three different biases towards blocking path cells.
    for (label, wiggliness) in [("straight", 0.05), ("uniform", 1.0), ("wavy", 20.0)] {
        let config = PathConfig::new(size, from, to).with_wiggliness(wiggliness);
        let mut runner = PathChisel::try_new(config)?;
        let mut rng = StdRng::seed_from_u64(42);

        let mut sink = VecSink::only([ChiselEventKind::PathFinished]);
        let path = runner
            .run_with_events(&mut rng, &mut sink)
            .ok_or_else(|| anyhow::anyhow!("open grid must connect {from} and {to}"))?;

        if let Some(ChiselEvent::PathFinished {
            length, repairs, ..
        }) = sink.as_slice().last()
        {
            tracing::info!("{label}: {length} cells after {repairs} repairs");
        }

        render_mask_to_png(
            &path.to_grid(),
            &[from, to],
            &RenderConfig::default(),
            format!("chisel-wiggliness-{label}.png"),
        )?;
    }

    Ok(())
}
