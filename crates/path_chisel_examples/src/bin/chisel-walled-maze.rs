use path_chisel::prelude::*;
use path_chisel_examples::{init_tracing, render_mask_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let size = GridSize::new(30, 20);

    // Vertical walls with one gap each, alternating between bottom and top.
    let walkable = Grid::from_fn(size, |c| {
        if c.x % 6 != 5 {
            return true;
        }
        let gap = if (c.x / 6) % 2 == 0 { size.height - 2 } else { 1 };
        c.y == gap
    });
    let (from, to) = (Cell::new(1, 1), Cell::new(28, 18));

    let config = PathConfig::new(size, from, to)
        .with_wiggliness(4.0)
        .with_walkable(walkable.clone());
    let mut rng = StdRng::seed_from_u64(7);

    let mut forced = 0usize;
    let mut sink = FnSink::new(|event| {
        if let ChiselEvent::CellForced { .. } = event {
            forced += 1;
        }
    });
    let path = random_path_with_events(&config, &mut rng, &mut sink)?
        .ok_or_else(|| anyhow::anyhow!("walls leave no route from {from} to {to}"))?;
    tracing::info!("path of {} cells, {} forced", path.len(), forced);

    let rc = RenderConfig::default();
    render_mask_to_png(&walkable, &[from, to], &rc, "chisel-walled-maze-walkable.png")?;
    render_mask_to_png(&path.to_grid(), &[from, to], &rc, "chisel-walled-maze-path.png")?;

    Ok(())
}
