use path_chisel::prelude::*;
use path_chisel_examples::{init_tracing, render_mask_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let size = GridSize::new(20, 20);

    // A ring-shaped cave: everything outside a small central pillar.
    let walkable = Grid::from_fn(size, |c| {
        let (dx, dy) = (c.x.abs_diff(10), c.y.abs_diff(10));
        dx > 2 || dy > 2
    });

    for target in [40, 120, 240] {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut sink = VecSink::only([ChiselEventKind::CellCarved]);
        let config = CarveConfig::target_size(walkable.clone(), target);
        let region = carve_with_events(&config, &mut rng, &mut sink)?;
        tracing::info!(
            "target {target}: kept {} cells, carved {}",
            region.count(),
            sink.len()
        );

        render_mask_to_png(
            &region,
            &[],
            &RenderConfig::new(20).with_floor([180, 200, 220]),
            format!("carve-target-size-{target}.png"),
        )?;
    }

    Ok(())
}
