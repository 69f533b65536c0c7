use path_chisel::prelude::*;
use path_chisel_examples::{init_tracing, render_mask_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let size = GridSize::new(20, 20);
    let walkable = Grid::filled(size, true);
    let exits = [
        Cell::new(3, 3),
        Cell::new(16, 16),
        Cell::new(16, 3),
        Cell::new(3, 16),
    ];

    // Two exits, then all four, carved from the same open room.
    for count in [2, 4] {
        let config = CarveConfig::minimal_path(walkable.clone(), exits[..count].iter().copied());
        let mut carver = RegionCarver::try_new(config)?;
        let mut rng = StdRng::seed_from_u64(42);
        let region = carver.run(&mut rng)?;
        tracing::info!("{count} exits joined by {} cells", region.count());

        render_mask_to_png(
            &region,
            &exits[..count],
            &RenderConfig::default().with_marker([230, 200, 40]),
            format!("carve-minimal-path-{count}.png"),
        )?;
    }

    Ok(())
}
