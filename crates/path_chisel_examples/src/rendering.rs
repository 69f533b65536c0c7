use std::path::Path;

use image::{Rgb, RgbImage};
use path_chisel::prelude::{Cell, Grid};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Colours and tile geometry used when rasterizing a mask.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Edge length of one cell in pixels. Rounded up to an even number.
    pub tile_size: u32,
    /// Thickness of the outline drawn where floor meets background.
    pub border: u32,
    pub background: [u8; 3],
    pub floor: [u8; 3],
    pub edge: [u8; 3],
    pub marker: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_size: 24,
            border: 3,
            background: [58, 112, 52],
            floor: [214, 196, 160],
            edge: [120, 96, 70],
            marker: [200, 40, 40],
        }
    }
}

impl RenderConfig {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            ..Self::default()
        }
    }

    pub fn with_background(mut self, color: [u8; 3]) -> Self {
        self.background = color;
        self
    }

    pub fn with_floor(mut self, color: [u8; 3]) -> Self {
        self.floor = color;
        self
    }

    pub fn with_marker(mut self, color: [u8; 3]) -> Self {
        self.marker = color;
        self
    }
}

/// Renders `mask` as floor tiles over a background and writes a PNG to `out_path`.
///
/// Each cell is split into four quarters. A quarter looks at its two adjacent sides and the
/// diagonal between them, so outlines hug the region and inner corners get a notch. Cells in
/// `markers` get a square in their centre.
pub fn render_mask_to_png(
    mask: &Grid<bool>,
    markers: &[Cell],
    config: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let tile = config.tile_size.max(2).div_ceil(2) * 2;
    let quarter = tile / 2;
    let border = config.border.min(quarter);

    let mut img = RgbImage::from_pixel(
        mask.width() * tile,
        mask.height() * tile,
        Rgb(config.background),
    );

    let filled = |x: i64, y: i64| -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        mask.is_set(Cell::new(x as u32, y as u32))
    };

    for cell in mask.cells() {
        let (cx, cy) = (i64::from(cell.x), i64::from(cell.y));
        for (qx, qy) in [(0u32, 0u32), (1, 0), (0, 1), (1, 1)] {
            let dx = if qx == 0 { -1 } else { 1 };
            let dy = if qy == 0 { -1 } else { 1 };
            let side = filled(cx + dx, cy);
            let vertical = filled(cx, cy + dy);
            let diagonal = filled(cx + dx, cy + dy);

            for py in 0..quarter {
                for px in 0..quarter {
                    let outer_x = if qx == 0 { px < border } else { px >= quarter - border };
                    let outer_y = if qy == 0 { py < border } else { py >= quarter - border };
                    let on_edge = (!side && outer_x)
                        || (!vertical && outer_y)
                        || (side && vertical && !diagonal && outer_x && outer_y);
                    let color = if on_edge { config.edge } else { config.floor };
                    img.put_pixel(
                        cell.x * tile + qx * quarter + px,
                        cell.y * tile + qy * quarter + py,
                        Rgb(color),
                    );
                }
            }
        }
    }

    let inset = tile / 4;
    for marker in markers {
        if !mask.size().contains(*marker) {
            continue;
        }
        for py in inset..tile - inset {
            for px in inset..tile - inset {
                img.put_pixel(
                    marker.x * tile + px,
                    marker.y * tile + py,
                    Rgb(config.marker),
                );
            }
        }
    }

    let out_path = out_path.as_ref();
    img.save(out_path)?;
    info!(
        "Wrote {} ({} of {} cells set).",
        out_path.display(),
        mask.count(),
        mask.size().cell_count()
    );
    Ok(())
}
