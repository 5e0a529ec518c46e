use std::path::PathBuf;

use log::{error, info};

use footprint::config::{FootprintParams, Weighting};
use footprint::logging::{DEFAULT_LEVEL, setup_logging};
use footprint::render;

/// Pixels per cell in the saved PNG.
const PNG_SCALE: usize = 16;

fn main() {
    let _logger = setup_logging(DEFAULT_LEVEL);
    let args: Vec<String> = std::env::args().collect();

    let defaults = FootprintParams::default();
    let arg = |i: usize, d: usize| args.get(i).and_then(|s| s.parse().ok()).unwrap_or(d);
    let rx = arg(1, defaults.rx);
    let ry = arg(2, defaults.ry);
    let gx = arg(3, defaults.gx);
    let gy = arg(4, defaults.gy);
    let weighted = arg(5, 0) != 0;
    let out_dir: PathBuf = args
        .get(6)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    let params = FootprintParams::new(rx, ry, gx, gy, Weighting::from(weighted));
    info!(
        "Building {}x{} footprint with rx={}, ry={}, weighting={:?}",
        gx, gy, rx, ry, params.weighting
    );

    let grid = match footprint::build(&params) {
        Ok(g) => g,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    eprint!("{}", render::format_grid(&grid));
    match serde_json::to_string(&grid.rows()) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("failed to serialize grid: {}", e),
    }

    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        error!("failed to create {}: {}", out_dir.display(), e);
        std::process::exit(1);
    }
    let path = out_dir.join("footprint.png");
    let rgba = render::render_footprint(&grid, PNG_SCALE);
    let (w, h) = (grid.w * PNG_SCALE, grid.h * PNG_SCALE);
    match image::save_buffer(&path, &rgba, w as u32, h as u32, image::ColorType::Rgba8) {
        Ok(()) => info!("Saved {}", path.display()),
        Err(e) => {
            error!("failed to save {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
