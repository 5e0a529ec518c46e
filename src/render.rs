use rayon::prelude::*;

use crate::grid::Grid;

const OUTSIDE: [u8; 4] = [18, 36, 70, 255];
const INSIDE_LOW: [u8; 4] = [70, 130, 62, 255];
const INSIDE_HIGH: [u8; 4] = [245, 248, 250, 255];

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f64) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f64 + (b[0] as f64 - a[0] as f64) * t).round() as u8,
        (a[1] as f64 + (b[1] as f64 - a[1] as f64) * t).round() as u8,
        (a[2] as f64 + (b[2] as f64 - a[2] as f64) * t).round() as u8,
        255,
    ]
}

/// Render a footprint as RGBA, each cell drawn as a `scale` x `scale` block.
/// Image width follows the x axis. Excluded cells are dark; included cells
/// shade from green (low weight) to white (1.0).
pub fn render_footprint(grid: &Grid<f64>, scale: usize) -> Vec<u8> {
    let scale = scale.max(1);
    let pw = grid.w * scale;
    let ph = grid.h * scale;
    let mut rgba = vec![0u8; pw * ph * 4];

    rgba.par_chunks_mut(pw * 4)
        .enumerate()
        .for_each(|(py, row)| {
            let y = py / scale;
            for px in 0..pw {
                let v = grid.get(px / scale, y);
                let color = if v > 0.0 {
                    lerp_color(INSIDE_LOW, INSIDE_HIGH, v)
                } else {
                    OUTSIDE
                };
                row[px * 4..px * 4 + 4].copy_from_slice(&color);
            }
        });

    rgba
}

/// Text table of a footprint, one line per x index.
pub fn format_grid(grid: &Grid<f64>) -> String {
    grid.rows()
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|v| format!("{:.3}", v)).collect();
            format!("[{}]\n", cells.join(", "))
        })
        .collect()
}
