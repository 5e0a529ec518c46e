use std::ops::Range;

use log::{debug, trace};
use rayon::prelude::*;

use crate::config::{FootprintParams, Weighting};
use crate::error::FootprintError;
use crate::grid::Grid;

/// Signed offsets of an axis of size `n` relative to its center cell:
/// `[-ceil(n/2) + 1, floor(n/2) + 1)`. Even sizes get one extra negative
/// offset, e.g. `n = 4` gives `-1..3`.
#[inline]
pub fn axis_range(n: usize) -> Range<isize> {
    let n = n as isize;
    let low = -((n + 1) / 2) + 1;
    let high = n / 2 + 1;
    low..high
}

/// Elliptical footprint on a `gx` x `gy` grid with its center at `[0, 0]`.
///
/// `rx`/`ry` include the center cell. Cells outside the ellipse are 0; cells
/// inside are 1.0, or a Gaussian weight when `weighted` is set.
///
/// The result has shape `(gx, gy)` and is indexed x first: `get(x, y)` and
/// `rows()[x][y]`. A row-major `[y][x]` array of the same mask is its
/// transpose.
pub fn footprint(
    rx: usize,
    ry: usize,
    gx: usize,
    gy: usize,
    weighted: bool,
) -> Result<Grid<f64>, FootprintError> {
    build(&FootprintParams::new(rx, ry, gx, gy, Weighting::from(weighted)))
}

/// Same as [`footprint`], driven by a parameter set.
pub fn build(params: &FootprintParams) -> Result<Grid<f64>, FootprintError> {
    params.validate()?;
    debug!(
        "footprint rx={} ry={} grid={}x{} weighting={:?}",
        params.rx, params.ry, params.gx, params.gy, params.weighting
    );

    let (w, h) = (params.gx, params.gy);
    let xr = axis_range(w);
    let yr = axis_range(h);
    trace!("mesh x {:?}, y {:?}", xr, yr);

    let rxr = (params.rx - 1) as f64;
    let ryr = (params.ry - 1) as f64;
    let sigma = (rxr + ryr) / 2.0;
    let weighting = params.weighting;

    // Geometric center sits at (-xr.start, -yr.start) before the roll.
    let mut grid = Grid::<f64>::new(w, h);
    grid.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(j, row)| {
            let yv = (yr.start + j as isize) as f64;
            for (i, cell) in row.iter_mut().enumerate() {
                let xv = (xr.start + i as isize) as f64;
                let inside = xv * xv / (rxr * rxr) + yv * yv / (ryr * ryr) <= 1.0;
                *cell = if inside {
                    weight(xv, yv, sigma, weighting)
                } else {
                    0.0
                };
            }
        });

    Ok(grid.roll(xr.start, yr.start))
}

#[inline]
fn weight(xv: f64, yv: f64, sigma: f64, weighting: Weighting) -> f64 {
    match weighting {
        Weighting::Uniform => 1.0,
        // Circular falloff on Euclidean distance, not the elliptical one.
        Weighting::Gaussian => (-0.5 * ((xv * xv + yv * yv).sqrt() / sigma).powi(2)).exp(),
    }
}

/// Move a corner-origin footprint so its center sits on grid point `(cx, cy)`.
pub fn centered_at(grid: &Grid<f64>, cx: usize, cy: usize) -> Grid<f64> {
    grid.roll(cx as isize, cy as isize)
}

/// Included cells of a corner-origin footprint as `(dx, dy, weight)`, where
/// `(dx, dy)` is the signed offset from the footprint center. Row-major order
/// over the stored grid.
pub fn offsets(grid: &Grid<f64>) -> Vec<(isize, isize, f64)> {
    let xr = axis_range(grid.w);
    let yr = axis_range(grid.h);
    let mut out = Vec::new();
    for y in 0..grid.h {
        for x in 0..grid.w {
            let v = grid.get(x, y);
            if v == 0.0 {
                continue;
            }
            let (ix, iy) = grid.wrap_xy(x as isize - xr.start, y as isize - yr.start);
            out.push((xr.start + ix as isize, yr.start + iy as isize, v));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn axis_range_matches_centering_rule() {
        assert_eq!(axis_range(4), -1..3);
        assert_eq!(axis_range(5), -2..3);
        assert_eq!(axis_range(1), 0..1);
        for n in 1..20 {
            assert_eq!(axis_range(n).len(), n);
            assert!(axis_range(n).contains(&0));
        }
    }

    #[test]
    fn two_by_two_on_four_by_four() {
        let g = footprint(2, 2, 4, 4, false).unwrap();
        assert_eq!(
            g.rows(),
            vec![
                vec![1.0, 1.0, 0.0, 1.0],
                vec![1.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0, 0.0],
            ]
        );
    }

    #[test]
    fn elongated_ellipse_on_odd_grid() {
        // Semi-axes 2 (x) and 1 (y) on a 7x5 grid.
        let g = footprint(3, 2, 7, 5, false).unwrap();
        assert_eq!(g.shape(), (7, 5));
        let mut cells: Vec<(isize, isize)> =
            offsets(&g).iter().map(|&(dx, dy, _)| (dx, dy)).collect();
        cells.sort();
        assert_eq!(cells, vec![(-2, 0), (-1, 0), (0, -1), (0, 0), (0, 1), (1, 0), (2, 0)]);
    }

    #[test]
    fn rows_are_indexed_x_first() {
        // Semi-axes 2 (x) and 1 (y): the x = 0 column spans y in -1..=1 only,
        // while the y = 0 line spans the full grid width.
        let g = footprint(3, 2, 5, 5, false).unwrap();
        assert_eq!(g.rows()[0], vec![1.0, 1.0, 0.0, 0.0, 1.0]);
        let y0: Vec<f64> = (0..g.w).map(|x| g.get(x, 0)).collect();
        assert_eq!(y0, vec![1.0; 5]);
    }

    #[test]
    fn gaussian_weights_follow_euclidean_distance() {
        let g = footprint(3, 3, 6, 6, true).unwrap();
        assert_relative_eq!(g.get(0, 0), 1.0);
        // sigma = (2 + 2) / 2 = 2
        assert_relative_eq!(g.get(1, 0), (-0.5f64 * 0.25).exp(), epsilon = 1e-12);
        assert_relative_eq!(g.get(1, 1), (-0.5f64 * 0.5).exp(), epsilon = 1e-12);
        assert_relative_eq!(g.get(2, 0), (-0.5f64).exp(), epsilon = 1e-12);
        // (2, 1) lies outside the ellipse: 4/4 + 1/4 > 1.
        assert_eq!(g.get(2, 1), 0.0);
    }

    #[test]
    fn centered_at_moves_the_peak() {
        let g = footprint(2, 2, 5, 5, false).unwrap();
        let c = centered_at(&g, 2, 3);
        assert_eq!(c.get(2, 3), 1.0);
        assert_eq!(c.get(1, 3), 1.0);
        assert_eq!(c.get(2, 4), 1.0);
        assert_eq!(c.get(0, 0), 0.0);
        assert_eq!(c.data.iter().filter(|&&v| v != 0.0).count(), 5);
    }

    #[test]
    fn offsets_invert_the_centering_roll() {
        let g = footprint(2, 2, 4, 4, false).unwrap();
        let mut cells: Vec<(isize, isize)> =
            offsets(&g).iter().map(|&(dx, dy, _)| (dx, dy)).collect();
        cells.sort();
        assert_eq!(cells, vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]);
    }
}
