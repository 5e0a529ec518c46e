use serde::Serialize;

/// Row-major flat grid. No per-cell objects.
/// Both axes wrap (toroidal topology).
///
/// `w` is the size of the first (x) axis and `h` the size of the second (y)
/// axis, so a grid built for `(gx, gy)` has `shape() == (gx, gy)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Wrap signed coordinates onto the torus.
    #[inline]
    pub fn wrap_xy(&self, x: isize, y: isize) -> (usize, usize) {
        wrap_xy(x, y, self.w, self.h)
    }

    /// Cyclic shift: the value at `(x, y)` moves to `(x + dx, y + dy)`,
    /// wrapping around both edges.
    pub fn roll(&self, dx: isize, dy: isize) -> Self {
        let mut out = Self::new(self.w, self.h);
        for y in 0..self.h {
            for x in 0..self.w {
                let (nx, ny) = self.wrap_xy(x as isize + dx, y as isize + dy);
                out.set(nx, ny, self.get(x, y));
            }
        }
        out
    }

    /// Nested view indexed `[x][y]`.
    pub fn rows(&self) -> Vec<Vec<T>> {
        (0..self.w)
            .map(|x| (0..self.h).map(|y| self.get(x, y)).collect())
            .collect()
    }
}

/// Wrap both coordinates onto a `w` x `h` torus.
#[inline]
pub fn wrap_xy(x: isize, y: isize, w: usize, h: usize) -> (usize, usize) {
    (
        x.rem_euclid(w as isize) as usize,
        y.rem_euclid(h as isize) as usize,
    )
}
