use super::Kernel;

/// Convolves a height grid with a kernel.
///
/// The grid is row-major with `width` cells per row (x) and `length` rows
/// (z). Cells holding `None` have no surface: they stay `None` and are left
/// out of their neighbors' averages. Near the grid edge only the in-bounds
/// neighbors are used and their weights are renormalized to sum to 1.
#[derive(Debug, Clone)]
pub struct HeightMapFilter {
    kernel: Kernel,
}

impl HeightMapFilter {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    fn for_each_neighbor<F>(
        &self,
        heights: &[Option<i32>],
        width: usize,
        length: usize,
        x: usize,
        z: usize,
        mut f: F,
    ) where
        F: FnMut(usize, i32, f64),
    {
        let r = self.kernel.radius() as i64;
        let (x, z) = (x as i64, z as i64);
        for dz in -r..=r {
            let nz = z + dz;
            if nz < 0 || nz >= length as i64 {
                continue;
            }
            for dx in -r..=r {
                let nx = x + dx;
                if nx < 0 || nx >= width as i64 {
                    continue;
                }
                let index = nz as usize * width + nx as usize;
                if let Some(height) = heights[index] {
                    f(index, height, self.kernel.weight(dx as i32, dz as i32));
                }
            }
        }
    }

    /// The renormalized weights actually applied to cell (x, z), keyed by
    /// grid index. Empty for a cell without a surface.
    pub fn column_weights(
        &self,
        heights: &[Option<i32>],
        width: usize,
        length: usize,
        x: usize,
        z: usize,
    ) -> Vec<(usize, f64)> {
        let center = z * width + x;
        if heights[center].is_none() {
            return Vec::new();
        }
        let mut weights = Vec::new();
        self.for_each_neighbor(heights, width, length, x, z, |index, _, weight| {
            if weight > 0.0 {
                weights.push((index, weight));
            }
        });
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            // No usable neighbor: the cell keeps its own height.
            return vec![(center, 1.0)];
        }
        for (_, w) in &mut weights {
            *w /= total;
        }
        weights
    }

    fn filter_cell(
        &self,
        heights: &[Option<i32>],
        width: usize,
        length: usize,
        x: usize,
        z: usize,
    ) -> Option<i32> {
        let own = heights[z * width + x]?;
        let mut acc = 0.0;
        let mut total = 0.0;
        self.for_each_neighbor(heights, width, length, x, z, |_, height, weight| {
            acc += weight * height as f64;
            total += weight;
        });
        if total <= 0.0 {
            return Some(own);
        }
        Some((acc / total + 0.5).floor() as i32)
    }

    /// One filter pass. Results are rounded to the nearest whole block.
    pub fn filter(&self, heights: &[Option<i32>], width: usize, length: usize) -> Vec<Option<i32>> {
        if width == 0 || length == 0 {
            return Vec::new();
        }
        debug_assert_eq!(heights.len(), width * length);
        let mut output = vec![None; width * length];

        #[cfg(target_arch = "wasm32")]
        {
            for (z, row) in output.chunks_mut(width).enumerate() {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = self.filter_cell(heights, width, length, x, z);
                }
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            use rayon::prelude::*;
            // Each chunk of `width` cells is one row along x, so rows can be
            // filled independently.
            output
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(z, row)| {
                    for (x, cell) in row.iter_mut().enumerate() {
                        *cell = self.filter_cell(heights, width, length, x, z);
                    }
                });
        }

        output
    }
}
