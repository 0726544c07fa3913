use super::Viewport;

/// Equal-ish tiling of a surface into `cols` x `rows` viewports.
///
/// Cell boundaries sit at `floor(i * width / cols)` and
/// `floor(j * height / rows)`, so neighbouring cells share an edge and the
/// cells cover the surface exactly. When the size is not divisible the extra
/// pixels are spread across the cells instead of being left unpainted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cols: u32,
    rows: u32,
}

impl Grid {
    /// `cols` and `rows` are raised to at least 1.
    pub fn new(width: u32, height: u32, cols: u32, rows: u32) -> Self {
        Self {
            width,
            height,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Viewport for column `col` (from the left) and row `row` (from the top).
    ///
    /// Out-of-range indices are clamped to the last column/row.
    pub fn cell(&self, col: u32, row: u32) -> Viewport {
        let col = col.min(self.cols - 1);
        let row = row.min(self.rows - 1);

        let x0 = split(self.width, col, self.cols);
        let x1 = split(self.width, col + 1, self.cols);

        // Rows count from the top; GL viewports count from the bottom.
        let top = split(self.height, row, self.rows);
        let bottom = split(self.height, row + 1, self.rows);
        let y0 = self.height - bottom;

        Viewport::new(
            x0 as i32,
            y0 as i32,
            (x1 - x0) as i32,
            (bottom - top) as i32,
        )
    }
}

fn split(extent: u32, index: u32, parts: u32) -> u32 {
    (u64::from(extent) * u64::from(index) / u64::from(parts)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All cells in row-major order starting at the top-left.
    fn cells(grid: &Grid) -> Vec<Viewport> {
        (0..grid.rows)
            .flat_map(|row| (0..grid.cols).map(move |col| grid.cell(col, row)))
            .collect()
    }

    fn contains(v: &Viewport, x: i32, y: i32) -> bool {
        x >= v.x && y >= v.y && x < v.x + v.width && y < v.y + v.height
    }

    fn assert_partitions(grid: Grid, width: u32, height: u32) {
        let cells = cells(&grid);
        let area: i64 = cells
            .iter()
            .map(|c| i64::from(c.width) * i64::from(c.height))
            .sum();
        assert_eq!(area, i64::from(width) * i64::from(height));

        // Every sampled pixel lands in exactly one cell.
        for y in (0..height as i32).step_by(7) {
            for x in (0..width as i32).step_by(7) {
                let hits = cells.iter().filter(|c| contains(c, x, y)).count();
                assert_eq!(hits, 1, "pixel ({x}, {y})");
            }
        }
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn four_by_two_on_1080p() {
        let g = Grid::new(1920, 1080, 4, 2);
        assert_eq!(g.cell(0, 0), Viewport::new(0, 540, 480, 540));
        assert_eq!(g.cell(0, 1), Viewport::new(0, 0, 480, 540));
        assert_eq!(g.cell(3, 0), Viewport::new(1440, 540, 480, 540));
    }

    #[test]
    fn four_by_three_on_1080p() {
        let g = Grid::new(1920, 1080, 4, 3);
        assert_eq!(g.cell(1, 0), Viewport::new(480, 720, 480, 360));
        assert_eq!(g.cell(2, 1), Viewport::new(960, 360, 480, 360));
        assert_eq!(g.cell(3, 2), Viewport::new(1440, 0, 480, 360));
    }

    #[test]
    fn out_of_range_is_clamped() {
        let g = Grid::new(100, 100, 2, 2);
        assert_eq!(g.cell(9, 9), g.cell(1, 1));
    }

    #[test]
    fn zero_divisions_become_one() {
        let g = Grid::new(64, 32, 0, 0);
        assert_eq!(cells(&g).len(), 1);
        assert_eq!(g.cell(0, 0), Viewport::full(64, 32));
    }

    // ── partition ─────────────────────────────────────────────────────────

    #[test]
    fn divisible_sizes_partition_exactly() {
        assert_partitions(Grid::new(1920, 1080, 4, 2), 1920, 1080);
        assert_partitions(Grid::new(1920, 1080, 2, 2), 1920, 1080);
    }

    #[test]
    fn indivisible_sizes_partition_exactly() {
        assert_partitions(Grid::new(1001, 667, 4, 3), 1001, 667);
        assert_partitions(Grid::new(13, 7, 4, 3), 13, 7);
    }

    #[test]
    fn neighbours_share_edges() {
        let g = Grid::new(1003, 701, 4, 3);
        for row in 0..3 {
            for col in 0..3 {
                let a = g.cell(col, row);
                let b = g.cell(col + 1, row);
                assert_eq!(a.x + a.width, b.x);
            }
        }
        for col in 0..4 {
            for row in 0..2 {
                let upper = g.cell(col, row);
                let lower = g.cell(col, row + 1);
                assert_eq!(lower.y + lower.height, upper.y);
            }
        }
    }
}
