//! Row-major grids parsed from rectangular text

use anyhow::{anyhow, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn from_cells(width: usize, height: usize, cells: Vec<T>) -> anyhow::Result<Self> {
        if width * height != cells.len() {
            bail!(
                "{} cells cannot fill a {}x{} grid",
                cells.len(),
                width,
                height
            );
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn position_of(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Orthogonal neighbours of `(x, y)` that lie inside the grid
    pub fn neighbours(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let (width, height) = (self.width, self.height);
        [(0isize, -1isize), (-1, 0), (1, 0), (0, 1)]
            .into_iter()
            .filter_map(move |(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                (nx < width && ny < height).then_some((nx, ny))
            })
    }
}

impl Grid<u8> {
    /// Parse lines of decimal digits into a grid of their values
    ///
    /// Every line must have the same width; errors name the 1-based line.
    pub fn parse_digits(input: &str) -> anyhow::Result<Self> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (line_idx, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                continue;
            }
            let row_width = *width.get_or_insert(line.len());
            if line.len() != row_width {
                bail!(
                    "(line {}) expected {} digits, found {}",
                    line_idx + 1,
                    row_width,
                    line.len()
                );
            }
            for c in line.chars() {
                let digit = c
                    .to_digit(10)
                    .ok_or_else(|| anyhow!("(line {}) '{}' is not a digit", line_idx + 1, c))?;
                cells.push(digit as u8);
            }
            height += 1;
        }

        let width = width.ok_or_else(|| anyhow!("grid is empty"))?;
        Self::from_cells(width, height, cells)
    }
}
