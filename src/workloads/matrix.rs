// Row-major vs column-major traversal of a square grid stored row-major.

pub struct Matrix {
    side: usize,
    cells: Vec<i32>,
}

impl Matrix {
    /// Largest square with at most `n` cells, filled with `a[i][j] = i + j`.
    pub fn for_size(n: usize) -> Self {
        let side = (n as f64).sqrt() as usize;
        let mut cells = Vec::with_capacity(side * side);
        for i in 0..side {
            for j in 0..side {
                cells.push((i + j) as i32);
            }
        }
        Matrix { side, cells }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells, `side * side`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.cells[row * self.side + col]
    }

    pub fn sum_row_major(&self) -> i64 {
        let mut sum = 0i64;
        for i in 0..self.side {
            for j in 0..self.side {
                sum += i64::from(self.get(i, j));
            }
        }
        sum
    }

    pub fn sum_col_major(&self) -> i64 {
        let mut sum = 0i64;
        for j in 0..self.side {
            for i in 0..self.side {
                sum += i64::from(self.get(i, j));
            }
        }
        sum
    }
}
