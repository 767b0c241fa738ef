use crate::errors::Error;

/// The four axes a winning run can lie on, as `(row, column)` steps.
const AXES: [(i64, i64); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A gravity-fill grid of single-character tokens.
///
/// Cells are indexed `[column][row]`, with row 0 at the bottom. A
/// column's occupied cells are always contiguous from row 0 upward;
/// [`Board::play`] is the only mutating operation and preserves this.
///
/// The board knows nothing about turn order or players, only about
/// geometry: where a token lands, whether a placement completes a run
/// of `win_length` identical tokens, and whether any empty cell is left.
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    columns: usize,
    win_length: usize,
    cells: Vec<Vec<Option<char>>>,
}

impl Board {
    /// Creates an empty `rows` x `columns` board.
    ///
    /// All three dimensions must be nonzero.
    pub fn new(rows: usize, columns: usize, win_length: usize) -> Result<Self, Error> {
        if rows == 0 || columns == 0 || win_length == 0 {
            return Err(Error::InvalidDimension {
                rows,
                columns,
                win_length,
            });
        }
        Ok(Self {
            rows,
            columns,
            win_length,
            cells: vec![vec![None; rows]; columns],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Drops `token` into `column`. It lands in the lowest empty row,
    /// whose index is returned.
    pub fn play(&mut self, column: usize, token: char) -> Result<usize, Error> {
        if column >= self.columns {
            return Err(Error::InvalidColumn {
                column,
                columns: self.columns,
            });
        }
        let cells = &mut self.cells[column];
        match cells.iter().position(Option::is_none) {
            Some(row) => {
                cells[row] = Some(token);
                Ok(row)
            }
            None => Err(Error::ColumnFull { column }),
        }
    }

    /// Would a `token` at `(row, column)` complete a run of at least
    /// `win_length` identical tokens on any single axis?
    ///
    /// The queried cell is treated as holding `token` whether or not it
    /// actually does, so the question can be asked hypothetically or
    /// for a token that was just placed. Runs are counted per axis,
    /// extending in both directions from the cell; probing past the
    /// edge of the board simply stops the run.
    pub fn is_winning_move(&self, row: usize, column: usize, token: char) -> bool {
        for (dr, dc) in AXES {
            let run = 1 + self.run_length(row, column, token, dr, dc)
                + self.run_length(row, column, token, -dr, -dc);
            if run >= self.win_length {
                return true;
            }
        }
        false
    }

    /// The number of cells holding `token` walking from `(row, column)`
    /// in direction `(dr, dc)`, exclusive of the starting cell.
    fn run_length(&self, row: usize, column: usize, token: char, dr: i64, dc: i64) -> usize {
        let mut count = 0;
        let mut r = row as i64 + dr;
        let mut c = column as i64 + dc;
        while r >= 0
            && c >= 0
            && (r as usize) < self.rows
            && (c as usize) < self.columns
            && self.cells[c as usize][r as usize] == Some(token)
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|column| column.iter().all(Option::is_some))
    }

    /// The contents of a single cell, `None` meaning empty.
    pub fn cell_at(&self, row: usize, column: usize) -> Result<Option<char>, Error> {
        if column >= self.columns {
            return Err(Error::InvalidColumn {
                column,
                columns: self.columns,
            });
        }
        if row >= self.rows {
            return Err(Error::InvalidRow {
                row,
                rows: self.rows,
            });
        }
        Ok(self.cells[column][row])
    }

    /// One horizontal slice of the board, left to right.
    pub fn row_at(&self, row: usize) -> Result<Vec<Option<char>>, Error> {
        if row >= self.rows {
            return Err(Error::InvalidRow {
                row,
                rows: self.rows,
            });
        }
        Ok(self.cells.iter().map(|column| column[row]).collect())
    }

    /// One column of the board, bottom to top.
    pub fn column_at(&self, column: usize) -> Result<&[Option<char>], Error> {
        if column >= self.columns {
            return Err(Error::InvalidColumn {
                column,
                columns: self.columns,
            });
        }
        Ok(&self.cells[column])
    }

    /// All cells, indexed `[column][row]`.
    pub fn grid(&self) -> &[Vec<Option<char>>] {
        &self.cells
    }
}

/// Renders the grid with the top row first, one cell per column:
///
/// ```text
/// +---+---+
/// |   | o |
/// +---+---+
/// | x | o |
/// +---+---+
/// ```
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let border: String = {
            let mut s = String::from("+");
            for _ in 0..self.columns {
                s.push_str("---+");
            }
            s
        };
        writeln!(f, "{}", border)?;
        for row in (0..self.rows).rev() {
            write!(f, "|")?;
            for column in 0..self.columns {
                write!(f, " {} |", self.cells[column][row].unwrap_or(' '))?;
            }
            writeln!(f)?;
            writeln!(f, "{}", border)?;
        }
        Ok(())
    }
}
