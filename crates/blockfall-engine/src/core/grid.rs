use std::fmt;

use crate::OutOfRangeError;

use super::{active_piece::ActivePiece, piece::PieceKind};

/// Number of columns in the playfield.
pub const COLUMNS: usize = 10;
/// Number of rows shown to the player.
pub const VISIBLE_ROWS: usize = 20;
/// Rows above the visible playfield where pieces spawn.
pub const HIDDEN_ROWS: usize = 2;
/// Total rows stored by the grid (hidden buffer plus visible playfield).
pub const TOTAL_ROWS: usize = HIDDEN_ROWS + VISIBLE_ROWS;

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Locked cell of a specific piece kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns the character used in text renderings of the grid.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Piece(kind) => kind.as_char(),
        }
    }
}

/// A single row of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRow {
    cells: [Cell; COLUMNS],
}

impl GridRow {
    const EMPTY: Self = GridRow {
        cells: [Cell::Empty; COLUMNS],
    };

    #[must_use]
    pub fn cells(&self) -> &[Cell; COLUMNS] {
        &self.cells
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }
}

/// Fixed-size matrix of settled cells.
///
/// Row `0` is the top of the hidden spawn buffer; visible rows start at
/// [`HIDDEN_ROWS`]. Coordinates are signed so callers can ask about positions
/// an unvalidated piece has moved to.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, PieceKind, COLUMNS, TOTAL_ROWS};
///
/// let mut grid = Grid::new();
/// let bottom = i32::try_from(TOTAL_ROWS).unwrap() - 1;
/// for column in 0..i32::try_from(COLUMNS).unwrap() {
///     grid.place(bottom, column, PieceKind::I).unwrap();
/// }
/// assert_eq!(grid.clear_full_rows(), 1);
/// assert!(grid.is_empty(bottom, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [GridRow; TOTAL_ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub const COLUMNS: usize = COLUMNS;
    pub const VISIBLE_ROWS: usize = VISIBLE_ROWS;
    pub const TOTAL_ROWS: usize = TOTAL_ROWS;

    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [GridRow::EMPTY; TOTAL_ROWS],
        }
    }

    fn index(row: i32, column: i32) -> Option<(usize, usize)> {
        let r = usize::try_from(row).ok().filter(|r| *r < TOTAL_ROWS)?;
        let c = usize::try_from(column).ok().filter(|c| *c < COLUMNS)?;
        Some((r, c))
    }

    /// Returns `true` if the position lies within the grid, hidden rows included.
    #[must_use]
    pub fn is_inside(&self, row: i32, column: i32) -> bool {
        Self::index(row, column).is_some()
    }

    /// Returns `true` if the position lies within the grid and holds no piece.
    #[must_use]
    pub fn is_empty(&self, row: i32, column: i32) -> bool {
        self.cell(row, column).is_ok_and(Cell::is_empty)
    }

    pub fn cell(&self, row: i32, column: i32) -> Result<Cell, OutOfRangeError> {
        let (r, c) = Self::index(row, column).ok_or(OutOfRangeError { row, column })?;
        Ok(self.rows[r].cells[c])
    }

    /// Writes a piece kind into a single cell.
    pub fn place(&mut self, row: i32, column: i32, kind: PieceKind) -> Result<(), OutOfRangeError> {
        let (r, c) = Self::index(row, column).ok_or(OutOfRangeError { row, column })?;
        self.rows[r].cells[c] = Cell::Piece(kind);
        Ok(())
    }

    /// Returns `true` if any cell of the piece is outside the grid or occupied.
    #[must_use]
    pub fn is_colliding(&self, piece: &ActivePiece) -> bool {
        piece
            .cell_positions()
            .any(|p| !self.is_empty(p.row, p.column))
    }

    /// Fills the piece's cells on the grid with the piece's kind.
    ///
    /// This is called when a piece is locked into position. Every cell of the
    /// piece must lie inside the grid.
    pub fn fill_piece(&mut self, piece: &ActivePiece) {
        for position in piece.cell_positions() {
            let (r, c) = Self::index(position.row, position.column)
                .expect("locked piece must lie inside the grid");
            self.rows[r].cells[c] = Cell::Piece(piece.kind());
        }
    }

    /// Clears filled rows and returns the number of rows cleared.
    ///
    /// Remaining rows keep their order and move toward the bottom; the same
    /// number of empty rows is inserted at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..TOTAL_ROWS).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(GridRow::EMPTY);
        count
    }

    /// Sets every cell to [`Cell::Empty`].
    pub fn reset(&mut self) {
        self.rows.fill(GridRow::EMPTY);
    }

    /// Returns all rows, hidden buffer first.
    #[must_use]
    pub fn rows(&self) -> &[GridRow; TOTAL_ROWS] {
        &self.rows
    }

    /// Returns an iterator over the rows shown to the player.
    pub fn visible_rows(&self) -> impl Iterator<Item = &GridRow> {
        self.rows[HIDDEN_ROWS..].iter()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row.cells {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    const WIDTH: i32 = COLUMNS as i32;
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    const BOTTOM: i32 = TOTAL_ROWS as i32 - 1;

    fn fill_row(grid: &mut Grid, row: i32, kind: PieceKind) {
        for column in 0..WIDTH {
            grid.place(row, column, kind).unwrap();
        }
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        for row in 0..=BOTTOM {
            for column in 0..WIDTH {
                assert!(grid.is_empty(row, column));
            }
        }
        assert_eq!(grid.visible_rows().count(), VISIBLE_ROWS);
    }

    #[test]
    fn test_is_inside_bounds() {
        let grid = Grid::new();
        assert!(grid.is_inside(0, 0));
        assert!(grid.is_inside(BOTTOM, WIDTH - 1));
        assert!(!grid.is_inside(-1, 0));
        assert!(!grid.is_inside(0, -1));
        assert!(!grid.is_inside(BOTTOM + 1, 0));
        assert!(!grid.is_inside(0, WIDTH));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::new();
        assert!(!grid.is_empty(0, WIDTH));
        assert_eq!(
            grid.cell(-1, 3).unwrap_err(),
            OutOfRangeError { row: -1, column: 3 }
        );
        assert!(grid.place(BOTTOM + 1, 0, PieceKind::T).is_err());
    }

    #[test]
    fn test_place_and_read_cell() {
        let mut grid = Grid::new();
        grid.place(5, 7, PieceKind::S).unwrap();
        assert_eq!(grid.cell(5, 7).unwrap(), Cell::Piece(PieceKind::S));
        assert!(!grid.is_empty(5, 7));
    }

    #[test]
    fn test_fill_piece_writes_kind() {
        let mut grid = Grid::new();
        let piece = ActivePiece::new(PieceKind::T);
        grid.fill_piece(&piece);
        for p in piece.cell_positions() {
            assert_eq!(grid.cell(p.row, p.column).unwrap(), Cell::Piece(PieceKind::T));
        }
    }

    #[test]
    fn test_clear_full_rows_bottom_row() {
        let mut grid = Grid::new();
        fill_row(&mut grid, BOTTOM, PieceKind::I);
        grid.place(BOTTOM - 1, 2, PieceKind::O).unwrap();

        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(grid.cell(BOTTOM, 2).unwrap(), Cell::Piece(PieceKind::O));
        assert!(grid.is_empty(BOTTOM - 1, 2));
    }

    #[test]
    fn test_clear_full_rows_with_partial_rows() {
        let mut grid = Grid::new();
        for column in 0..WIDTH - 1 {
            grid.place(BOTTOM, column, PieceKind::J).unwrap();
        }
        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(
            grid.rows()[TOTAL_ROWS - 1]
                .cells()
                .iter()
                .filter(|c| !c.is_empty())
                .count(),
            COLUMNS - 1
        );
    }

    #[test]
    fn test_clear_full_rows_preserves_order_of_remaining_rows() {
        let mut grid = Grid::new();
        // Interleave full rows with marker rows.
        grid.place(BOTTOM - 4, 0, PieceKind::L).unwrap();
        fill_row(&mut grid, BOTTOM - 3, PieceKind::I);
        grid.place(BOTTOM - 2, 1, PieceKind::J).unwrap();
        fill_row(&mut grid, BOTTOM - 1, PieceKind::I);
        grid.place(BOTTOM, 2, PieceKind::S).unwrap();

        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(grid.rows().len(), TOTAL_ROWS);
        assert_eq!(grid.cell(BOTTOM, 2).unwrap(), Cell::Piece(PieceKind::S));
        assert_eq!(grid.cell(BOTTOM - 1, 1).unwrap(), Cell::Piece(PieceKind::J));
        assert_eq!(grid.cell(BOTTOM - 2, 0).unwrap(), Cell::Piece(PieceKind::L));
        for row in &grid.rows()[..TOTAL_ROWS - 3] {
            assert!(row.cells().iter().all(|c| c.is_empty()));
        }
    }

    #[test]
    fn test_clear_full_rows_is_idempotent() {
        let mut grid = Grid::new();
        for row in BOTTOM - 3..=BOTTOM {
            fill_row(&mut grid, row, PieceKind::I);
        }
        grid.place(BOTTOM - 4, 4, PieceKind::T).unwrap();

        assert_eq!(grid.clear_full_rows(), 4);
        let compacted = grid.clone();
        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid, compacted);
    }

    #[test]
    fn test_reset_empties_grid() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 3, PieceKind::Z);
        grid.reset();
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_display_renders_piece_letters() {
        let mut grid = Grid::new();
        grid.place(BOTTOM, 0, PieceKind::T).unwrap();
        let text = grid.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), TOTAL_ROWS);
        assert_eq!(lines[0], "..........");
        assert_eq!(lines[TOTAL_ROWS - 1], "T.........");
    }
}
