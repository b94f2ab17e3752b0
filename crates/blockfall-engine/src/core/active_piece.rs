use super::piece::{PieceKind, PieceRotation, Position};

/// The falling, player-controlled piece.
///
/// Movement and rotation are applied unconditionally; legality is checked
/// afterwards by the engine, which reverts illegal changes with the inverse
/// translation or [`ActivePiece::undo_rotation`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, PieceKind, Position};
///
/// let mut piece = ActivePiece::new(PieceKind::T);
/// piece.move_by(1, -1);
/// assert_eq!(piece.position(), Position::new(1, 2));
///
/// let before: Vec<_> = piece.cell_positions().collect();
/// piece.rotate();
/// piece.undo_rotation();
/// assert_eq!(piece.cell_positions().collect::<Vec<_>>(), before);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    rotation: PieceRotation,
    position: Position,
    previous_rotation: Option<PieceRotation>,
}

impl ActivePiece {
    /// Creates a piece of the given kind at its spawn position and orientation.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: PieceRotation::SPAWN,
            position: kind.spawn_position(),
            previous_rotation: None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Translates the piece without any validation.
    pub const fn move_by(&mut self, d_row: i32, d_column: i32) {
        self.position = self.position.translated(d_row, d_column);
    }

    /// Advances to the next rotation state, remembering the current one for
    /// [`Self::undo_rotation`].
    pub fn rotate(&mut self) {
        self.previous_rotation = Some(self.rotation);
        self.rotation = self.rotation.rotated_right(self.kind);
    }

    /// Restores the rotation recorded by the last [`Self::rotate`].
    ///
    /// Does nothing if there is no rotation to undo.
    pub fn undo_rotation(&mut self) {
        if let Some(rotation) = self.previous_rotation.take() {
            self.rotation = rotation;
        }
    }

    /// Returns the 4 absolute grid positions the piece occupies.
    pub fn cell_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let Position { row, column } = self.position;
        self.kind
            .cell_offsets(self.rotation)
            .map(move |offset| offset.translated(row, column))
    }

    /// Puts the piece back at its spawn position and orientation.
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_is_at_spawn() {
        for kind in PieceKind::ALL {
            let piece = ActivePiece::new(kind);
            assert_eq!(piece.position(), kind.spawn_position());
            assert_eq!(piece.rotation(), PieceRotation::SPAWN);
        }
    }

    #[test]
    fn test_move_by_translates_every_cell() {
        let mut piece = ActivePiece::new(PieceKind::L);
        let before: Vec<_> = piece.cell_positions().collect();
        piece.move_by(3, -2);
        let after: Vec<_> = piece.cell_positions().collect();
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(*a, b.translated(3, -2));
        }
    }

    #[test]
    fn test_move_by_allows_leaving_the_grid() {
        let mut piece = ActivePiece::new(PieceKind::I);
        piece.move_by(0, -10);
        assert!(piece.cell_positions().any(|p| p.column < 0));
    }

    #[test]
    fn test_rotate_then_undo_restores_state() {
        for kind in PieceKind::ALL {
            let mut piece = ActivePiece::new(kind);
            piece.move_by(5, 1);
            piece.rotate();
            piece.rotate();
            let rotation = piece.rotation();
            let cells: Vec<_> = piece.cell_positions().collect();

            piece.rotate();
            piece.undo_rotation();

            assert_eq!(piece.rotation(), rotation);
            assert_eq!(piece.cell_positions().collect::<Vec<_>>(), cells);
        }
    }

    #[test]
    fn test_rotation_wraps_after_four_turns() {
        let mut piece = ActivePiece::new(PieceKind::S);
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece.rotation(), PieceRotation::SPAWN);
    }

    #[test]
    fn test_undo_without_rotate_is_noop() {
        let mut piece = ActivePiece::new(PieceKind::T);
        piece.undo_rotation();
        assert_eq!(piece, ActivePiece::new(PieceKind::T));
    }

    #[test]
    fn test_reset_returns_to_spawn() {
        let mut piece = ActivePiece::new(PieceKind::Z);
        piece.move_by(7, 2);
        piece.rotate();
        piece.reset();
        assert_eq!(piece, ActivePiece::new(PieceKind::Z));
    }
}
