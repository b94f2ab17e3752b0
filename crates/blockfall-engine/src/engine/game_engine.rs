use std::collections::VecDeque;

use crate::{
    PieceCollisionError,
    core::{active_piece::ActivePiece, grid::Grid, piece::PieceKind},
};

use super::{
    game_event::GameEvent,
    game_stats::GameStats,
    piece_bag::{PieceBag, PieceSeed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Owns the whole game: grid, active and next piece, bag, statistics.
///
/// Every move is applied optimistically and reverted when the resulting
/// placement is outside the grid or overlaps settled cells. Moving down into
/// an obstacle locks the piece instead. Once the game is over, movement and
/// rotation do nothing until [`GameEngine::reset`].
#[derive(Debug, Clone)]
pub struct GameEngine {
    grid: Grid,
    active_piece: ActivePiece,
    next_piece: PieceKind,
    piece_bag: PieceBag,
    stats: GameStats,
    state: GameState,
    events: VecDeque<GameEvent>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Starts a game on an empty grid with a random piece sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bag(Grid::new(), PieceBag::new())
    }

    /// Like [`Self::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_bag(Grid::new(), PieceBag::with_seed(seed))
    }

    /// Starts a game on a prepared grid.
    ///
    /// The game starts in [`GameState::GameOver`] if the first piece does not
    /// fit at spawn.
    #[must_use]
    pub fn from_grid(grid: Grid, seed: PieceSeed) -> Self {
        Self::with_bag(grid, PieceBag::with_seed(seed))
    }

    fn with_bag(grid: Grid, mut piece_bag: PieceBag) -> Self {
        let active_piece = ActivePiece::new(piece_bag.draw());
        let next_piece = piece_bag.draw();
        let mut this = Self {
            grid,
            active_piece,
            next_piece,
            piece_bag,
            stats: GameStats::new(),
            state: GameState::Playing,
            events: VecDeque::new(),
        };
        this.check_spawn();
        this
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Removes and yields queued events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Returns `true` if every cell of the active piece is on an empty grid cell.
    #[must_use]
    pub fn block_fits(&self) -> bool {
        self.active_piece
            .cell_positions()
            .all(|p| self.grid.is_empty(p.row, p.column))
    }

    /// Returns `true` if every cell of the active piece is inside the grid.
    #[must_use]
    pub fn block_inside(&self) -> bool {
        self.active_piece
            .cell_positions()
            .all(|p| self.grid.is_inside(p.row, p.column))
    }

    fn is_valid_placement(&self) -> bool {
        self.block_inside() && self.block_fits()
    }

    /// Replaces the active piece if it lies inside the grid on empty cells.
    pub fn set_active_piece(&mut self, piece: ActivePiece) -> Result<(), PieceCollisionError> {
        let previous = std::mem::replace(&mut self.active_piece, piece);
        if !self.is_valid_placement() {
            self.active_piece = previous;
            return Err(PieceCollisionError);
        }
        Ok(())
    }

    fn try_shift(&mut self, d_row: i32, d_column: i32) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        self.active_piece.move_by(d_row, d_column);
        if !self.is_valid_placement() {
            self.active_piece.move_by(-d_row, -d_column);
            return false;
        }
        true
    }

    /// Moves the active piece one column left. Returns whether it moved.
    pub fn move_left(&mut self) -> bool {
        self.try_shift(0, -1)
    }

    /// Moves the active piece one column right. Returns whether it moved.
    pub fn move_right(&mut self) -> bool {
        self.try_shift(0, 1)
    }

    /// Moves the active piece one row down, locking it if it cannot move.
    ///
    /// Returns `true` if the piece moved and `false` if it was locked (or the
    /// game is over).
    pub fn move_down(&mut self) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        if self.try_shift(1, 0) {
            return true;
        }
        self.lock_block();
        false
    }

    /// Drops the active piece until it locks. Returns the number of rows it fell.
    pub fn hard_drop(&mut self) -> usize {
        let mut rows = 0;
        while self.move_down() {
            rows += 1;
        }
        rows
    }

    /// Rotates the active piece clockwise, keeping the old rotation if the new
    /// one does not fit. Returns whether the rotation was accepted.
    pub fn rotate(&mut self) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        self.active_piece.rotate();
        if !self.is_valid_placement() {
            self.active_piece.undo_rotation();
            return false;
        }
        self.events.push_back(GameEvent::RotationAccepted);
        true
    }

    /// Returns the active piece moved down as far as it can go.
    ///
    /// Renderers use this to draw a landing preview.
    #[must_use]
    pub fn drop_position(&self) -> ActivePiece {
        let mut dropped = self.active_piece;
        loop {
            let mut next = dropped;
            next.move_by(1, 0);
            if self.grid.is_colliding(&next) {
                return dropped;
            }
            dropped = next;
        }
    }

    /// Locks the active piece into the grid, spawns the next piece and clears
    /// full rows. Returns the number of rows cleared.
    pub fn lock_block(&mut self) -> usize {
        if self.state.is_game_over() {
            return 0;
        }
        self.grid.fill_piece(&self.active_piece);
        self.active_piece = ActivePiece::new(self.next_piece);
        self.next_piece = self.get_random_block();

        let cleared_lines = self.grid.clear_full_rows();
        self.stats.complete_piece_drop(cleared_lines);
        self.update_score(cleared_lines, 0);

        self.check_spawn();
        cleared_lines
    }

    fn check_spawn(&mut self) {
        if !self.is_valid_placement() {
            self.state = GameState::GameOver;
            self.events.push_back(GameEvent::GameOverEntered);
        }
    }

    /// Draws the next piece kind from the bag.
    pub(crate) fn get_random_block(&mut self) -> PieceKind {
        self.piece_bag.draw()
    }

    /// Adds the line-clear bonus plus `move_points` to the score.
    ///
    /// Queues one [`GameEvent::LinesCleared`] when `cleared_lines` is non-zero.
    /// Does nothing once the game is over.
    pub(crate) fn update_score(&mut self, cleared_lines: usize, move_points: usize) {
        if self.state.is_game_over() {
            return;
        }
        if cleared_lines > 0 {
            self.events.push_back(GameEvent::LinesCleared(cleared_lines));
        }
        self.stats.add_score(cleared_lines, move_points);
    }

    /// Starts a new game: empty grid, fresh bag cycle, zero score.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.piece_bag.refill();
        self.active_piece = ActivePiece::new(self.get_random_block());
        self.next_piece = self.get_random_block();
        self.stats = GameStats::new();
        self.state = GameState::Playing;
        self.events.clear();
    }
}
