pub use self::{active_piece::*, grid::*, piece::*};

pub(crate) mod active_piece;
pub(crate) mod grid;
pub(crate) mod piece;
