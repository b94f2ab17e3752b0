/// A `(row, column)` coordinate on the grid.
///
/// Rows grow downward and columns grow rightward. Coordinates are signed so that
/// a piece may be translated past an edge before its placement is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    #[must_use]
    pub const fn translated(self, d_row: i32, d_column: i32) -> Self {
        Self {
            row: self.row + d_row,
            column: self.column + d_column,
        }
    }
}

/// Rotation state index of a piece.
///
/// `0` is the spawn orientation; each clockwise turn adds one, wrapping at the
/// number of states the piece kind defines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub fn rotated_right(self, kind: PieceKind) -> Self {
        #[expect(clippy::cast_possible_truncation)]
        let states = kind.rotation_count() as u8;
        Self((self.0 + 1) % states)
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// RGB color tag used by renderers to draw a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Enum representing the type of piece.
///
/// The discriminant doubles as the piece identifier stored in grid cells, so it
/// is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// L-piece.
    L = 1,
    /// J-piece.
    J = 2,
    /// I-piece.
    I = 3,
    /// O-piece.
    O = 4,
    /// S-piece.
    S = 5,
    /// T-piece.
    T = 6,
    /// Z-piece.
    Z = 7,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Every piece kind, ordered by identifier.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the identifier written into grid cells (1..=7).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    const fn index(self) -> usize {
        self as usize - 1
    }

    /// Returns the number of distinct rotation states (1 for O, 4 otherwise).
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        PIECE_SHAPES[self.index()].rotations.len()
    }

    /// Returns the position a freshly spawned piece of this kind is placed at.
    #[must_use]
    pub const fn spawn_position(self) -> Position {
        PIECE_SHAPES[self.index()].spawn
    }

    /// Returns an iterator of the 4 cell offsets for the piece in the given rotation.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::{PieceKind, PieceRotation, Position};
    ///
    /// let cells: Vec<_> = PieceKind::O.cell_offsets(PieceRotation::SPAWN).collect();
    /// assert_eq!(cells.len(), 4);
    /// assert!(cells.contains(&Position::new(1, 1)));
    /// ```
    pub fn cell_offsets(self, rotation: PieceRotation) -> impl Iterator<Item = Position> {
        PIECE_SHAPES[self.index()].rotations[rotation.as_usize()]
            .iter()
            .map(|&(row, column)| Position::new(row, column))
    }

    /// Returns the color tag renderers use for this kind.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::L => Rgb(47, 230, 23),
            PieceKind::J => Rgb(232, 18, 18),
            PieceKind::I => Rgb(226, 116, 17),
            PieceKind::O => Rgb(237, 234, 4),
            PieceKind::S => Rgb(166, 0, 247),
            PieceKind::T => Rgb(21, 204, 209),
            PieceKind::Z => Rgb(13, 64, 216),
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('Z'), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Occupied `(row, column)` offsets of one rotation state, relative to the piece position.
type CellOffsets = [(i32, i32); 4];

struct PieceShape {
    rotations: &'static [CellOffsets],
    spawn: Position,
}

// Spawn positions place every piece inside the hidden rows, covering (1, 4).
const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = [
    // L-piece
    PieceShape {
        rotations: &[
            [(0, 2), (1, 0), (1, 1), (1, 2)],
            [(0, 1), (1, 1), (2, 1), (2, 2)],
            [(1, 0), (1, 1), (1, 2), (2, 0)],
            [(0, 0), (0, 1), (1, 1), (2, 1)],
        ],
        spawn: Position::new(0, 3),
    },
    // J-piece
    PieceShape {
        rotations: &[
            [(0, 0), (1, 0), (1, 1), (1, 2)],
            [(0, 1), (0, 2), (1, 1), (2, 1)],
            [(1, 0), (1, 1), (1, 2), (2, 2)],
            [(0, 1), (1, 1), (2, 0), (2, 1)],
        ],
        spawn: Position::new(0, 3),
    },
    // I-piece
    PieceShape {
        rotations: &[
            [(1, 0), (1, 1), (1, 2), (1, 3)],
            [(0, 2), (1, 2), (2, 2), (3, 2)],
            [(2, 0), (2, 1), (2, 2), (2, 3)],
            [(0, 1), (1, 1), (2, 1), (3, 1)],
        ],
        spawn: Position::new(0, 3),
    },
    // O-piece
    PieceShape {
        rotations: &[[(0, 0), (0, 1), (1, 0), (1, 1)]],
        spawn: Position::new(0, 4),
    },
    // S-piece
    PieceShape {
        rotations: &[
            [(0, 1), (0, 2), (1, 0), (1, 1)],
            [(0, 1), (1, 1), (1, 2), (2, 2)],
            [(1, 1), (1, 2), (2, 0), (2, 1)],
            [(0, 0), (1, 0), (1, 1), (2, 1)],
        ],
        spawn: Position::new(0, 3),
    },
    // T-piece
    PieceShape {
        rotations: &[
            [(0, 1), (1, 0), (1, 1), (1, 2)],
            [(0, 1), (1, 1), (1, 2), (2, 1)],
            [(1, 0), (1, 1), (1, 2), (2, 1)],
            [(0, 1), (1, 0), (1, 1), (2, 1)],
        ],
        spawn: Position::new(0, 3),
    },
    // Z-piece
    PieceShape {
        rotations: &[
            [(0, 0), (0, 1), (1, 1), (1, 2)],
            [(0, 2), (1, 1), (1, 2), (2, 1)],
            [(1, 0), (1, 1), (2, 1), (2, 2)],
            [(0, 1), (1, 0), (1, 1), (2, 0)],
        ],
        spawn: Position::new(0, 3),
    },
];
