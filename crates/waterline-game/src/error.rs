/// Level data rejected at load time. Malformed grids never reach the
/// collision math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    EmptyGrid,
    EmptySet,
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    UnknownCode {
        row: usize,
        col: usize,
        code: u8,
    },
    Parse(String),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "level grid has no rows"),
            Self::EmptySet => write!(f, "level set has no templates"),
            Self::RaggedRow { row, expected, got } => write!(
                f,
                "row {row} has {got} columns, expected {expected} (grid must be rectangular)"
            ),
            Self::UnknownCode { row, col, code } => {
                write!(f, "unrecognized tile code {code} at row {row}, col {col}")
            },
            Self::Parse(msg) => write!(f, "level template parse failed: {msg}"),
        }
    }
}

impl std::error::Error for LevelError {}

/// Session construction failure. Initialization aborts rather than
/// running with a partial render setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    DegenerateLayer { index: usize },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateLayer { index } => {
                write!(f, "parallax layer {index} has a zero or negative tiling size")
            },
        }
    }
}

impl std::error::Error for SessionError {}
