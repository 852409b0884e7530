use std::fmt;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    StateNotFound,
    StateParseError,
    ConfigParseError,
    DuplicateMotifId,
    InvalidMotifField,
    ExportWriteFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::StateNotFound => "E1001",
            Self::StateParseError => "E1002",
            Self::ConfigParseError => "E1003",
            Self::DuplicateMotifId => "E2001",
            Self::InvalidMotifField => "E2002",
            Self::ExportWriteFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::StateNotFound => "Mandala state file not found",
            Self::StateParseError => "Mandala state file parse error",
            Self::ConfigParseError => "Config file parse error",
            Self::DuplicateMotifId => "Duplicate motif ID",
            Self::InvalidMotifField => "Invalid motif field value",
            Self::ExportWriteFailed => "Export write failed",
        }
    }

    /// Optional remediation hint surfaced next to the message.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::StateNotFound => {
                Some("Pass --state <file> or run from a directory containing mandala_state.json.")
            }
            Self::StateParseError => Some("Re-export the state from the editor and retry."),
            Self::ConfigParseError => Some("Fix syntax in .mandala/config.toml and retry."),
            Self::DuplicateMotifId => Some("Give every motif a unique `id`."),
            Self::InvalidMotifField => Some(
                "Radius, angle and scale must be finite; multiplicity must be 0..=64; gridOrder at most 1024.",
            ),
            Self::ExportWriteFailed => Some("Check disk space and write permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A saved-state document that cannot be turned into core input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("duplicate motif id `{0}`")]
    DuplicateMotifId(String),

    #[error("motif `{id}`: field `{field}` must be finite, got {value}")]
    NonFinite {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("motif `{id}`: multiplicity must be within 0..={max}, got {value}")]
    MultiplicityOutOfRange { id: String, value: i64, max: u32 },

    #[error("gridOrder must be at most {max}, got {value}")]
    GridOrderTooLarge { value: i64, max: u32 },
}

impl StateError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateMotifId(_) => ErrorCode::DuplicateMotifId,
            Self::NonFinite { .. }
            | Self::MultiplicityOutOfRange { .. }
            | Self::GridOrderTooLarge { .. } => ErrorCode::InvalidMotifField,
        }
    }
}
