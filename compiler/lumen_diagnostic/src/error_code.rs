//! Error codes for constant-folding diagnostics.
//!
//! The first digit indicates the category:
//! - E2xxx: user-facing semantic errors
//! - E9xxx: internal compiler errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Expression is not a valid constant expression
    E2001,
    /// No folding rule for the operator and operand kind
    E9001,
    /// Operator is recognized but its folding is not implemented
    E9002,
    /// Malformed folder input (upstream type-checking bug)
    E9003,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E9001,
        ErrorCode::E9002,
        ErrorCode::E9003,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
        }
    }

    /// Check if this is an internal compiler error (E9xxx range).
    pub fn is_internal_error(self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002 | ErrorCode::E9003)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an error code string like `"E9001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
