//! Error codes for every diagnostic the interpreter raises.

use std::fmt;

/// Error codes for all interpreter diagnostics.
///
/// Format: E#### where first digit indicates the area:
/// - E1xxx: Symbol-table definitions
/// - E2xxx: Expression evaluation
/// - E3xxx: Element attributes
/// - E4xxx: Beam lines
/// - E5xxx: Comment mode
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Table Errors (E1xxx)
    /// Constant defined twice; the new value replaces the old
    E1001,
    /// Constant rejected because a variable has that name
    E1002,
    /// Variable rejected because a constant has that name
    E1003,
    /// Element defined twice; the new record replaces the old
    E1004,
    /// Line defined twice; the new record replaces the old
    E1005,

    // Evaluation Errors (E2xxx)
    /// Reference to an undefined constant
    E2001,
    /// Reference to a name that is not (yet) a variable
    E2002,
    /// Length of an undefined element
    E2003,
    /// String value used where a number is required (fatal)
    E2004,
    /// Expression nesting exceeds the configured depth
    E2005,

    // Element Errors (E3xxx)
    /// Attribute keyword not accepted by the element kind
    E3001,
    /// Bare flag that has no kind-specific default
    E3002,
    /// Matrix index outside 1..6
    E3003,
    /// Matrix entry on an element that is not a matrix
    E3004,

    // Line Errors (E4xxx)
    /// Line member that is neither an element nor a line
    E4001,
    /// Repetition would produce more entries than the limit allows (fatal)
    E4002,

    // Comment Errors (E5xxx)
    /// End of comment without a matching begin
    E5001,

    // Internal Errors (E9xxx)
    /// Stale or double-released arena handle
    E9001,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E5001,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Codes that always stop the run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2004 | ErrorCode::E4002 | ErrorCode::E9001
        )
    }

    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
pub fn parse_code(text: &str) -> Option<ErrorCode> {
    let text = text.trim();
    ErrorCode::ALL
        .iter()
        .copied()
        .find(|code| code.as_str().eq_ignore_ascii_case(text))
}

impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s).ok_or(())
    }
}
