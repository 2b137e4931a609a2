use std::fmt;

/// Result type alias for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur while parsing or editing a database
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// Malformed line in the database text
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Section path could not be parsed (empty segment, missing bracket)
    InvalidSection { path: String, reason: String },

    /// Variable name is empty or contains a reserved character
    InvalidName { name: String, reason: String },

    /// Variable values can never be empty
    EmptyValue { name: String },

    /// Text would span more than one line
    MultilineText { text: String },

    /// A section with this path already exists
    DuplicateSection { path: String },

    /// A variable with this name already exists in the section
    DuplicateVariable { section: String, name: String },

    /// Section not found
    SectionNotFound { path: String },

    /// Variable not found in section
    VariableNotFound { section: String, name: String },

    /// File I/O error
    IoError { path: String, message: String },
}

impl DbError {
    /// Create a parse error
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        DbError::ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create an invalid section error
    pub fn invalid_section(path: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::InvalidSection {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn empty_value(name: impl Into<String>) -> Self {
        DbError::EmptyValue { name: name.into() }
    }

    pub fn multiline(text: impl Into<String>) -> Self {
        DbError::MultilineText { text: text.into() }
    }

    /// Create a duplicate section error
    pub fn duplicate_section(path: impl Into<String>) -> Self {
        DbError::DuplicateSection { path: path.into() }
    }

    /// Create a duplicate variable error
    pub fn duplicate_variable(section: impl Into<String>, name: impl Into<String>) -> Self {
        DbError::DuplicateVariable {
            section: section.into(),
            name: name.into(),
        }
    }

    /// Create a section not found error
    pub fn section_not_found(path: impl Into<String>) -> Self {
        DbError::SectionNotFound { path: path.into() }
    }

    /// Create a variable not found error
    pub fn variable_not_found(section: impl Into<String>, name: impl Into<String>) -> Self {
        DbError::VariableNotFound {
            section: section.into(),
            name: name.into(),
        }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        DbError::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attach a line number to a line-level error.
    ///
    /// Errors produced while classifying a single line do not know where that line sits in
    /// the file; the document parser re-labels them with the 1-based line number.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            DbError::ParseError { column, message, .. } => DbError::ParseError {
                line,
                column,
                message,
            },
            other => DbError::ParseError {
                line,
                column: 1,
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::ParseError {
                line,
                column,
                message,
            } => {
                write!(
                    f,
                    "Parse error at line {}, column {}: {}",
                    line, column, message
                )
            }
            DbError::InvalidSection { path, reason } => {
                write!(f, "Invalid section '{}': {}", path, reason)
            }
            DbError::InvalidName { name, reason } => {
                write!(f, "Invalid variable name '{}': {}", name, reason)
            }
            DbError::EmptyValue { name } => {
                write!(f, "Variable '{}' cannot have an empty value", name)
            }
            DbError::MultilineText { text } => {
                write!(f, "Text '{}' must fit on a single line", text.escape_debug())
            }
            DbError::DuplicateSection { path } => {
                write!(f, "Section '{}' already exists", path)
            }
            DbError::DuplicateVariable { section, name } => {
                write!(f, "Variable '{}' already exists in section '{}'", name, section)
            }
            DbError::SectionNotFound { path } => {
                write!(f, "Section '{}' not found", path)
            }
            DbError::VariableNotFound { section, name } => {
                write!(f, "Variable '{}' not found in section '{}'", name, section)
            }
            DbError::IoError { path, message } => {
                write!(f, "I/O error for '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for DbError {}

impl<R: pest::RuleType> From<pest::error::Error<R>> for DbError {
    fn from(err: pest::error::Error<R>) -> Self {
        let (line, column) = match err.line_col {
            pest::error::LineColLocation::Pos((line, col)) => (line, col),
            pest::error::LineColLocation::Span((line, col), _) => (line, col),
        };

        DbError::ParseError {
            line,
            column,
            message: err.variant.to_string(),
        }
    }
}
