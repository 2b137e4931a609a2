use crate::error::{DbError, DbResult};
use crate::parser::PlainDbParser;
use std::fmt;
use std::str::FromStr;

/// Slash-separated location of a section, e.g. `net/proxy`.
///
/// The root path has no segments. It is the path of lines that appear before any section
/// header and the parent of every top-level section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SectionPath {
    segments: Vec<String>,
}

impl SectionPath {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a section reference in either bracketed (`[a/b]`) or bare (`a/b`) form.
    ///
    /// Fails when any segment is empty or a bracketed form is not closed.
    pub fn parse(input: &str) -> DbResult<Self> {
        let result = if input.starts_with('[') {
            PlainDbParser::parse_section_header(input)
        } else {
            PlainDbParser::parse_section_header(&format!("[{}]", input))
        };

        match result {
            Ok(segments) => Ok(Self { segments }),
            Err(DbError::ParseError { message, .. }) => {
                Err(DbError::invalid_section(input, message))
            }
            Err(e) => Err(e),
        }
    }

    pub(crate) fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments; 0 for the root
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// This path with its last segment removed (root stays root)
    pub fn parent(&self) -> SectionPath {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    /// Last segment, `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    /// Bracketed header text, e.g. `[net/proxy]`
    pub fn header(&self) -> String {
        format!("[{}]", self)
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl FromStr for SectionPath {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
