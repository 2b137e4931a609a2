//! Line records: one parsed physical line of a database file.
//!
//! A [`Line`] keeps its canonical text (without indentation) next to the structured
//! fields derived from it. Variable lines regenerate their text whenever the value
//! changes, so the text and the fields never disagree.

use crate::error::{DbError, DbResult};
use crate::parser::PlainDbParser;
use crate::path::SectionPath;
use crate::syntax::Syntax;

/// What a line declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Section header: `[a/b]`
    Section,

    /// Variable declaration: `$name=value`
    Variable,

    /// Comment: `#text`
    Comment,

    /// Empty line
    Blank,
}

/// A single record of the line model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    kind: LineKind,
    /// Canonical text without leading indentation
    raw: String,
    /// Own path for sections, enclosing section's path for everything else
    section: SectionPath,
    name: String,
    value: String,
}

impl Line {
    /// Classify and parse one line whose indentation has already been stripped.
    ///
    /// Section paths of variables, comments and blank lines start out at the root; the
    /// model assigns the enclosing section when the line is inserted.
    pub fn parse(text: &str, syntax: &Syntax) -> DbResult<Self> {
        if text.contains(['\n', '\r']) {
            return Err(DbError::multiline(text));
        }

        let Some(first) = text.chars().next() else {
            return Ok(Self::blank());
        };

        if first == '[' {
            let segments = PlainDbParser::parse_section_header(text)?;
            return Ok(Self {
                kind: LineKind::Section,
                raw: text.to_string(),
                section: SectionPath::from_segments(segments),
                name: String::new(),
                value: String::new(),
            });
        }

        if first == syntax.var_start {
            return Self::parse_variable(text, syntax);
        }

        if first == syntax.comment {
            return Ok(Self {
                kind: LineKind::Comment,
                raw: text.to_string(),
                section: SectionPath::root(),
                name: String::new(),
                value: String::new(),
            });
        }

        Err(DbError::parse(
            1,
            1,
            format!("unrecognized line start '{}'", first),
        ))
    }

    fn parse_variable(text: &str, syntax: &Syntax) -> DbResult<Self> {
        let body = &text[syntax.var_start.len_utf8()..];

        let Some((name, value)) = body.split_once(syntax.delimiter) else {
            return Err(DbError::parse(
                1,
                text.chars().count() + 1,
                format!("missing '{}' delimiter in variable declaration", syntax.delimiter),
            ));
        };

        if name.is_empty() {
            return Err(DbError::parse(1, 2, "variable name is empty"));
        }

        if value.is_empty() {
            return Err(DbError::parse(
                1,
                name.chars().count() + 3,
                format!("variable '{}' has an empty value", name),
            ));
        }

        Ok(Self {
            kind: LineKind::Variable,
            raw: text.to_string(),
            section: SectionPath::root(),
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Section header line for `path`
    pub fn section(path: SectionPath) -> Self {
        Self {
            kind: LineKind::Section,
            raw: path.header(),
            section: path,
            name: String::new(),
            value: String::new(),
        }
    }

    /// Variable line built from its parts
    pub fn variable(name: &str, value: &str, syntax: &Syntax) -> DbResult<Self> {
        validate_name(name, syntax)?;
        validate_value(name, value)?;

        Ok(Self {
            kind: LineKind::Variable,
            raw: syntax.format_var(name, value),
            section: SectionPath::root(),
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Comment line carrying `text`, or a blank line when `text` is empty
    pub fn comment(text: &str, syntax: &Syntax) -> DbResult<Self> {
        if text.is_empty() {
            return Ok(Self::blank());
        }
        if text.contains(['\n', '\r']) {
            return Err(DbError::multiline(text));
        }

        Ok(Self {
            kind: LineKind::Comment,
            raw: syntax.format_comment(text),
            section: SectionPath::root(),
            name: String::new(),
            value: String::new(),
        })
    }

    pub fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            raw: String::new(),
            section: SectionPath::root(),
            name: String::new(),
            value: String::new(),
        }
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn is_section(&self) -> bool {
        self.kind == LineKind::Section
    }

    /// Canonical text without indentation
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn section_path(&self) -> &SectionPath {
        &self.section
    }

    /// Where a section nests; the enclosing section's parent for other kinds
    pub fn parent_path(&self) -> SectionPath {
        self.section.parent()
    }

    /// Nesting depth, equal to the number of segments in the section path
    pub fn depth(&self) -> usize {
        self.section.depth()
    }

    pub fn var_name(&self) -> Option<&str> {
        (self.kind == LineKind::Variable).then_some(self.name.as_str())
    }

    pub fn var_value(&self) -> Option<&str> {
        (self.kind == LineKind::Variable).then_some(self.value.as_str())
    }

    /// Replace a variable's value and regenerate its text.
    ///
    /// Leaves the line untouched on error.
    pub fn set_value(&mut self, value: &str, syntax: &Syntax) -> DbResult<()> {
        if self.kind != LineKind::Variable {
            return Err(DbError::invalid_name(
                self.raw.clone(),
                "line is not a variable declaration",
            ));
        }
        validate_value(&self.name, value)?;

        self.value = value.to_string();
        self.raw = syntax.format_var(&self.name, &self.value);
        Ok(())
    }

    pub(crate) fn set_section(&mut self, path: SectionPath) {
        self.section = path;
    }

    /// Number of indent characters this line is written with.
    ///
    /// A section header sits at the level of its parent's contents, everything inside a
    /// section one level deeper. Blank lines are never indented.
    pub fn indent_level(&self) -> usize {
        match self.kind {
            LineKind::Section => self.depth().saturating_sub(1),
            LineKind::Blank => 0,
            LineKind::Variable | LineKind::Comment => self.depth(),
        }
    }

    /// Output text, optionally prefixed with one `indent` per nesting level
    pub fn render(&self, indent: Option<char>) -> String {
        match indent {
            Some(ch) => {
                let mut out: String = std::iter::repeat_n(ch, self.indent_level()).collect();
                out.push_str(&self.raw);
                out
            }
            None => self.raw.clone(),
        }
    }
}

fn validate_name(name: &str, syntax: &Syntax) -> DbResult<()> {
    if name.is_empty() {
        return Err(DbError::invalid_name(name, "variable names cannot be empty"));
    }
    if name.contains(syntax.delimiter) {
        return Err(DbError::invalid_name(
            name,
            format!("variable names cannot contain '{}'", syntax.delimiter),
        ));
    }
    if name.contains(['\n', '\r']) {
        return Err(DbError::multiline(name));
    }
    Ok(())
}

fn validate_value(name: &str, value: &str) -> DbResult<()> {
    if value.is_empty() {
        return Err(DbError::empty_value(name));
    }
    if value.contains(['\n', '\r']) {
        return Err(DbError::multiline(value));
    }
    Ok(())
}
