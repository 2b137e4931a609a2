//! The line model: the whole database as one ordered list of [`Line`] records.
//!
//! The section tree is never stored explicitly. Hierarchy is recovered from the order of
//! the records and their section paths:
//!
//! - a section header is followed by everything it contains, up to the next header whose
//!   depth is less than or equal to its own;
//! - new sections are appended after their parent's last descendant;
//! - new variables are appended after the last line that sits directly in their section.
//!
//! Every operation is a linear scan plus a positional insert or erase, which keeps file
//! order and in-memory order identical.

use crate::error::{DbError, DbResult};
use crate::line::{Line, LineKind};
use crate::parser::PlainDbParser;
use crate::path::SectionPath;
use crate::syntax::Syntax;

/// Ordered line records of a database document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineModel {
    lines: Vec<Line>,
    syntax: Syntax,
}

impl LineModel {
    /// Create an empty model with the default syntax
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model with custom syntax markers
    pub fn with_syntax(syntax: Syntax) -> Self {
        Self {
            lines: Vec::new(),
            syntax,
        }
    }

    /// Build a model from database text
    pub fn parse(input: &str, syntax: &Syntax) -> DbResult<Self> {
        PlainDbParser::parse_document(input, syntax)
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Remove every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Text of the line at `index`, indented by nesting depth when `indent` is set
    pub fn raw_line(&self, index: usize, indent: bool) -> Option<String> {
        let indent = indent.then_some(self.syntax.indent);
        self.lines.get(index).map(|line| line.render(indent))
    }

    /// Render the whole document, one terminated line per record
    pub fn serialize(&self, indent: bool) -> String {
        let indent = indent.then_some(self.syntax.indent);
        let mut output = String::new();
        for line in &self.lines {
            output.push_str(&line.render(indent));
            output.push('\n');
        }
        output
    }

    pub fn section_exists(&self, section: &str) -> bool {
        SectionPath::parse(section)
            .map(|path| self.section_index(&path).is_some())
            .unwrap_or(false)
    }

    pub fn var_exists(&self, section: &str, name: &str) -> bool {
        self.get_var(section, name).is_some()
    }

    /// Section paths in document order
    pub fn sections(&self) -> Vec<&SectionPath> {
        self.lines
            .iter()
            .filter(|line| line.is_section())
            .map(|line| line.section_path())
            .collect()
    }

    /// `(name, value)` pairs declared directly in `section`, in document order.
    ///
    /// Returns `None` when the section does not exist.
    pub fn vars(&self, section: &str) -> Option<Vec<(&str, &str)>> {
        let path = SectionPath::parse(section).ok()?;
        let start = self.section_index(&path)? + 1;

        let vars = self.lines[start..]
            .iter()
            .take_while(|line| line.section_path() == &path)
            .filter_map(|line| Some((line.var_name()?, line.var_value()?)))
            .collect();
        Some(vars)
    }

    /// Create a section given as `a/b` or `[a/b]`.
    ///
    /// The new section becomes the last child of its parent. Top-level sections, and
    /// sections whose parent does not exist, go to the end of the document.
    pub fn create_section(&mut self, section: &str) -> DbResult<()> {
        let path = SectionPath::parse(section)?;
        self.insert_section(Line::section(path))
    }

    pub(crate) fn insert_section(&mut self, line: Line) -> DbResult<()> {
        let path = line.section_path();
        if self.section_index(path).is_some() {
            return Err(DbError::duplicate_section(path.to_string()));
        }

        let parent = line.parent_path();
        let position = match self.section_index(&parent) {
            Some(parent_idx) if !parent.is_root() => self.subtree_end(parent_idx),
            _ => self.lines.len(),
        };

        self.lines.insert(position, line);
        Ok(())
    }

    /// Create a variable from its name and value
    pub fn create_var(&mut self, section: &str, name: &str, value: &str) -> DbResult<()> {
        let path = SectionPath::parse(section)?;
        let line = Line::variable(name, value, &self.syntax)?;
        self.insert_var(&path, line)
    }

    /// Create a variable from a raw declaration such as `$name=value`
    pub fn create_var_raw(&mut self, section: &str, raw: &str) -> DbResult<()> {
        let path = SectionPath::parse(section)?;
        let line = Line::parse(raw, &self.syntax)?;
        if line.kind() != LineKind::Variable {
            return Err(DbError::invalid_name(raw, "not a variable declaration"));
        }
        self.insert_var(&path, line)
    }

    pub(crate) fn insert_var(&mut self, path: &SectionPath, mut line: Line) -> DbResult<()> {
        let name = line.var_name().unwrap_or_default();

        let section_idx = self
            .section_index(path)
            .ok_or_else(|| DbError::section_not_found(path.to_string()))?;

        if self.var_index(path, name).is_some() {
            return Err(DbError::duplicate_variable(path.to_string(), name));
        }

        let mut position = section_idx + 1;
        while position < self.lines.len() && self.lines[position].section_path() == path {
            position += 1;
        }

        line.set_section(path.clone());
        self.lines.insert(position, line);
        Ok(())
    }

    /// Replace the value of an existing variable
    pub fn change_var_value(&mut self, section: &str, name: &str, value: &str) -> DbResult<()> {
        let path = SectionPath::parse(section)?;
        let idx = self
            .var_index(&path, name)
            .ok_or_else(|| DbError::variable_not_found(path.to_string(), name))?;

        self.lines[idx].set_value(value, &self.syntax)
    }

    /// Append a comment (`#text`) or blank line (empty text) to the end of the document
    pub fn add_comment_or_blank(&mut self, raw: &str) -> DbResult<()> {
        let line = Line::parse(raw, &self.syntax)?;
        match line.kind() {
            LineKind::Comment | LineKind::Blank => {
                self.push_comment_or_blank(line);
                Ok(())
            }
            _ => Err(DbError::parse(1, 1, "not a comment or blank line")),
        }
    }

    /// Append a comment or blank line, inheriting the section of the last header
    pub(crate) fn push_comment_or_blank(&mut self, mut line: Line) {
        let section = self
            .lines
            .iter()
            .rev()
            .find(|l| l.is_section())
            .map(|l| l.section_path().clone())
            .unwrap_or_default();

        line.set_section(section);
        self.lines.push(line);
    }

    /// Value of a variable; `None` when the section or the variable does not exist
    pub fn get_var(&self, section: &str, name: &str) -> Option<&str> {
        let path = SectionPath::parse(section).ok()?;
        let idx = self.var_index(&path, name)?;
        self.lines[idx].var_value()
    }

    /// Delete a section together with everything nested in it
    pub fn delete_section(&mut self, section: &str) -> DbResult<()> {
        let path = SectionPath::parse(section)?;
        let start = self
            .section_index(&path)
            .ok_or_else(|| DbError::section_not_found(path.to_string()))?;

        let end = self.subtree_end(start);
        self.lines.drain(start..end);
        Ok(())
    }

    /// Delete a single variable
    pub fn delete_var(&mut self, section: &str, name: &str) -> DbResult<()> {
        let path = SectionPath::parse(section)?;
        let idx = self
            .var_index(&path, name)
            .ok_or_else(|| DbError::variable_not_found(path.to_string(), name))?;

        self.lines.remove(idx);
        Ok(())
    }

    fn section_index(&self, path: &SectionPath) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.is_section() && line.section_path() == path)
    }

    fn var_index(&self, path: &SectionPath, name: &str) -> Option<usize> {
        let start = self.section_index(path)? + 1;

        self.lines[start..]
            .iter()
            .take_while(|line| line.section_path() == path)
            .position(|line| line.var_name() == Some(name))
            .map(|offset| start + offset)
    }

    /// One past the last line nested in the section at `idx`
    fn subtree_end(&self, idx: usize) -> usize {
        let depth = self.lines[idx].depth();

        self.lines[idx + 1..]
            .iter()
            .position(|line| line.is_section() && line.depth() <= depth)
            .map(|offset| idx + 1 + offset)
            .unwrap_or(self.lines.len())
    }
}
