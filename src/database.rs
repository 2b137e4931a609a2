use crate::error::{DbError, DbResult};
use crate::model::LineModel;
use crate::syntax::Syntax;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Value given to variables declared through [`Database::declare_var`]
pub const DEFAULT_VALUE: &str = "empty";

/// A database file bound to its in-memory line model
#[derive(Debug, Clone)]
pub struct Database {
    /// Backing file
    path: PathBuf,

    /// Parsed contents
    model: LineModel,

    options: DatabaseOptions,

    /// Whether the last (re)parse succeeded
    parsed: bool,
}

/// Database options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseOptions {
    /// Write the whole file after every successful mutation
    pub always_apply: bool,

    /// Indent lines by nesting depth when writing
    pub auto_indent: bool,

    /// Markers of the text format
    pub syntax: Syntax,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            always_apply: false,
            auto_indent: true,
            syntax: Syntax::default(),
        }
    }
}

impl Database {
    /// Open a database file with default options.
    ///
    /// The file is parsed immediately; a missing or malformed file still yields a
    /// database (check [`Database::is_parsed`]), so a new file can be built up and
    /// written with [`Database::apply_changes`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_options(path, DatabaseOptions::default())
    }

    /// Open a database file with custom options
    pub fn with_options(path: impl AsRef<Path>, options: DatabaseOptions) -> Self {
        let mut db = Self {
            path: path.as_ref().to_path_buf(),
            model: LineModel::with_syntax(options.syntax),
            options,
            parsed: false,
        };

        if let Err(e) = db.reparse() {
            debug!(path = %db.path.display(), error = %e, "initial parse failed");
        }
        db
    }

    /// Reload the database from its file.
    ///
    /// On failure the previous contents are kept and [`Database::is_parsed`] turns false.
    pub fn reparse(&mut self) -> DbResult<()> {
        let result = std::fs::read_to_string(&self.path)
            .map_err(|e| DbError::io(self.path.display().to_string(), e.to_string()))
            .and_then(|content| LineModel::parse(&content, &self.options.syntax));

        match result {
            Ok(model) => {
                debug!(path = %self.path.display(), lines = model.len(), "parsed database");
                self.model = model;
                self.parsed = true;
                Ok(())
            }
            Err(e) => {
                self.parsed = false;
                Err(e)
            }
        }
    }

    /// Write the database to its file
    pub fn apply_changes(&self) -> DbResult<()> {
        self.write_to(&self.path)
    }

    /// Write the database to another file, leaving the bound path unchanged
    pub fn save_as(&self, path: impl AsRef<Path>) -> DbResult<()> {
        self.write_to(path.as_ref())
    }

    fn write_to(&self, path: &Path) -> DbResult<()> {
        std::fs::write(path, self.serialize())
            .map_err(|e| DbError::io(path.display().to_string(), e.to_string()))?;
        debug!(path = %path.display(), lines = self.model.len(), "wrote database");
        Ok(())
    }

    /// Document text as the next apply would write it
    pub fn serialize(&self) -> String {
        self.model.serialize(self.options.auto_indent)
    }

    pub fn set_always_apply(&mut self, value: bool) {
        self.options.always_apply = value;
    }

    pub fn set_auto_indent(&mut self, value: bool) {
        self.options.auto_indent = value;
    }

    /// Create a section, given as `parent/child` or `[parent/child]`
    pub fn create_section(&mut self, section: &str) -> DbResult<()> {
        self.model.create_section(section)?;
        debug!(section, "created section");
        self.after_mutation()
    }

    /// Create a variable in an existing section
    pub fn create_var(&mut self, section: &str, name: &str, value: &str) -> DbResult<()> {
        if value.is_empty() {
            return Err(DbError::empty_value(name));
        }

        self.model.create_var(section, name, value)?;
        debug!(section, variable = name, "created variable");
        self.after_mutation()
    }

    /// Create a variable holding [`DEFAULT_VALUE`]
    pub fn declare_var(&mut self, section: &str, name: &str) -> DbResult<()> {
        self.create_var(section, name, DEFAULT_VALUE)
    }

    pub fn change_var_value(&mut self, section: &str, name: &str, value: &str) -> DbResult<()> {
        if value.is_empty() {
            return Err(DbError::empty_value(name));
        }

        self.model.change_var_value(section, name, value)?;
        debug!(section, variable = name, "changed variable");
        self.after_mutation()
    }

    /// Append a comment line, or a blank line when `text` is empty.
    ///
    /// `text` is written after the comment marker. Only a multi-line `text` or a failed
    /// automatic write produce an error.
    pub fn add_comment(&mut self, text: &str) -> DbResult<()> {
        let raw = if text.is_empty() {
            String::new()
        } else {
            if text.contains(['\n', '\r']) {
                return Err(DbError::multiline(text));
            }
            self.options.syntax.format_comment(text)
        };

        self.model.add_comment_or_blank(&raw)?;
        self.after_mutation()
    }

    /// Value of a variable, `None` if the section or variable does not exist
    pub fn get_var(&self, section: &str, name: &str) -> Option<&str> {
        self.model.get_var(section, name)
    }

    /// Delete a section and everything nested in it
    pub fn delete_section(&mut self, section: &str) -> DbResult<()> {
        self.model.delete_section(section)?;
        debug!(section, "deleted section");
        self.after_mutation()
    }

    pub fn delete_var(&mut self, section: &str, name: &str) -> DbResult<()> {
        self.model.delete_var(section, name)?;
        debug!(section, variable = name, "deleted variable");
        self.after_mutation()
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn model(&self) -> &LineModel {
        &self.model
    }

    pub fn options(&self) -> &DatabaseOptions {
        &self.options
    }

    fn after_mutation(&self) -> DbResult<()> {
        if self.options.always_apply {
            self.apply_changes()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_parsed() {
        let db = Database::new("/nonexistent/plaindb/missing.db");
        assert!(!db.is_parsed());
        assert!(db.model().is_empty());
        assert!(db.options().auto_indent);
        assert!(!db.options().always_apply);
    }

    #[test]
    fn test_in_memory_edits() {
        let mut db = Database::new("/nonexistent/plaindb/edits.db");
        db.create_section("net").unwrap();
        db.declare_var("net", "host").unwrap();
        db.change_var_value("net", "host", "localhost").unwrap();
        db.add_comment(" trailing").unwrap();

        assert_eq!(db.get_var("net", "host"), Some("localhost"));
        assert_eq!(db.serialize(), "[net]\n\t$host=localhost\n\t# trailing\n");
    }

    #[test]
    fn test_multiline_comment_rejected() {
        let mut db = Database::new("/nonexistent/plaindb/comment.db");
        db.create_section("net").unwrap();

        assert_eq!(
            db.add_comment("first\nsecond"),
            Err(DbError::multiline("first\nsecond"))
        );
        assert_eq!(db.serialize(), "[net]\n");
    }

    #[test]
    fn test_empty_values_rejected() {
        let mut db = Database::new("/nonexistent/plaindb/empty.db");
        db.create_section("a").unwrap();
        assert_eq!(db.create_var("a", "x", ""), Err(DbError::empty_value("x")));
        db.create_var("a", "x", "1").unwrap();
        assert_eq!(db.change_var_value("a", "x", ""), Err(DbError::empty_value("x")));
        assert_eq!(db.get_var("a", "x"), Some("1"));
    }

    #[test]
    fn test_auto_apply_reports_write_failure() {
        let mut db = Database::new("/nonexistent/plaindb/readonly.db");
        db.set_always_apply(true);

        match db.create_section("a") {
            Err(DbError::IoError { path, .. }) => assert!(path.ends_with("readonly.db")),
            other => panic!("Expected IoError, got {:?}", other),
        }
        // The in-memory change is kept
        assert!(db.model().section_exists("a"));
    }
}
