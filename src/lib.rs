//! # plaindb
//!
//! A parser and in-place editor for a small hierarchical, line-oriented plaintext database format.
//!
//! Files look like this:
//!
//! ```text
//! #This is a comment
//! [section]
//! 	$variable=value
//! 	#Nested comment
//! 	[section/subsection]
//! 		$variable=value
//! ```
//!
//! Sections nest through `/`-separated paths, variables live inside sections, and leading tabs are
//! cosmetic: they are stripped on read and regenerated from the nesting depth on write.
//!
//! ## Features
//!
//! - **Nested sections**: Unlimited nesting depth, addressed as `parent/child` or `[parent/child]`
//! - **Ordered editing**: New sections and variables land in predictable places in the file
//! - **Faithful output**: Comments and blank lines are kept, untouched lines are written back as read
//! - **Auto-apply**: Optionally persist the file after every successful change
//! - **Configurable markers**: Comment, variable and delimiter characters via [`Syntax`]
//!
//! ## Example
//!
//! ```rust
//! use plaindb::{LineModel, Syntax};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut model = LineModel::parse("[net]\n\t$host=localhost\n\t$port=8080\n", &Syntax::default())?;
//!
//! model.change_var_value("net", "port", "9090")?;
//! model.create_section("net/proxy")?;
//! model.create_var("net/proxy", "port", "3128")?;
//!
//! assert_eq!(model.get_var("net", "port"), Some("9090"));
//! assert_eq!(
//!     model.serialize(true),
//!     "[net]\n\t$host=localhost\n\t$port=9090\n\t[net/proxy]\n\t\t$port=3128\n"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Working with files
//!
//! ```rust,no_run
//! use plaindb::Database;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut db = Database::new("settings.db");
//! db.set_always_apply(true);
//!
//! if !db.model().section_exists("window") {
//!     db.create_section("window")?;
//! }
//! db.create_var("window", "width", "800")?;
//! # Ok(())
//! # }
//! ```

// Module declarations
mod database;
mod error;
mod line;
mod model;
mod parser;
mod path;
mod syntax;

// Public API exports
pub use database::{DEFAULT_VALUE, Database, DatabaseOptions};
pub use error::{DbError, DbResult};
pub use line::{Line, LineKind};
pub use model::LineModel;
pub use path::SectionPath;
pub use syntax::Syntax;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
