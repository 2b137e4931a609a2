/// Single-character markers that make up the database text format.
///
/// The defaults produce files like:
///
/// ```text
/// #comment
/// [section]
/// 	$variable=value
/// 	[section/subsection]
/// 		$variable=value
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    /// Leading character of a comment line
    pub comment: char,

    /// Leading character of a variable declaration
    pub var_start: char,

    /// Separates a variable's name from its value
    pub delimiter: char,

    /// Indentation character, stripped on read and repeated once per nesting level on write
    pub indent: char,
}

impl Syntax {
    /// Canonical text of a variable declaration
    pub fn format_var(&self, name: &str, value: &str) -> String {
        let mut raw = String::with_capacity(name.len() + value.len() + 2);
        raw.push(self.var_start);
        raw.push_str(name);
        raw.push(self.delimiter);
        raw.push_str(value);
        raw
    }

    /// Canonical text of a comment line carrying `text`
    pub fn format_comment(&self, text: &str) -> String {
        format!("{}{}", self.comment, text)
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            comment: '#',
            var_start: '$',
            delimiter: '=',
            indent: '\t',
        }
    }
}
