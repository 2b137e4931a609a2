use pest::Parser;
use pest_derive::Parser;
use tracing::trace;
use crate::error::{DbError, DbResult};
use crate::line::{Line, LineKind};
use crate::model::LineModel;
use crate::path::SectionPath;
use crate::syntax::Syntax;

#[derive(Parser)]
#[grammar = "plaindb.pest"]
pub struct PlainDbParser;

impl PlainDbParser {
    /// Split a bracketed section header into its segments
    pub fn parse_section_header(input: &str) -> DbResult<Vec<String>> {
        let pairs = PlainDbParser::parse(Rule::section_header, input)?;

        let segments = pairs
            .flatten()
            .filter(|pair| pair.as_rule() == Rule::segment)
            .map(|pair| pair.as_str().to_string())
            .collect();

        Ok(segments)
    }

    /// Parse a whole database text into a line model.
    ///
    /// Lines are fed to the model in file order: section headers through the ordered
    /// section insert, variables into the most recently opened section, comments and blank
    /// lines appended at the end. The first malformed line aborts the parse.
    pub fn parse_document(input: &str, syntax: &Syntax) -> DbResult<LineModel> {
        let mut model = LineModel::with_syntax(*syntax);
        let mut current: Option<SectionPath> = None;

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            let body = raw.trim_start_matches(syntax.indent);
            let line = Line::parse(body, syntax).map_err(|e| e.at_line(line_no))?;
            trace!(line = line_no, kind = ?line.kind(), "classified line");

            match line.kind() {
                LineKind::Section => {
                    let path = line.section_path().clone();
                    model.insert_section(line).map_err(|e| e.at_line(line_no))?;
                    current = Some(path);
                }

                LineKind::Variable => {
                    let section = current.as_ref().ok_or_else(|| {
                        DbError::parse(line_no, 1, "variable declared outside of any section")
                    })?;
                    model
                        .insert_var(section, line)
                        .map_err(|e| e.at_line(line_no))?;
                }

                LineKind::Comment | LineKind::Blank => model.push_comment_or_blank(line),
            }
        }

        Ok(model)
    }
}
