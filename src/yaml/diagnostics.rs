//! Source-located diagnostics for malformed RFP data files

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A data file that could not be parsed, pointing at the offending spot
#[derive(Debug, Error, Diagnostic)]
#[error("invalid RFP data: {message}")]
#[diagnostic(code(rfp::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help: suggest_fix(&message),
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Byte offset of a 1-based line/column pair, clamped to the source length
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let Some(line_start) = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .try_fold(0usize, |acc, len| acc.checked_add(len))
    else {
        return 0;
    };

    if line_start >= source.len() {
        return source.len().saturating_sub(1);
    }

    let line_text = source[line_start..].lines().next().unwrap_or("");
    let col_offset = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line_text.len());

    line_start + col_offset
}

fn suggest_fix(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    let hint = if msg.contains("unknown rfp status") {
        "Status must be one of: Quotation Pending, Order Pending, In Production, Delivered, Fulfilled, Cancelled"
    } else if msg.contains("input contains invalid characters")
        || msg.contains("premature end of input")
        || msg.contains("input is out of range")
    {
        "Dates are written as YYYY-MM-DD, e.g. 2024-10-01"
    } else if msg.contains("missing field") {
        "Every record needs id, client_name, product_type, submission_date, status and assigned_to"
    } else if msg.contains("invalid type") && msg.contains("sequence") {
        "The data file holds a list of records; start each one with '- '"
    } else if msg.contains("tab") {
        "Indent with spaces; YAML does not allow tabs"
    } else if msg.contains("duplicate") {
        "Each key may appear only once per record"
    } else if msg.contains("mapping values are not allowed") {
        "Check for a missing space after ':' or inconsistent indentation"
    } else {
        return None;
    };

    Some(hint.to_string())
}
