//! Table formatting for report commands
//!
//! Commands build a [`Table`] of plain strings and render it for the
//! requested format. JSON and YAML never go through here; commands serialize
//! their report structs directly for those.

use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::escape_csv;
use crate::cli::OutputFormat;

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render for a tabular format; structured formats fall back to the boxed table
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Tsv => self.delimited("\t", |s| s.replace(['\t', '\n'], " ")),
            OutputFormat::Csv => self.delimited(",", escape_csv),
            OutputFormat::Md => self.tabled(true),
            OutputFormat::Auto | OutputFormat::Json | OutputFormat::Yaml => self.tabled(false),
        }
    }

    fn tabled(&self, markdown: bool) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }
        let mut table = builder.build();
        if markdown {
            table.with(Style::markdown());
        } else {
            table.with(Style::rounded());
        }
        format!("{}\n", table)
    }

    fn delimited(&self, sep: &str, escape: impl Fn(&str) -> String) -> String {
        let mut out = String::new();
        for line in std::iter::once(&self.headers).chain(&self.rows) {
            let cells: Vec<String> = line.iter().map(|c| escape(c)).collect();
            out.push_str(&cells.join(sep));
            out.push('\n');
        }
        out
    }
}
