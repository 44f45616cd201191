// Delimited text table reader
use crate::domain::error::{DataProbeError, DataProbeResult};
use std::fs;
use std::path::Path;

const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// A table of string cells with a header row
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of a named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }
}

/// Reader for delimited text tables (csv, tsv and friends)
#[derive(Debug, Default, Clone)]
pub struct TableReader {
    delimiter: Option<char>,
}

impl TableReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a delimiter instead of sniffing it
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    /// Read and parse a table file
    pub fn read(&self, path: &Path) -> DataProbeResult<Table> {
        let content = fs::read_to_string(path).map_err(|e| DataProbeError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let delimiter = self.delimiter.or_else(|| delimiter_for_extension(path));
        let table = parse_table(&content, delimiter).ok_or_else(|| DataProbeError::Read {
            path: path.to_path_buf(),
            message: "file has no header row".to_string(),
        })?;

        tracing::debug!(
            "Read {} rows x {} columns from {}",
            table.rows.len(),
            table.headers.len(),
            path.display()
        );
        Ok(table)
    }
}

fn delimiter_for_extension(path: &Path) -> Option<char> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "tsv" | "tab" => Some('\t'),
        _ => None,
    }
}

/// Pick the candidate delimiter that splits the header into the most fields
fn sniff_delimiter(header: &str) -> char {
    CANDIDATE_DELIMITERS
        .iter()
        .copied()
        .max_by_key(|d| split_record(header, *d).len())
        .filter(|d| header.contains(*d))
        .unwrap_or(',')
}

/// Parse table text; `None` when there is no header line
pub fn parse_table(content: &str, delimiter: Option<char>) -> Option<Table> {
    let mut lines = content
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let header_line = lines.next()?;
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(header_line));
    let headers = split_record(header_line, delimiter);

    let rows = lines
        .map(|line| {
            let mut row = split_record(line, delimiter);
            if row.len() < headers.len() {
                row.resize(headers.len(), String::new());
            }
            row
        })
        .collect();

    Some(Table { headers, rows })
}

/// Split one record, honouring double quotes and `""` escapes
fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            c => field.push(c),
        }
    }
    fields.push(field.trim().to_string());

    fields
}
