//! Record types.
//!
//! A [`Record`] is an ordered sequence of string fields with no fixed schema;
//! two records in the same set may have different arities.

use std::fmt;

/// Field delimiter for source lines.
pub const DELIMITER: char = ',';

/// An ordered sequence of string fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    fields: Vec<String>,
}

/// Records in stage order.
pub type RecordSet = Vec<Record>;

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Split a source line on [`DELIMITER`].
    ///
    /// Interior empty fields are kept. Trailing empty fields are dropped, so
    /// `"a,b,,"` yields `["a", "b"]` and `","` yields no fields at all.
    /// Fields are not trimmed here; normalization is the transformer's job.
    pub fn parse_line(line: &str) -> Self {
        let mut fields: Vec<String> = line.split(DELIMITER).map(str::to_string).collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Build a new record by applying `f` to every field.
    pub fn map_fields<F>(&self, f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self {
            fields: self.iter().map(f).collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

/// Fields joined with `" | "`, the console layout.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join(" | "))
    }
}

/// A record paired with the id a [`RecordStore`](crate::RecordStore) assigned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: u64,
    pub record: Record,
}
