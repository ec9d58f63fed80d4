//! Parsed CSV content.

use serde::{Deserialize, Serialize};

/// One CSV record: ordered raw field values plus the physical line it
/// started on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub fields: Vec<String>,
    /// 1-based line number where the record begins.
    pub line: u64,
}

impl Record {
    pub fn new(fields: Vec<String>, line: u64) -> Self {
        Self { fields, line }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Records of a single CSV file, with the header split off when the parser
/// was asked to treat the first record as one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvDocument {
    pub header: Option<Record>,
    pub records: Vec<Record>,
}

impl CsvDocument {
    pub fn new(header: Option<Record>, records: Vec<Record>) -> Self {
        Self { header, records }
    }

    pub fn header(&self) -> Option<&Record> {
        self.header.as_ref()
    }

    /// Data records (header excluded).
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
