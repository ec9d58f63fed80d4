//! CSV reading utilities.

mod reader;
mod structure;

pub use reader::{
    HeaderMode, parse_document, parse_record_widths, read_csv_document, read_record_widths,
};
pub use structure::{RecordShape, StructureError, scan_records};
