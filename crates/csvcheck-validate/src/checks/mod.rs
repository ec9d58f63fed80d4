//! Per-file rule implementations.
//!
//! Each check takes one file and returns exactly one outcome; I/O and parse
//! problems are folded into failing outcomes rather than returned as errors.

pub mod columns;
pub mod encoding;
pub mod mime;
pub mod naming;
pub mod rfc4180;
