//! Validation rules for trees of CSV files.
//!
//! | Rule | Code | Reads content |
//! |------|------|---------------|
//! | `extension-case` | CSV001 | no |
//! | `filename-case` | CSV002 | no |
//! | `mime-consistency` | CSV003 | yes, every file |
//! | `encoding-conformance` | CSV004 | yes |
//! | `column-count` | CSV005 | yes |
//! | `rfc4180` | CSV006 | yes |

pub mod checks;
mod config;
mod engine;
mod error;

pub use config::CheckConfig;
pub use engine::{Validator, validate_tree};
pub use error::{Result, ValidationError};
