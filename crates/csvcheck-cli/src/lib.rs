//! Command-line front end for the csvcheck validator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
