//! # tariff-cli: Trade Guidance Command-Line Interface
//!
//! Runs the guidance pipeline against local files. The commodity file and
//! the content bundle stand in for the upstream tariff service and the
//! content database.
//!
//! ## Subcommands
//!
//! - `evaluate`: answer a full trade request and print the response tree
//! - `options`: synthesize the option groups of one measure
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to the library crates; no business logic here.
//! - JSON goes to stdout, logs go to stderr.

pub mod evaluate;
pub mod input;
pub mod options;
