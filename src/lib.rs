//! Replug: Codeplug Conversion Library
//!
//! A library for converting amateur-radio codeplug data between
//! vendor-specific CSV export formats and a vendor-neutral JSON document,
//! with band-plan and referential validation of decoded codeplugs.

pub mod cli;
pub mod diag;
pub mod error;
pub mod model;
pub mod radios;
pub mod report;
pub mod units;
pub mod validate;
