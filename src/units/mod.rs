//! Unit and enumerated-value conversion helpers.
//!
//! Pure, stateless conversions between the human-readable encodings found
//! in vendor CSV exports and the canonical values of the neutral model.
//! Per-vendor power tables live in the adapters; everything shared across
//! vendors lives here.

pub mod frequency;
pub mod tone;

pub use frequency::*;
pub use tone::*;
