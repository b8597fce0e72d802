//! Frequency string conversions and band classifiers.
//!
//! Vendor exports carry frequencies as decimal MHz or kHz strings. Parsing
//! goes through `rust_decimal` rather than `f64` so that a value like
//! `146.0100` scales to exactly 146_010_000 Hz; binary floats would drift
//! under repeated conversion and corrupt offset arithmetic. Formatting is
//! pure integer math for the same reason.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Parse a decimal MHz string into integer Hz, truncating below 1 Hz.
///
/// Returns `None` for unparseable or negative input.
pub fn parse_mhz(mhz: &str) -> Option<u64> {
    scale_decimal(mhz, 1_000_000)
}

/// Parse a decimal kHz string into integer Hz.
pub fn parse_khz(khz: &str) -> Option<u64> {
    scale_decimal(khz, 1_000)
}

fn scale_decimal(text: &str, factor: u32) -> Option<u64> {
    let value: Decimal = text.trim().parse().ok()?;
    let scaled = (value * Decimal::from(factor)).trunc();
    scaled.to_u64()
}

/// Format integer Hz as a decimal MHz string with exactly 4 fractional
/// digits (100 Hz resolution).
pub fn format_mhz(hz: u64) -> String {
    format!("{}.{:04}", hz / 1_000_000, (hz % 1_000_000) / 100)
}

/// Format a channel bandwidth in Hz as the kHz label vendors use
/// (`12500` -> `"12.5"`, `25000` -> `"25"`).
pub fn format_bandwidth_khz(hz: u32) -> String {
    if hz % 1_000 == 0 {
        format!("{}", hz / 1_000)
    } else {
        format!("{}.{}", hz / 1_000, (hz % 1_000) / 100)
    }
}

/// True for the 2 m amateur band, [144.0, 148.0] MHz inclusive.
pub fn is_2m(hz: u64) -> bool {
    (144_000_000..=148_000_000).contains(&hz)
}

/// True for the 70 cm amateur band, [420.0, 450.0] MHz inclusive.
pub fn is_70cm(hz: u64) -> bool {
    (420_000_000..=450_000_000).contains(&hz)
}
