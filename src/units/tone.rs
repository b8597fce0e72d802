//! Tone and squelch label conversions.
//!
//! Vendors encode absence as literal strings (`"None"`, `"Off"`, blank
//! cells); these helpers translate to and from the tagged presence the
//! neutral model uses.

use crate::diag::Diagnostics;
use crate::model::{Squelch, Tone};

/// Parse a vendor tone label into a tone descriptor.
///
/// `"Off"`, `"None"`, and blank mean no tone. A label beginning with the
/// DCS marker `D` is a DCS code; a plain decimal number is a CTCSS
/// frequency in Hz. Anything else is recorded as a warning and treated as
/// no tone.
pub fn parse_tone(label: &str, diags: &mut Diagnostics) -> Option<Tone> {
    let label = label.trim();
    if label.is_empty() || label == "None" || label == "Off" {
        return None;
    }
    if label.starts_with('D') {
        return Some(Tone::Dcs {
            code: label.to_string(),
        });
    }
    if is_decimal_str(label) {
        if let Ok(freq) = label.parse::<f64>() {
            return Some(Tone::Ctcss { freq });
        }
    }
    diags.warn(format!("unknown tone type: {}", label));
    None
}

/// Format a tone descriptor back into a vendor label. `absent` is the
/// vendor's no-tone sentinel (`"Off"` for AnyTone, `"None"` for OpenGD77).
pub fn format_tone(tone: Option<&Tone>, absent: &str) -> String {
    match tone {
        None => absent.to_string(),
        Some(Tone::Ctcss { freq }) => format!("{}", freq),
        Some(Tone::Dcs { code }) => code.clone(),
    }
}

/// Parse a vendor squelch label into the canonical squelch value.
///
/// `Disabled` (and blank/`None`) map to the radio default, `Open` to 0%,
/// `Closed` to 100%; percentage strings pass through. Unknown labels are
/// recorded as a warning and fall back to the default.
pub fn parse_squelch(label: &str, diags: &mut Diagnostics) -> Squelch {
    let label = label.trim();
    match label {
        "" | "None" | "Disabled" => Squelch::Default,
        "Open" => Squelch::Percent(0),
        "Closed" => Squelch::Percent(100),
        _ => {
            if let Ok(squelch) = Squelch::try_from(label.to_string()) {
                return squelch;
            }
            diags.warn(format!("unknown squelch setting: {}", label));
            Squelch::Default
        }
    }
}

/// Format a canonical squelch value back into the vendor label.
pub fn format_squelch(squelch: Squelch) -> String {
    match squelch {
        Squelch::Default => "Disabled".to_string(),
        Squelch::Percent(0) => "Open".to_string(),
        Squelch::Percent(100) => "Closed".to_string(),
        Squelch::Percent(pct) => format!("{}%", pct),
    }
}

// Strict decimal check: digits with at most one dot. `f64::parse` alone
// would accept exponents and infinities, which are never valid CTCSS labels.
fn is_decimal_str(s: &str) -> bool {
    let mut dots = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => {}
            '.' => dots += 1,
            _ => return false,
        }
    }
    dots <= 1 && s.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tone_absent_sentinels() {
        let mut diags = Diagnostics::new();
        assert_eq!(parse_tone("None", &mut diags), None);
        assert_eq!(parse_tone("Off", &mut diags), None);
        assert_eq!(parse_tone("", &mut diags), None);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_tone_ctcss_and_dcs() {
        let mut diags = Diagnostics::new();
        assert_eq!(
            parse_tone("127.3", &mut diags),
            Some(Tone::Ctcss { freq: 127.3 })
        );
        assert_eq!(
            parse_tone("D023N", &mut diags),
            Some(Tone::Dcs {
                code: "D023N".to_string()
            })
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_tone_unknown_warns() {
        let mut diags = Diagnostics::new();
        assert_eq!(parse_tone("1e3", &mut diags), None);
        assert_eq!(diags.warnings().count(), 1);
    }

    #[test]
    fn test_format_tone() {
        assert_eq!(format_tone(None, "Off"), "Off");
        assert_eq!(format_tone(None, "None"), "None");
        assert_eq!(format_tone(Some(&Tone::Ctcss { freq: 127.3 }), "Off"), "127.3");
        assert_eq!(
            format_tone(
                Some(&Tone::Dcs {
                    code: "D023N".to_string()
                }),
                "Off"
            ),
            "D023N"
        );
    }

    #[test]
    fn test_parse_squelch() {
        let mut diags = Diagnostics::new();
        assert_eq!(parse_squelch("Disabled", &mut diags), Squelch::Default);
        assert_eq!(parse_squelch("Open", &mut diags), Squelch::Percent(0));
        assert_eq!(parse_squelch("Closed", &mut diags), Squelch::Percent(100));
        assert_eq!(parse_squelch("45%", &mut diags), Squelch::Percent(45));
        assert_eq!(parse_squelch("", &mut diags), Squelch::Default);
        assert!(diags.is_empty());

        assert_eq!(parse_squelch("Loud", &mut diags), Squelch::Default);
        assert_eq!(diags.warnings().count(), 1);
    }

    #[test]
    fn test_squelch_label_round_trip() {
        let mut diags = Diagnostics::new();
        for label in ["Disabled", "Open", "Closed", "45%"] {
            let squelch = parse_squelch(label, &mut diags);
            assert_eq!(format_squelch(squelch), label);
        }
        assert!(diags.is_empty());
    }
}
