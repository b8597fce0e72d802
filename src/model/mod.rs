//! The neutral codeplug data model.
//!
//! This is the vendor-independent document every adapter decodes into and
//! encodes from. All sequences are ordered; ordering is significant for
//! zone A/B selection and flattened member lists. Frequencies are exact
//! integer Hz — never floats, so repeated conversions and offset arithmetic
//! cannot drift. Cross-references (zone members, talkgroup list members,
//! channel contacts) are stored as names and resolved by linear lookup at
//! use time, which tolerates forward references and missing entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level container for one complete radio configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Codeplug {
    pub channels: Vec<Channel>,
    pub zones: Vec<Zone>,
    pub talkgroups: Vec<Talkgroup>,
    pub talkgroup_lists: Vec<TalkgroupList>,
}

impl Codeplug {
    /// Linear lookup of a channel by its display name.
    pub fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Linear lookup of a talkgroup by its display name.
    pub fn talkgroup_by_name(&self, name: &str) -> Option<&Talkgroup> {
        self.talkgroups.iter().find(|t| t.name == name)
    }
}

/// Channel operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelMode {
    FM,
    DMR,
}

/// One frequency/mode configuration entry.
///
/// Exactly one of `fm`/`dmr` is populated, matching `mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// 1-based vendor-assigned position, unique within a codeplug.
    pub index: u32,
    /// Display label. Vendor length-limited; must be unique so that zones
    /// and scan lists can reference channels by name.
    pub name: String,
    pub mode: ChannelMode,
    /// Receive frequency in integer Hz.
    pub freq_rx: u64,
    /// Transmit frequency in integer Hz.
    pub freq_tx: u64,
    /// Transmit power in milliwatts.
    pub power_mw: u32,
    pub rx_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fm: Option<FmChannel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmr: Option<DmrChannel>,
}

/// Analog (FM) channel parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmChannel {
    /// Channel bandwidth in Hz: 12_500 or 25_000.
    pub bandwidth_hz: u32,
    pub squelch: Squelch,
    #[serde(default)]
    pub tone_rx: Option<Tone>,
    #[serde(default)]
    pub tone_tx: Option<Tone>,
}

/// Digital (DMR) channel parameters.
///
/// A channel carries either a static contact (fixed timeslot traffic) or a
/// talkgroup list (dynamic timeslot reception), or neither — the validator
/// warns on the last case. Absence is modeled as `None`, never as the
/// vendor sentinel string `"None"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmrChannel {
    /// TDMA timeslot, 1 or 2.
    pub timeslot: u8,
    /// DMR color code, 0-15.
    pub color_code: u8,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub tg_list: Option<String>,
}

/// Sub-audible tone descriptor for analog squelch control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Tone {
    #[serde(rename = "CTCSS")]
    Ctcss { freq: f64 },
    #[serde(rename = "DCS")]
    Dcs { code: String },
}

/// Canonical squelch setting: the radio default, or a fixed percentage.
///
/// Serialized as `"Default"` or `"45%"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Squelch {
    Default,
    Percent(u8),
}

impl fmt::Display for Squelch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Squelch::Default => write!(f, "Default"),
            Squelch::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

impl From<Squelch> for String {
    fn from(squelch: Squelch) -> String {
        squelch.to_string()
    }
}

impl TryFrom<String> for Squelch {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "Default" {
            return Ok(Squelch::Default);
        }
        let pct = value
            .strip_suffix('%')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|&n| n <= 100)
            .ok_or_else(|| format!("invalid squelch value: {}", value))?;
        Ok(Squelch::Percent(pct))
    }
}

/// A DMR digital contact: numeric DMR ID plus display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talkgroup {
    pub id: u32,
    pub name: String,
}

/// Named ordered group of talkgroups, referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkgroupList {
    pub name: String,
    pub talkgroups: Vec<String>,
}

/// Named ordered group of channels, referenced by name.
///
/// The first member designates the vendor "A" selection, the second the
/// "B" selection (the first again when only one member exists).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub channels: Vec<String>,
}

impl Zone {
    /// The "A" channel selection: the first member.
    pub fn a_channel(&self) -> Option<&str> {
        self.channels.first().map(String::as_str)
    }

    /// The "B" channel selection: the second member, falling back to the
    /// first when the zone has only one channel.
    pub fn b_channel(&self) -> Option<&str> {
        self.channels
            .get(1)
            .or_else(|| self.channels.first())
            .map(String::as_str)
    }
}
