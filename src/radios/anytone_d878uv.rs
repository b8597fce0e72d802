//! AnyTone D878UV.
//!
//! CSV export layout (AnyTone CPS):
//!
//! `Channel.CSV`
//! - No.: channel index
//! - Channel Name: 16 characters
//! - Receive Frequency / Transmit Frequency: MHz
//! - Channel Type: [A-Analog, D-Digital]
//! - Transmit Power: [Turbo, High, Med, Low] — roughly 7 W, 5 W, 2.5 W, 1 W
//! - Band Width: [12.5K, 25K]
//! - CTCSS/DCS Decode / Encode: Off, or CTCSS frequency / DCS code
//! - Contact: DMR contact name
//! - Contact TG/DMR ID: DMR talkgroup ID
//! - Color Code: [0-15], Slot: [1, 2]
//! - Receive Group List: None or RX group list name
//! - PTT Prohibit: [Off, On]
//! - ...plus some forty fixed-value CPS columns (APRS, encryption, tones)
//!
//! `TalkGroups.CSV`: No., Radio ID, Name, Call Type, Call Alert.
//! `ReceiveGroupCallList.CSV`: No., Group Name, pipe-joined Contact and
//! Contact TG/DMR ID lists.
//! `ScanList.CSV`: No., Scan List Name, pipe-joined member/frequency lists,
//! priority settings, look-back and dropout timers.
//! `Zone.CSV`: No., Zone Name, pipe-joined member/frequency lists, and the
//! derived A/B channel selections with their frequencies.
//!
//! The CPS reads a directory through a manifest (`output.LST`) listing the
//! CSV files in import order.

use std::path::Path;

use crate::diag::Diagnostics;
use crate::error::{CodeplugError, Result};
use crate::model::{
    Channel, ChannelMode, Codeplug, DmrChannel, FmChannel, Squelch, Talkgroup, TalkgroupList,
    Zone,
};
use crate::units::{format_mhz, format_tone, parse_khz, parse_mhz, parse_tone};

use super::{
    create_output_dir, field, numeric_field, optional_name, read_export, split_members,
    write_manifest, Row,
};

const CHANNEL_FILE: &str = "Channel.CSV";
const TALKGROUPS_FILE: &str = "TalkGroups.CSV";
const RX_GROUPS_FILE: &str = "ReceiveGroupCallList.CSV";
const SCANLIST_FILE: &str = "ScanList.CSV";
const ZONE_FILE: &str = "Zone.CSV";
const MANIFEST_FILE: &str = "output.LST";

const SUPPORTED_MODES: &[ChannelMode] = &[ChannelMode::FM, ChannelMode::DMR];

// Scan-list revert timers are not part of the neutral model; the CPS
// defaults are written as adapter constants.
const LOOK_BACK_TIME_A: &str = "2";
const LOOK_BACK_TIME_B: &str = "3";
const DROPOUT_DELAY_TIME: &str = "3.1";
const PRIORITY_SAMPLE_TIME: &str = "3.1";

/// Power labels to milliwatts for decode.
const POWER_LEVELS: &[(&str, u32)] = &[
    ("Low", 1_000),
    ("Med", 2_500),
    ("High", 5_000),
    ("Turbo", 7_000),
];

fn parse_power(label: &str, diags: &mut Diagnostics) -> u32 {
    match POWER_LEVELS.iter().find(|(l, _)| *l == label) {
        Some((_, mw)) => *mw,
        None => {
            diags.warn(format!(
                "unknown power level: {}, using lowest tier (Low)",
                label
            ));
            POWER_LEVELS[0].1
        }
    }
}

/// Milliwatts to the vendor power tier, by half-open lower-bound interval.
/// Values above the top tier clamp to Turbo; values at or below the lowest
/// bound fall to Low with a warning.
fn export_power(power_mw: u32, diags: &mut Diagnostics) -> &'static str {
    match power_mw {
        mw if mw > 6_000 => "Turbo",
        mw if mw > 3_000 => "High",
        mw if mw > 1_500 => "Med",
        mw if mw > 400 => "Low",
        mw => {
            diags.warn(format!("unable to match power level: {} mW, using Low", mw));
            "Low"
        }
    }
}

/// Decode an AnyTone CPS CSV export directory into a neutral codeplug.
pub fn decode(input: &Path, diags: &mut Diagnostics) -> Result<Codeplug> {
    let mut codeplug = Codeplug::default();

    let rows = read_export(input, CHANNEL_FILE)?;
    for (num, row) in rows.iter().enumerate() {
        let line = num + 2;
        codeplug.channels.push(decode_channel(row, line, diags)?);
    }
    if codeplug.channels.is_empty() {
        return Err(CodeplugError::NoChannels);
    }
    diags.info(format!("parsed {} channels", codeplug.channels.len()));

    for (num, row) in read_export(input, TALKGROUPS_FILE)?.iter().enumerate() {
        let line = num + 2;
        codeplug.talkgroups.push(Talkgroup {
            id: numeric_field(row, "Radio ID", TALKGROUPS_FILE, line)?,
            name: field(row, "Name", TALKGROUPS_FILE, line)?.to_string(),
        });
    }
    diags.info(format!("parsed {} talkgroups", codeplug.talkgroups.len()));

    for (num, row) in read_export(input, RX_GROUPS_FILE)?.iter().enumerate() {
        let line = num + 2;
        codeplug.talkgroup_lists.push(TalkgroupList {
            name: field(row, "Group Name", RX_GROUPS_FILE, line)?.to_string(),
            talkgroups: split_members(field(row, "Contact", RX_GROUPS_FILE, line)?),
        });
    }
    diags.info(format!(
        "parsed {} talkgroup lists",
        codeplug.talkgroup_lists.len()
    ));

    for (num, row) in read_export(input, ZONE_FILE)?.iter().enumerate() {
        let line = num + 2;
        codeplug.zones.push(Zone {
            name: field(row, "Zone Name", ZONE_FILE, line)?.to_string(),
            channels: split_members(field(row, "Zone Channel Member", ZONE_FILE, line)?),
        });
    }
    diags.info(format!("parsed {} zones", codeplug.zones.len()));

    Ok(codeplug)
}

fn decode_channel(row: &Row, line: usize, diags: &mut Diagnostics) -> Result<Channel> {
    let channel_type = field(row, "Channel Type", CHANNEL_FILE, line)?;
    let mode = match channel_type {
        "A-Analog" => ChannelMode::FM,
        "D-Digital" => ChannelMode::DMR,
        other => {
            return Err(CodeplugError::MalformedRow {
                file: CHANNEL_FILE.to_string(),
                row: line,
                message: format!("unknown channel type: {}", other),
            })
        }
    };

    let freq_rx = parse_freq(row, "Receive Frequency", line)?;
    let freq_tx = parse_freq(row, "Transmit Frequency", line)?;

    let (fm, dmr) = match mode {
        ChannelMode::FM => {
            let bandwidth = field(row, "Band Width", CHANNEL_FILE, line)?;
            let bandwidth_hz = parse_khz(bandwidth.trim_end_matches('K')).ok_or_else(|| {
                CodeplugError::MalformedRow {
                    file: CHANNEL_FILE.to_string(),
                    row: line,
                    message: format!("invalid bandwidth: {}", bandwidth),
                }
            })? as u32;
            let fm = FmChannel {
                bandwidth_hz,
                // The CPS exports a squelch mode (Carrier / CTCSS), not a
                // level; the neutral model keeps the radio default.
                squelch: Squelch::Default,
                tone_rx: parse_tone(field(row, "CTCSS/DCS Decode", CHANNEL_FILE, line)?, diags),
                tone_tx: parse_tone(field(row, "CTCSS/DCS Encode", CHANNEL_FILE, line)?, diags),
            };
            (Some(fm), None)
        }
        ChannelMode::DMR => {
            let dmr = DmrChannel {
                timeslot: numeric_field(row, "Slot", CHANNEL_FILE, line)?,
                color_code: numeric_field(row, "Color Code", CHANNEL_FILE, line)?,
                contact: optional_name(field(row, "Contact", CHANNEL_FILE, line)?),
                tg_list: optional_name(field(row, "Receive Group List", CHANNEL_FILE, line)?),
            };
            (None, Some(dmr))
        }
    };

    Ok(Channel {
        index: numeric_field(row, "No.", CHANNEL_FILE, line)?,
        name: field(row, "Channel Name", CHANNEL_FILE, line)?.to_string(),
        mode,
        freq_rx,
        freq_tx,
        power_mw: parse_power(field(row, "Transmit Power", CHANNEL_FILE, line)?, diags),
        rx_only: field(row, "PTT Prohibit", CHANNEL_FILE, line)? == "On",
        fm,
        dmr,
    })
}

fn parse_freq(row: &Row, column: &str, line: usize) -> Result<u64> {
    let value = field(row, column, CHANNEL_FILE, line)?;
    parse_mhz(value)
        .filter(|&hz| hz > 0)
        .ok_or_else(|| CodeplugError::MalformedRow {
            file: CHANNEL_FILE.to_string(),
            row: line,
            message: format!("invalid frequency for {}: {}", column, value),
        })
}

/// Encode a neutral codeplug into an AnyTone CPS import directory.
pub fn encode(codeplug: &Codeplug, output: &Path, diags: &mut Diagnostics) -> Result<()> {
    create_output_dir(output)?;

    write_talkgroups(codeplug, output)?;
    write_rx_groups(codeplug, output)?;
    write_scanlists(codeplug, output, diags)?;
    write_zones(codeplug, output, diags)?;
    write_channels(codeplug, output, diags)?;

    // The CPS import order is alphabetical by file name.
    write_manifest(
        output,
        MANIFEST_FILE,
        &[
            CHANNEL_FILE,
            RX_GROUPS_FILE,
            SCANLIST_FILE,
            TALKGROUPS_FILE,
            ZONE_FILE,
        ],
    )?;
    Ok(())
}

fn write_talkgroups(codeplug: &Codeplug, output: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output.join(TALKGROUPS_FILE))?;
    writer.write_record(["No.", "Radio ID", "Name", "Call Type", "Call Alert"])?;
    for (num, talkgroup) in codeplug.talkgroups.iter().enumerate() {
        writer.write_record([
            (num + 1).to_string().as_str(),
            talkgroup.id.to_string().as_str(),
            talkgroup.name.as_str(),
            "Group Call",
            "None",
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_rx_groups(codeplug: &Codeplug, output: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output.join(RX_GROUPS_FILE))?;
    writer.write_record(["No.", "Group Name", "Contact", "Contact TG/DMR ID"])?;
    for (num, list) in codeplug.talkgroup_lists.iter().enumerate() {
        // Ids are resolved by name lookup at encode time; members without a
        // matching talkgroup simply contribute no id.
        let ids: Vec<String> = list
            .talkgroups
            .iter()
            .filter_map(|name| codeplug.talkgroup_by_name(name))
            .map(|tg| tg.id.to_string())
            .collect();
        writer.write_record([
            (num + 1).to_string().as_str(),
            list.name.as_str(),
            list.talkgroups.join("|").as_str(),
            ids.join("|").as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

// Pipe-joined RX/TX frequency lists parallel to a member-name list.
// Unresolvable names yield an empty slot so positions stay aligned.
fn member_freqs(codeplug: &Codeplug, members: &[String], rx: bool) -> String {
    members
        .iter()
        .map(|name| {
            codeplug
                .channel_by_name(name)
                .map(|c| format_mhz(if rx { c.freq_rx } else { c.freq_tx }))
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn write_scanlists(codeplug: &Codeplug, output: &Path, diags: &mut Diagnostics) -> Result<()> {
    let mut writer = csv::Writer::from_path(output.join(SCANLIST_FILE))?;
    writer.write_record([
        "No.",
        "Scan List Name",
        "Scan Channel Member",
        "Scan Channel Member RX Frequency",
        "Scan Channel Member TX Frequency",
        "Scan Mode",
        "Priority Channel Select",
        "Priority Channel 1",
        "Priority Channel 1 RX Frequency",
        "Priority Channel 1 TX Frequency",
        "Priority Channel 2",
        "Priority Channel 2 RX Frequency",
        "Priority Channel 2 TX Frequency",
        "Revert Channel",
        "Look Back Time A[s]",
        "Look Back Time B[s]",
        "Dropout Delay Time[s]",
        "Priority Sample Time[s]",
    ])?;

    for (num, zone) in codeplug.zones.iter().enumerate() {
        if zone.channels.is_empty() {
            diags.warn(format!("zone {} has no channels, skipping scan list", zone.name));
            continue;
        }
        writer.write_record([
            (num + 1).to_string().as_str(),
            zone.name.as_str(),
            zone.channels.join("|").as_str(),
            member_freqs(codeplug, &zone.channels, true).as_str(),
            member_freqs(codeplug, &zone.channels, false).as_str(),
            "Off",
            "Off",
            "Off",
            "",
            "",
            "Off",
            "",
            "",
            "Selected",
            LOOK_BACK_TIME_A,
            LOOK_BACK_TIME_B,
            DROPOUT_DELAY_TIME,
            PRIORITY_SAMPLE_TIME,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_zones(codeplug: &Codeplug, output: &Path, diags: &mut Diagnostics) -> Result<()> {
    let mut writer = csv::Writer::from_path(output.join(ZONE_FILE))?;
    writer.write_record([
        "No.",
        "Zone Name",
        "Zone Channel Member",
        "Zone Channel Member RX Frequency",
        "Zone Channel Member TX Frequency",
        "A Channel",
        "A Channel RX Frequency",
        "A Channel TX Frequency",
        "B Channel",
        "B Channel RX Frequency",
        "B Channel TX Frequency",
        "Zone Hide",
    ])?;

    for (num, zone) in codeplug.zones.iter().enumerate() {
        // A/B selections are recomputed from member order on every export;
        // there is no stored copy to fall out of sync.
        let (a_channel, b_channel) = match (zone.a_channel(), zone.b_channel()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                diags.warn(format!("zone {} has no channels, skipping", zone.name));
                continue;
            }
        };
        let freq_of = |name: &str, rx: bool| {
            codeplug
                .channel_by_name(name)
                .map(|c| format_mhz(if rx { c.freq_rx } else { c.freq_tx }))
                .unwrap_or_default()
        };
        writer.write_record([
            (num + 1).to_string().as_str(),
            zone.name.as_str(),
            zone.channels.join("|").as_str(),
            member_freqs(codeplug, &zone.channels, true).as_str(),
            member_freqs(codeplug, &zone.channels, false).as_str(),
            a_channel,
            freq_of(a_channel, true).as_str(),
            freq_of(a_channel, false).as_str(),
            b_channel,
            freq_of(b_channel, true).as_str(),
            freq_of(b_channel, false).as_str(),
            "0",
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_channels(codeplug: &Codeplug, output: &Path, diags: &mut Diagnostics) -> Result<()> {
    let mut writer = csv::Writer::from_path(output.join(CHANNEL_FILE))?;
    writer.write_record([
        "No.",
        "Channel Name",
        "Receive Frequency",
        "Transmit Frequency",
        "Channel Type",
        "Transmit Power",
        "Band Width",
        "CTCSS/DCS Decode",
        "CTCSS/DCS Encode",
        "Contact",
        "Contact Call Type",
        "Contact TG/DMR ID",
        "Radio ID",
        "Busy Lock/TX Permit",
        "Squelch Mode",
        "Optional Signal",
        "DTMF ID",
        "2Tone ID",
        "5Tone ID",
        "PTT ID",
        "Color Code",
        "Slot",
        "Scan List",
        "Receive Group List",
        "PTT Prohibit",
        "Reverse",
        "Simplex TDMA",
        "Slot Suit",
        "AES Digital Encryption",
        "Digital Encryption Type",
        "Call Confirmation",
        "Talk Around(Simplex)",
        "Work Alone",
        "Custom CTCSS",
        "2TONE Decode",
        "Ranging",
        "Through Mode",
        "APRS RX",
        "Analog APRS PTT Mode",
        "Digital APRS PTT Mode",
        "APRS Report Type",
        "Digital APRS Report Channel",
        "Correct Frequency[Hz]",
        "SMS Confirmation",
        "Exclude channel from roaming",
        "DMR MODE",
        "DataACK Disable",
        "R5toneBot",
        "R5ToneEot",
        "Auto Scan",
        "Ana Aprs Mute",
        "Send Talker Alias",
        "AnaAprsTxPath",
        "ARC4",
        "ex_emg_kind",
    ])?;

    for channel in &codeplug.channels {
        if !SUPPORTED_MODES.contains(&channel.mode) {
            diags.warn(format!(
                "skipping channel {} ({}): unsupported mode {:?}",
                channel.index, channel.name, channel.mode
            ));
            continue;
        }
        let row = match (channel.mode, &channel.fm, &channel.dmr) {
            (ChannelMode::FM, Some(fm), _) => channel_row(channel, diags, FmFields(fm)),
            (ChannelMode::DMR, _, Some(dmr)) => channel_row(channel, diags, DmrFields(dmr)),
            _ => {
                diags.warn(format!(
                    "skipping channel {} ({}): no parameters for mode {:?}",
                    channel.index, channel.name, channel.mode
                ));
                continue;
            }
        };
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

// Mode-specific column values for Channel.CSV.
struct FmFields<'a>(&'a FmChannel);
struct DmrFields<'a>(&'a DmrChannel);

trait ModeFields {
    fn channel_type(&self) -> &'static str;
    fn band_width(&self) -> String;
    fn tone_rx(&self) -> String;
    fn tone_tx(&self) -> String;
    fn contact(&self) -> String;
    fn rx_group_list(&self) -> String;
    fn color_code(&self) -> String;
    fn slot(&self) -> String;
}

impl ModeFields for FmFields<'_> {
    fn channel_type(&self) -> &'static str {
        "A-Analog"
    }
    fn band_width(&self) -> String {
        if self.0.bandwidth_hz == 25_000 { "25K" } else { "12.5K" }.to_string()
    }
    fn tone_rx(&self) -> String {
        format_tone(self.0.tone_rx.as_ref(), "Off")
    }
    fn tone_tx(&self) -> String {
        format_tone(self.0.tone_tx.as_ref(), "Off")
    }
    fn contact(&self) -> String {
        "0 None".to_string()
    }
    fn rx_group_list(&self) -> String {
        "None".to_string()
    }
    fn color_code(&self) -> String {
        "0".to_string()
    }
    fn slot(&self) -> String {
        "1".to_string()
    }
}

impl ModeFields for DmrFields<'_> {
    fn channel_type(&self) -> &'static str {
        "D-Digital"
    }
    fn band_width(&self) -> String {
        "25K".to_string()
    }
    fn tone_rx(&self) -> String {
        "Off".to_string()
    }
    fn tone_tx(&self) -> String {
        "Off".to_string()
    }
    fn contact(&self) -> String {
        self.0.contact.clone().unwrap_or_else(|| "None".to_string())
    }
    fn rx_group_list(&self) -> String {
        self.0.tg_list.clone().unwrap_or_else(|| "None".to_string())
    }
    fn color_code(&self) -> String {
        self.0.color_code.to_string()
    }
    fn slot(&self) -> String {
        self.0.timeslot.to_string()
    }
}

fn channel_row(channel: &Channel, diags: &mut Diagnostics, fields: impl ModeFields) -> Vec<String> {
    vec![
        channel.index.to_string(),
        channel.name.clone(),
        format_mhz(channel.freq_rx),
        format_mhz(channel.freq_tx),
        fields.channel_type().to_string(),
        export_power(channel.power_mw, diags).to_string(),
        fields.band_width(),
        fields.tone_rx(),
        fields.tone_tx(),
        fields.contact(),
        "Group Call".to_string(),
        "0".to_string(),
        "None".to_string(), // Radio ID slot name, set in the CPS
        "Off".to_string(),
        "Carrier".to_string(),
        "Off".to_string(),
        "1".to_string(),
        "1".to_string(),
        "1".to_string(),
        "Off".to_string(),
        fields.color_code(),
        fields.slot(),
        "None".to_string(),
        fields.rx_group_list(),
        if channel.rx_only { "On" } else { "Off" }.to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "Normal Encryption".to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "251.1".to_string(),
        "0".to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "Off".to_string(),
        "1".to_string(),
        "0".to_string(),
        "Off".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
    ]
}
