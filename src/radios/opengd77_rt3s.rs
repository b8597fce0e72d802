//! Retevis RT3S running the OpenGD77 community firmware.
//!
//! CSV export layout (OpenGD77 CPS):
//!
//! `Channels.csv`
//! - Channel Number
//! - Channel Name: 15 characters
//! - Channel Type: [Analogue, Digital]
//! - Rx Frequency / Tx Frequency: MHz, 5 decimal places
//! - Bandwidth (kHz): [12.5, 25], blank for digital channels
//! - Colour Code: [0-15], blank for analog channels
//! - Timeslot: [1, 2], blank for analog channels
//! - Contact: DMR contact, set for static TS, None for dynamic TS
//! - TG List: DMR talkgroup list, set for dynamic TS, None for static TS
//! - DMR ID: generally left on None
//! - RX Tone / TX Tone: None, or CTCSS frequency in Hz / DCS code
//! - Squelch: None, Disabled, Open, 5%-95%, or Closed; blank for digital
//! - Power: P1-P9, -W+, or Master
//! - Rx Only / Zone Skip / All Skip: [Yes, No]
//!
//! `Zones.csv`: Zone Name, then Channel1..Channel80.
//! `Contacts.csv`: Contact Name, ID, ID Type, TS Override.
//! `TG_Lists.csv`: TG List Name, then Contact1..Contact32.

use std::path::Path;

use crate::diag::Diagnostics;
use crate::error::{CodeplugError, Result};
use crate::model::{
    Channel, ChannelMode, Codeplug, DmrChannel, FmChannel, Talkgroup, TalkgroupList, Zone,
};
use crate::units::{
    format_bandwidth_khz, format_squelch, format_tone, parse_khz, parse_mhz, parse_squelch,
    parse_tone,
};

use super::{
    collect_numbered, create_output_dir, field, numeric_field, optional_name, read_export,
    write_manifest, Row,
};

const CHANNELS_FILE: &str = "Channels.csv";
const ZONES_FILE: &str = "Zones.csv";
const CONTACTS_FILE: &str = "Contacts.csv";
const TG_LISTS_FILE: &str = "TG_Lists.csv";
const MANIFEST_FILE: &str = "output.LST";

/// Vendor caps for the numbered member-column families.
const ZONE_MAX_CHANNELS: usize = 80;
const TG_LIST_MAX_CONTACTS: usize = 32;

/// OpenGD77 power levels, lowest tier first.
const POWER_LEVELS: &[(&str, u32)] = &[
    ("P1", 50),
    ("P2", 250),
    ("P3", 500),
    ("P4", 750),
    ("P5", 1_000),
    ("P6", 2_000),
    ("P7", 3_000),
    ("P8", 4_000),
    ("P9", 5_000),
];

fn parse_power(label: &str, diags: &mut Diagnostics) -> u32 {
    // "Master" follows the radio-wide master setting, "-W+" is the 5W+
    // position; both are treated as the 5 W tier.
    if label == "Master" || label == "-W+" {
        return 5_000;
    }
    match POWER_LEVELS.iter().find(|(l, _)| *l == label) {
        Some((_, mw)) => *mw,
        None => {
            // The radio must receive some valid power value; fall back to
            // the lowest tier rather than failing the row.
            diags.warn(format!(
                "unknown power level: {}, using lowest tier (P1)",
                label
            ));
            POWER_LEVELS[0].1
        }
    }
}

fn format_power(power_mw: u32, diags: &mut Diagnostics) -> &'static str {
    if power_mw < POWER_LEVELS[0].1 {
        diags.warn(format!(
            "power {} mW below lowest tier, using P1",
            power_mw
        ));
        return POWER_LEVELS[0].0;
    }
    // Highest tier whose value does not exceed the requested power.
    POWER_LEVELS
        .iter()
        .rev()
        .find(|(_, mw)| *mw <= power_mw)
        .map(|(label, _)| *label)
        .unwrap_or(POWER_LEVELS[0].0)
}

// OpenGD77 exports frequencies with 5 fractional digits.
fn format_mhz_gd77(hz: u64) -> String {
    format!("{}.{:05}", hz / 1_000_000, (hz % 1_000_000) / 10)
}

/// Decode an OpenGD77 CPS CSV export directory into a neutral codeplug.
pub fn decode(input: &Path, diags: &mut Diagnostics) -> Result<Codeplug> {
    let mut codeplug = Codeplug::default();

    let rows = read_export(input, CHANNELS_FILE)?;
    for (num, row) in rows.iter().enumerate() {
        let line = num + 2; // line 1 is the header
        codeplug.channels.push(decode_channel(row, line, diags)?);
    }
    if codeplug.channels.is_empty() {
        return Err(CodeplugError::NoChannels);
    }
    diags.info(format!("parsed {} channels", codeplug.channels.len()));

    for (num, row) in read_export(input, ZONES_FILE)?.iter().enumerate() {
        let line = num + 2;
        codeplug.zones.push(Zone {
            name: field(row, "Zone Name", ZONES_FILE, line)?.to_string(),
            channels: collect_numbered(row, "Channel", ZONE_MAX_CHANNELS),
        });
    }
    diags.info(format!("parsed {} zones", codeplug.zones.len()));

    for (num, row) in read_export(input, CONTACTS_FILE)?.iter().enumerate() {
        let line = num + 2;
        codeplug.talkgroups.push(Talkgroup {
            id: numeric_field(row, "ID", CONTACTS_FILE, line)?,
            name: field(row, "Contact Name", CONTACTS_FILE, line)?.to_string(),
        });
    }
    diags.info(format!("parsed {} talkgroups", codeplug.talkgroups.len()));

    for (num, row) in read_export(input, TG_LISTS_FILE)?.iter().enumerate() {
        let line = num + 2;
        codeplug.talkgroup_lists.push(TalkgroupList {
            name: field(row, "TG List Name", TG_LISTS_FILE, line)?.to_string(),
            talkgroups: collect_numbered(row, "Contact", TG_LIST_MAX_CONTACTS),
        });
    }
    diags.info(format!(
        "parsed {} talkgroup lists",
        codeplug.talkgroup_lists.len()
    ));

    Ok(codeplug)
}

fn decode_channel(row: &Row, line: usize, diags: &mut Diagnostics) -> Result<Channel> {
    let mode = if field(row, "Channel Type", CHANNELS_FILE, line)? == "Digital" {
        ChannelMode::DMR
    } else {
        ChannelMode::FM
    };

    let freq_rx = parse_freq(row, "Rx Frequency", line)?;
    let freq_tx = parse_freq(row, "Tx Frequency", line)?;

    let (fm, dmr) = match mode {
        ChannelMode::FM => {
            let bandwidth = field(row, "Bandwidth (kHz)", CHANNELS_FILE, line)?;
            let bandwidth_hz =
                parse_khz(bandwidth).ok_or_else(|| CodeplugError::MalformedRow {
                    file: CHANNELS_FILE.to_string(),
                    row: line,
                    message: format!("invalid bandwidth: {}", bandwidth),
                })? as u32;
            let fm = FmChannel {
                bandwidth_hz,
                squelch: parse_squelch(field(row, "Squelch", CHANNELS_FILE, line)?, diags),
                tone_rx: parse_tone(field(row, "RX Tone", CHANNELS_FILE, line)?, diags),
                tone_tx: parse_tone(field(row, "TX Tone", CHANNELS_FILE, line)?, diags),
            };
            (Some(fm), None)
        }
        ChannelMode::DMR => {
            let dmr = DmrChannel {
                timeslot: numeric_field(row, "Timeslot", CHANNELS_FILE, line)?,
                color_code: numeric_field(row, "Colour Code", CHANNELS_FILE, line)?,
                contact: optional_name(field(row, "Contact", CHANNELS_FILE, line)?),
                tg_list: optional_name(field(row, "TG List", CHANNELS_FILE, line)?),
            };
            (None, Some(dmr))
        }
    };

    Ok(Channel {
        index: numeric_field(row, "Channel Number", CHANNELS_FILE, line)?,
        name: field(row, "Channel Name", CHANNELS_FILE, line)?.to_string(),
        mode,
        freq_rx,
        freq_tx,
        power_mw: parse_power(field(row, "Power", CHANNELS_FILE, line)?, diags),
        rx_only: field(row, "Rx Only", CHANNELS_FILE, line)? == "Yes",
        fm,
        dmr,
    })
}

fn parse_freq(row: &Row, column: &str, line: usize) -> Result<u64> {
    let value = field(row, column, CHANNELS_FILE, line)?;
    // A frequency of zero is as useless to the radio as an unparseable one.
    parse_mhz(value)
        .filter(|&hz| hz > 0)
        .ok_or_else(|| CodeplugError::MalformedRow {
            file: CHANNELS_FILE.to_string(),
            row: line,
            message: format!("invalid frequency for {}: {}", column, value),
        })
}

/// Encode a neutral codeplug into an OpenGD77 CPS import directory.
pub fn encode(codeplug: &Codeplug, output: &Path, diags: &mut Diagnostics) -> Result<()> {
    create_output_dir(output)?;

    write_channels(codeplug, output, diags)?;
    write_zones(codeplug, output)?;
    write_contacts(codeplug, output)?;
    write_tg_lists(codeplug, output)?;

    write_manifest(
        output,
        MANIFEST_FILE,
        &[CHANNELS_FILE, CONTACTS_FILE, TG_LISTS_FILE, ZONES_FILE],
    )?;
    Ok(())
}

fn write_channels(codeplug: &Codeplug, output: &Path, diags: &mut Diagnostics) -> Result<()> {
    let mut writer = csv::Writer::from_path(output.join(CHANNELS_FILE))?;
    writer.write_record([
        "Channel Number",
        "Channel Name",
        "Channel Type",
        "Rx Frequency",
        "Tx Frequency",
        "Bandwidth (kHz)",
        "Colour Code",
        "Timeslot",
        "Contact",
        "TG List",
        "DMR ID",
        "TS1_TA_Tx",
        "TS2_TA_Tx ID",
        "RX Tone",
        "TX Tone",
        "Squelch",
        "Power",
        "Rx Only",
        "Zone Skip",
        "All Skip",
        "TOT",
        "VOX",
        "No Beep",
        "No Eco",
        "APRS",
        "Latitude",
        "Longitude",
        "Use location",
    ])?;

    for channel in &codeplug.channels {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };
        let row = match (channel.mode, &channel.fm, &channel.dmr) {
            (ChannelMode::FM, Some(fm), _) => vec![
                channel.index.to_string(),
                channel.name.clone(),
                "Analogue".to_string(),
                format_mhz_gd77(channel.freq_rx),
                format_mhz_gd77(channel.freq_tx),
                format_bandwidth_khz(fm.bandwidth_hz),
                String::new(), // Colour Code
                String::new(), // Timeslot
                String::new(), // Contact
                String::new(), // TG List
                String::new(), // DMR ID
                String::new(), // TS1_TA_Tx
                String::new(), // TS2_TA_Tx ID
                format_tone(fm.tone_rx.as_ref(), "None"),
                format_tone(fm.tone_tx.as_ref(), "None"),
                format_squelch(fm.squelch),
                format_power(channel.power_mw, diags).to_string(),
                yes_no(channel.rx_only).to_string(),
                "No".to_string(),
                "No".to_string(),
                "0".to_string(),
                "Off".to_string(),
                "No".to_string(),
                "No".to_string(),
                "None".to_string(),
                "0".to_string(),
                "0".to_string(),
                "No".to_string(),
            ],
            (ChannelMode::DMR, _, Some(dmr)) => vec![
                channel.index.to_string(),
                channel.name.clone(),
                "Digital".to_string(),
                format_mhz_gd77(channel.freq_rx),
                format_mhz_gd77(channel.freq_tx),
                String::new(), // Bandwidth
                dmr.color_code.to_string(),
                dmr.timeslot.to_string(),
                dmr.contact.clone().unwrap_or_else(|| "None".to_string()),
                dmr.tg_list.clone().unwrap_or_else(|| "None".to_string()),
                "None".to_string(), // DMR ID
                "Off".to_string(),  // TS1_TA_Tx
                "Off".to_string(),  // TS2_TA_Tx ID
                String::new(),      // RX Tone
                String::new(),      // TX Tone
                String::new(),      // Squelch
                format_power(channel.power_mw, diags).to_string(),
                yes_no(channel.rx_only).to_string(),
                "No".to_string(),
                "No".to_string(),
                "0".to_string(),
                "Off".to_string(),
                "No".to_string(),
                "No".to_string(),
                "None".to_string(),
                "0".to_string(),
                "0".to_string(),
                "No".to_string(),
            ],
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

fn write_zones(codeplug: &Codeplug, output: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output.join(ZONES_FILE))?;
    let mut header = vec!["Zone Name".to_string()];
    header.extend((1..=ZONE_MAX_CHANNELS).map(|i| format!("Channel{}", i)));
    writer.write_record(&header)?;

    for zone in &codeplug.zones {
        let mut row = vec![zone.name.clone()];
        // Unflatten back into the fixed column family, padding with blanks.
        for i in 0..ZONE_MAX_CHANNELS {
            row.push(zone.channels.get(i).cloned().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_contacts(codeplug: &Codeplug, output: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output.join(CONTACTS_FILE))?;
    writer.write_record(["Contact Name", "ID", "ID Type", "TS Override"])?;
    for talkgroup in &codeplug.talkgroups {
        writer.write_record([
            talkgroup.name.as_str(),
            talkgroup.id.to_string().as_str(),
            "Group",
            "Disabled",
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_tg_lists(codeplug: &Codeplug, output: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output.join(TG_LISTS_FILE))?;
    let mut header = vec!["TG List Name".to_string()];
    header.extend((1..=TG_LIST_MAX_CONTACTS).map(|i| format!("Contact{}", i)));
    writer.write_record(&header)?;

    for list in &codeplug.talkgroup_lists {
        let mut row = vec![list.name.clone()];
        for i in 0..TG_LIST_MAX_CONTACTS {
            row.push(list.talkgroups.get(i).cloned().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_power_table() {
        let mut diags = Diagnostics::new();
        assert_eq!(parse_power("P1", &mut diags), 50);
        assert_eq!(parse_power("P5", &mut diags), 1_000);
        assert_eq!(parse_power("P9", &mut diags), 5_000);
        assert_eq!(parse_power("Master", &mut diags), 5_000);
        assert_eq!(parse_power("-W+", &mut diags), 5_000);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_power_unknown_falls_back_to_lowest_tier() {
        let mut diags = Diagnostics::new();
        assert_eq!(parse_power("MegaBlast", &mut diags), 50);
        assert_eq!(diags.warnings().count(), 1);
        assert!(diags.warnings().next().unwrap().message.contains("MegaBlast"));
    }

    #[test]
    fn test_format_power_nearest_lower_tier() {
        let mut diags = Diagnostics::new();
        assert_eq!(format_power(5_000, &mut diags), "P9");
        assert_eq!(format_power(1_200, &mut diags), "P5");
        assert_eq!(format_power(50, &mut diags), "P1");
        assert!(diags.is_empty());

        assert_eq!(format_power(10, &mut diags), "P1");
        assert_eq!(diags.warnings().count(), 1);
    }

    #[test]
    fn test_format_mhz_gd77_five_digits() {
        assert_eq!(format_mhz_gd77(146_010_000), "146.01000");
        assert_eq!(format_mhz_gd77(446_093_750), "446.09375");
    }
}
