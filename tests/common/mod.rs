//! Shared test fixtures: vendor CSV export trees and sample codeplugs

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use replug::model::{
    Channel, ChannelMode, Codeplug, DmrChannel, FmChannel, Squelch, Talkgroup, TalkgroupList,
    Tone, Zone,
};

/// Write a small OpenGD77 CPS export into `dir` and return its path.
///
/// Contains two analog channels (one simplex, one 600 kHz repeater pair),
/// one digital channel, a zone with a blank member cell, two contacts, and
/// one talkgroup list.
pub fn write_rt3s_export(dir: &Path) -> PathBuf {
    fs::write(
        dir.join("Channels.csv"),
        "\
Channel Number,Channel Name,Channel Type,Rx Frequency,Tx Frequency,Bandwidth (kHz),Colour Code,Timeslot,Contact,TG List,DMR ID,TS1_TA_Tx,TS2_TA_Tx ID,RX Tone,TX Tone,Squelch,Power,Rx Only,Zone Skip,All Skip,TOT,VOX
1,Simplex 2m,Analogue,146.52000,146.52000,25,,,,,,,,None,None,Disabled,P9,No,No,No,0,Off
2,Repeater 2m,Analogue,146.01000,146.61000,12.5,,,,,,,,88.5,88.5,5%,Master,No,No,No,0,Off
3,DMR TG91,Digital,441.00000,446.00000,,1,2,None,World,None,Off,Off,,,,P5,No,No,No,0,Off
",
    )
    .unwrap();

    fs::write(
        dir.join("Zones.csv"),
        "\
Zone Name,Channel1,Channel2,Channel3,Channel4
Local,Simplex 2m,Repeater 2m,,DMR TG91
",
    )
    .unwrap();

    fs::write(
        dir.join("Contacts.csv"),
        "\
Contact Name,ID,ID Type,TS Override
World,91,Group,Disabled
Local 9,9,Group,Disabled
",
    )
    .unwrap();

    fs::write(
        dir.join("TG_Lists.csv"),
        "\
TG List Name,Contact1,Contact2,Contact3
World,World,Local 9,
",
    )
    .unwrap();

    dir.to_path_buf()
}

pub fn fm_channel(index: u32, name: &str, freq_rx: u64, freq_tx: u64) -> Channel {
    Channel {
        index,
        name: name.to_string(),
        mode: ChannelMode::FM,
        freq_rx,
        freq_tx,
        power_mw: 5_000,
        rx_only: false,
        fm: Some(FmChannel {
            bandwidth_hz: 25_000,
            squelch: Squelch::Default,
            tone_rx: None,
            tone_tx: None,
        }),
        dmr: None,
    }
}

pub fn dmr_channel(index: u32, name: &str, freq_rx: u64, freq_tx: u64) -> Channel {
    Channel {
        index,
        name: name.to_string(),
        mode: ChannelMode::DMR,
        freq_rx,
        freq_tx,
        power_mw: 1_000,
        rx_only: false,
        fm: None,
        dmr: Some(DmrChannel {
            timeslot: 2,
            color_code: 1,
            contact: None,
            tg_list: Some("World".to_string()),
        }),
    }
}

/// A small, fully consistent codeplug: produces no validation warnings.
pub fn sample_codeplug() -> Codeplug {
    let mut repeater = fm_channel(2, "Repeater 2m", 146_010_000, 146_610_000);
    repeater.fm.as_mut().unwrap().squelch = Squelch::Percent(5);
    repeater.fm.as_mut().unwrap().tone_rx = Some(Tone::Ctcss { freq: 88.5 });
    repeater.fm.as_mut().unwrap().tone_tx = Some(Tone::Ctcss { freq: 88.5 });

    Codeplug {
        channels: vec![
            fm_channel(1, "Simplex 2m", 146_520_000, 146_520_000),
            repeater,
            dmr_channel(3, "DMR TG91", 441_000_000, 446_000_000),
        ],
        zones: vec![Zone {
            name: "Local".to_string(),
            channels: vec![
                "Simplex 2m".to_string(),
                "Repeater 2m".to_string(),
                "DMR TG91".to_string(),
            ],
        }],
        talkgroups: vec![
            Talkgroup {
                id: 91,
                name: "World".to_string(),
            },
            Talkgroup {
                id: 9,
                name: "Local 9".to_string(),
            },
        ],
        talkgroup_lists: vec![TalkgroupList {
            name: "World".to_string(),
            talkgroups: vec!["World".to_string(), "Local 9".to_string()],
        }],
    }
}
