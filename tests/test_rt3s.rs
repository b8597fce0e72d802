//! Tests for the Retevis RT3S (OpenGD77) adapter

mod common;

use replug::diag::Diagnostics;
use replug::error::CodeplugError;
use replug::model::{ChannelMode, Squelch, Tone};
use replug::radios::opengd77_rt3s;
use tempfile::TempDir;

#[test]
fn test_decode_full_export() {
    let temp_dir = TempDir::new().unwrap();
    common::write_rt3s_export(temp_dir.path());

    let mut diags = Diagnostics::new();
    let codeplug = opengd77_rt3s::decode(temp_dir.path(), &mut diags).unwrap();

    assert_eq!(codeplug.channels.len(), 3);
    assert_eq!(codeplug.zones.len(), 1);
    assert_eq!(codeplug.talkgroups.len(), 2);
    assert_eq!(codeplug.talkgroup_lists.len(), 1);
    assert!(!diags.has_errors());
    assert_eq!(diags.warnings().count(), 0);
}

#[test]
fn test_decode_analog_channel_fields() {
    let temp_dir = TempDir::new().unwrap();
    common::write_rt3s_export(temp_dir.path());

    let mut diags = Diagnostics::new();
    let codeplug = opengd77_rt3s::decode(temp_dir.path(), &mut diags).unwrap();

    let simplex = &codeplug.channels[0];
    assert_eq!(simplex.index, 1);
    assert_eq!(simplex.name, "Simplex 2m");
    assert_eq!(simplex.mode, ChannelMode::FM);
    assert_eq!(simplex.freq_rx, 146_520_000);
    assert_eq!(simplex.freq_tx, 146_520_000);
    assert_eq!(simplex.power_mw, 5_000); // P9
    assert!(!simplex.rx_only);
    let fm = simplex.fm.as_ref().unwrap();
    assert_eq!(fm.bandwidth_hz, 25_000);
    assert_eq!(fm.squelch, Squelch::Default);
    assert_eq!(fm.tone_rx, None);
    assert!(simplex.dmr.is_none());

    let repeater = &codeplug.channels[1];
    let fm = repeater.fm.as_ref().unwrap();
    assert_eq!(repeater.freq_rx, 146_010_000);
    assert_eq!(repeater.freq_tx, 146_610_000);
    assert_eq!(fm.bandwidth_hz, 12_500);
    assert_eq!(fm.squelch, Squelch::Percent(5));
    assert_eq!(fm.tone_rx, Some(Tone::Ctcss { freq: 88.5 }));
}

#[test]
fn test_decode_digital_channel_fields() {
    let temp_dir = TempDir::new().unwrap();
    common::write_rt3s_export(temp_dir.path());

    let mut diags = Diagnostics::new();
    let codeplug = opengd77_rt3s::decode(temp_dir.path(), &mut diags).unwrap();

    let digital = &codeplug.channels[2];
    assert_eq!(digital.mode, ChannelMode::DMR);
    let dmr = digital.dmr.as_ref().unwrap();
    assert_eq!(dmr.timeslot, 2);
    assert_eq!(dmr.color_code, 1);
    // The vendor sentinel "None" becomes tagged absence, not a string.
    assert_eq!(dmr.contact, None);
    assert_eq!(dmr.tg_list, Some("World".to_string()));
    assert!(digital.fm.is_none());
}

#[test]
fn test_decode_flattens_zone_members_skipping_blanks() {
    let temp_dir = TempDir::new().unwrap();
    common::write_rt3s_export(temp_dir.path());

    let mut diags = Diagnostics::new();
    let codeplug = opengd77_rt3s::decode(temp_dir.path(), &mut diags).unwrap();

    // Channel3 is blank in the fixture: skipped, order preserved, no gap.
    assert_eq!(
        codeplug.zones[0].channels,
        vec!["Simplex 2m", "Repeater 2m", "DMR TG91"]
    );
    assert_eq!(
        codeplug.talkgroup_lists[0].talkgroups,
        vec!["World", "Local 9"]
    );
}

#[test]
fn test_decode_missing_contacts_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    common::write_rt3s_export(temp_dir.path());
    std::fs::remove_file(temp_dir.path().join("Contacts.csv")).unwrap();

    let mut diags = Diagnostics::new();
    let err = opengd77_rt3s::decode(temp_dir.path(), &mut diags).unwrap_err();
    match err {
        CodeplugError::MissingExportFile { path } => {
            assert!(path.ends_with("Contacts.csv"), "got {:?}", path);
        }
        other => panic!("expected MissingExportFile, got {:?}", other),
    }
}

#[test]
fn test_decode_zero_channels_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    common::write_rt3s_export(temp_dir.path());
    std::fs::write(
        temp_dir.path().join("Channels.csv"),
        "Channel Number,Channel Name,Channel Type,Rx Frequency,Tx Frequency,Bandwidth (kHz),Colour Code,Timeslot,Contact,TG List,RX Tone,TX Tone,Squelch,Power,Rx Only\n",
    )
    .unwrap();

    let mut diags = Diagnostics::new();
    let err = opengd77_rt3s::decode(temp_dir.path(), &mut diags).unwrap_err();
    assert!(matches!(err, CodeplugError::NoChannels));
}

#[test]
fn test_decode_zero_frequency_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    common::write_rt3s_export(temp_dir.path());
    std::fs::write(
        temp_dir.path().join("Channels.csv"),
        "\
Channel Number,Channel Name,Channel Type,Rx Frequency,Tx Frequency,Bandwidth (kHz),Colour Code,Timeslot,Contact,TG List,RX Tone,TX Tone,Squelch,Power,Rx Only
1,Simplex 2m,Analogue,0.00000,146.52000,25,,,,,None,None,Disabled,P9,No
",
    )
    .unwrap();

    let mut diags = Diagnostics::new();
    let err = opengd77_rt3s::decode(temp_dir.path(), &mut diags).unwrap_err();
    match err {
        CodeplugError::MalformedRow { message, .. } => {
            assert!(message.contains("Rx Frequency"), "got {}", message);
        }
        other => panic!("expected MalformedRow, got {:?}", other),
    }
}

#[test]
fn test_decode_unknown_power_label_falls_back_with_warning() {
    let temp_dir = TempDir::new().unwrap();
    common::write_rt3s_export(temp_dir.path());
    std::fs::write(
        temp_dir.path().join("Channels.csv"),
        "\
Channel Number,Channel Name,Channel Type,Rx Frequency,Tx Frequency,Bandwidth (kHz),Colour Code,Timeslot,Contact,TG List,RX Tone,TX Tone,Squelch,Power,Rx Only
1,Simplex 2m,Analogue,146.52000,146.52000,25,,,,,None,None,Disabled,MegaBlast,No
",
    )
    .unwrap();

    let mut diags = Diagnostics::new();
    let codeplug = opengd77_rt3s::decode(temp_dir.path(), &mut diags).unwrap();

    // Deliberate silent fallback: the radio must get some valid power.
    assert_eq!(codeplug.channels[0].power_mw, 50);
    let warning = diags.warnings().next().unwrap();
    assert!(warning.message.contains("MegaBlast"));
}

#[test]
fn test_encode_refuses_existing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("export");
    std::fs::create_dir(&output).unwrap();

    let mut diags = Diagnostics::new();
    let err = opengd77_rt3s::encode(&common::sample_codeplug(), &output, &mut diags).unwrap_err();
    assert!(matches!(err, CodeplugError::OutputExists { .. }));
}

#[test]
fn test_encode_decode_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("export");
    let original = common::sample_codeplug();

    let mut diags = Diagnostics::new();
    opengd77_rt3s::encode(&original, &output, &mut diags).unwrap();
    assert_eq!(diags.warnings().count(), 0);

    let mut diags = Diagnostics::new();
    let decoded = opengd77_rt3s::decode(&output, &mut diags).unwrap();

    assert_eq!(decoded.channels, original.channels);
    assert_eq!(decoded.zones, original.zones);
    assert_eq!(decoded.talkgroups, original.talkgroups);
    assert_eq!(decoded.talkgroup_lists, original.talkgroup_lists);
}

#[test]
fn test_encode_writes_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("export");

    let mut diags = Diagnostics::new();
    opengd77_rt3s::encode(&common::sample_codeplug(), &output, &mut diags).unwrap();

    let manifest = std::fs::read_to_string(output.join("output.LST")).unwrap();
    assert_eq!(
        manifest,
        "4\n0,\"Channels.csv\"\n1,\"Contacts.csv\"\n2,\"TG_Lists.csv\"\n3,\"Zones.csv\"\n"
    );
}
