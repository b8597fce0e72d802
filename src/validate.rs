//! Band-plan and referential validation of a decoded codeplug.
//!
//! A pure read-only pass: nothing is mutated, nothing stops early. Only
//! the structural minimum (at least one channel) can fail the overall
//! result; every other finding is a warning, so the contract is "report
//! everything found", not "fail fast". Running it twice on the same
//! codeplug produces identical diagnostics.

use crate::diag::Diagnostics;
use crate::model::Codeplug;
use crate::units::{format_mhz, is_2m, is_70cm};

/// Expected repeater splits per band.
const OFFSET_2M_HZ: u64 = 600_000;
const OFFSET_70CM_HZ: u64 = 5_000_000;

/// Validate a codeplug, recording findings in `diags`.
///
/// Returns `false` only when the codeplug has no channels.
pub fn validate(codeplug: &Codeplug, diags: &mut Diagnostics) -> bool {
    if codeplug.channels.is_empty() {
        diags.error("no channels found in the codeplug");
        return false;
    }
    diags.info(format!("found {} channels", codeplug.channels.len()));

    for channel in &codeplug.channels {
        let (rx, tx) = (channel.freq_rx, channel.freq_tx);
        if rx == tx {
            continue;
        }
        let split = rx.abs_diff(tx);
        if is_2m(rx) && is_2m(tx) && split != OFFSET_2M_HZ {
            diags.warn(format!(
                "channel {} ({}) has unusual offset: {} MHz (rx {} MHz, tx {} MHz)",
                channel.index,
                channel.name,
                format_mhz(split),
                format_mhz(rx),
                format_mhz(tx)
            ));
        }
        if is_70cm(rx) && is_70cm(tx) && split != OFFSET_70CM_HZ {
            diags.warn(format!(
                "channel {} ({}) has unusual offset: {} MHz (rx {} MHz, tx {} MHz)",
                channel.index,
                channel.name,
                format_mhz(split),
                format_mhz(rx),
                format_mhz(tx)
            ));
        }
        if (is_2m(rx) && is_70cm(tx)) || (is_70cm(rx) && is_2m(tx)) {
            diags.warn(format!(
                "channel {} ({}) is cross-band: rx {} MHz, tx {} MHz",
                channel.index,
                channel.name,
                format_mhz(rx),
                format_mhz(tx)
            ));
        }
    }

    for zone in &codeplug.zones {
        if zone.channels.is_empty() {
            diags.warn(format!("zone {} has no channels", zone.name));
        }
    }
    for zone in &codeplug.zones {
        for member in &zone.channels {
            if codeplug.channel_by_name(member).is_none() {
                diags.warn(format!(
                    "zone {} contains orphan channel: {}",
                    zone.name, member
                ));
            }
        }
    }

    for channel in &codeplug.channels {
        if let Some(dmr) = &channel.dmr {
            if dmr.contact.is_none() && dmr.tg_list.is_none() {
                diags.warn(format!(
                    "channel {} ({}) has no talkgroup or talkgroup list",
                    channel.index, channel.name
                ));
            }
        }
    }

    true
}
