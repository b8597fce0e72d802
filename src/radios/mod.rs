//! Radio adapter registry and shared vendor-CSV plumbing.
//!
//! Each supported radio model is a self-contained module exposing the same
//! two-operation contract: `decode` a directory of vendor CSV exports into
//! the neutral [`Codeplug`](crate::model::Codeplug), and `encode` a
//! codeplug into a fresh directory of vendor CSVs plus a manifest file.
//! Models are dispatched through a flat function table, not a trait
//! hierarchy; adapters never call each other and share only the row-level
//! helpers below.
//!
//! Adapters do not validate cross-references or band plans — that is the
//! validator's job, so format translation and semantic checking stay
//! independently testable.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::diag::Diagnostics;
use crate::error::{CodeplugError, Result};
use crate::model::Codeplug;

pub mod anytone_d878uv;
pub mod opengd77_rt3s;

pub type DecodeFn = fn(&Path, &mut Diagnostics) -> Result<Codeplug>;
pub type EncodeFn = fn(&Codeplug, &Path, &mut Diagnostics) -> Result<()>;

/// One supported radio model: identifier, display name, and the directions
/// its adapter implements.
pub struct RadioModel {
    pub id: &'static str,
    pub name: &'static str,
    pub decode: Option<DecodeFn>,
    pub encode: Option<EncodeFn>,
}

const MODELS: &[RadioModel] = &[
    RadioModel {
        id: "anytone_d878uv",
        name: "AnyTone D878UV",
        decode: Some(anytone_d878uv::decode),
        encode: Some(anytone_d878uv::encode),
    },
    RadioModel {
        id: "opengd77_rt3s",
        name: "Retevis RT3S (OpenGD77)",
        decode: Some(opengd77_rt3s::decode),
        encode: Some(opengd77_rt3s::encode),
    },
];

/// All supported radio models.
pub fn models() -> &'static [RadioModel] {
    MODELS
}

/// Look up a radio model by identifier.
pub fn lookup(id: &str) -> Option<&'static RadioModel> {
    MODELS.iter().find(|m| m.id == id)
}

/// One CSV row keyed by header name.
pub(crate) type Row = HashMap<String, String>;

/// Read a required vendor export file into header-keyed rows.
///
/// A missing file is fatal and names the exact path; rows already parsed
/// from other files are discarded by the caller returning the error.
pub(crate) fn read_export(dir: &Path, file: &str) -> Result<Vec<Row>> {
    let path = dir.join(file);
    if !path.is_file() {
        return Err(CodeplugError::MissingExportFile { path });
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Fetch a required column from a row.
pub(crate) fn field<'a>(row: &'a Row, name: &str, file: &str, line: usize) -> Result<&'a str> {
    row.get(name)
        .map(String::as_str)
        .ok_or_else(|| CodeplugError::MalformedRow {
            file: file.to_string(),
            row: line,
            message: format!("missing column: {}", name),
        })
}

/// Fetch and parse a required numeric column.
pub(crate) fn numeric_field<T>(row: &Row, name: &str, file: &str, line: usize) -> Result<T>
where
    T: std::str::FromStr,
{
    let value = field(row, name, file, line)?;
    value.parse().map_err(|_| CodeplugError::MalformedRow {
        file: file.to_string(),
        row: line,
        message: format!("invalid value for {}: {}", name, value),
    })
}

/// Flatten a fixed-width numbered column family (`Channel1..ChannelN`)
/// into an ordered sequence, skipping blank cells. The scan cap is the
/// vendor's maximum member count, not derived from the data.
pub(crate) fn collect_numbered(row: &Row, prefix: &str, max: usize) -> Vec<String> {
    (1..=max)
        .filter_map(|i| row.get(&format!("{}{}", prefix, i)))
        .filter(|value| !value.is_empty())
        .cloned()
        .collect()
}

/// Split a pipe-delimited vendor member list into an ordered sequence.
pub(crate) fn split_members(value: &str) -> Vec<String> {
    value
        .split('|')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Map a vendor name cell to tagged presence: blank and the literal
/// sentinel `"None"` both mean absent.
pub(crate) fn optional_name(value: &str) -> Option<String> {
    if value.is_empty() || value == "None" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Create the encode target directory, refusing to touch an existing one.
pub(crate) fn create_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Err(CodeplugError::OutputExists {
            path: dir.to_path_buf(),
        });
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Write the CPS import manifest: a line count followed by
/// `index,"filename"` pairs in the vendor-required order.
pub(crate) fn write_manifest(dir: &Path, name: &str, files: &[&str]) -> Result<()> {
    let mut out = format!("{}\n", files.len());
    for (index, file) in files.iter().enumerate() {
        out.push_str(&format!("{},\"{}\"\n", index, file));
    }
    fs::write(dir.join(name), out)?;
    Ok(())
}
