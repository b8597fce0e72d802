//! Replug: Codeplug Conversion CLI Tool
//!
//! A command-line tool for converting amateur-radio codeplug data between
//! vendor CSV export formats and a vendor-neutral JSON document.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;

use replug::cli::{Cli, Commands};
use replug::diag::Diagnostics;
use replug::model::Codeplug;
use replug::radios::{self, RadioModel};
use replug::report::{print_diagnostics, print_success, print_summary};
use replug::validate::validate;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            radio,
            input,
            output,
            no_validate,
        } => run_decode(&radio, &input, output.as_deref(), no_validate),
        Commands::Encode {
            radio,
            input,
            output,
        } => run_encode(&radio, &input, &output),
        Commands::Validate { input } => run_validate(&input),
        Commands::List => {
            run_list();
            Ok(())
        }
    }
}

/// Resolve a radio model id, listing the supported models on failure.
fn resolve_model(radio: &str) -> Result<&'static RadioModel> {
    radios::lookup(radio).ok_or_else(|| {
        let known: Vec<&str> = radios::models().iter().map(|m| m.id).collect();
        anyhow::anyhow!(
            "unknown radio model '{}'. Supported models: {}",
            radio,
            known.join(", ")
        )
    })
}

fn run_decode(radio: &str, input: &Path, output: Option<&Path>, no_validate: bool) -> Result<()> {
    let model = resolve_model(radio)?;
    let decode = model
        .decode
        .ok_or_else(|| anyhow::anyhow!("{} does not support decoding", model.name))?;
    if !input.is_dir() {
        bail!("{} is not a directory", input.display());
    }

    println!(
        "{} Decoding {} CSV export from {}",
        style("◆").cyan().bold(),
        model.name,
        style(input.display()).dim()
    );

    let mut diags = Diagnostics::new();
    let codeplug = decode(input, &mut diags)?;

    if !no_validate {
        validate(&codeplug, &mut diags);
    }
    print_diagnostics(&diags);
    print_summary(&codeplug);

    let json = serde_json::to_string_pretty(&codeplug)?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            print_success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run_encode(radio: &str, input: &Path, output: &Path) -> Result<()> {
    let model = resolve_model(radio)?;
    let encode = model
        .encode
        .ok_or_else(|| anyhow::anyhow!("{} does not support encoding", model.name))?;
    let codeplug = load_codeplug(input)?;

    println!(
        "{} Encoding {} CSV export to {}",
        style("◆").cyan().bold(),
        model.name,
        style(output.display()).dim()
    );

    let mut diags = Diagnostics::new();
    encode(&codeplug, output, &mut diags)?;
    print_diagnostics(&diags);
    print_success(&format!("Exported to {}", output.display()));
    Ok(())
}

fn run_validate(input: &Path) -> Result<()> {
    let codeplug = load_codeplug(input)?;
    let mut diags = Diagnostics::new();
    let ok = validate(&codeplug, &mut diags);
    print_diagnostics(&diags);
    if !ok {
        bail!("validation failed");
    }
    print_success(&format!(
        "{} is valid ({} warnings)",
        input.display(),
        diags.warnings().count()
    ));
    Ok(())
}

fn run_list() {
    println!("Supported radio models:");
    for model in radios::models() {
        let directions = match (model.decode.is_some(), model.encode.is_some()) {
            (true, true) => "decode, encode",
            (true, false) => "decode",
            (false, true) => "encode",
            (false, false) => "none",
        };
        println!(
            "  {:<16} {} [{}]",
            style(model.id).cyan().bold(),
            model.name,
            style(directions).dim()
        );
    }
}

fn load_codeplug(path: &Path) -> Result<Codeplug> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let codeplug: Codeplug = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid codeplug document", path.display()))?;
    Ok(codeplug)
}
