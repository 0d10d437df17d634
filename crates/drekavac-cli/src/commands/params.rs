//! Control listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use drekavac_core::ParamDescriptor;
use drekavac_effects::{CompressorPlacement, DESCRIPTORS, params};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single control
    #[arg(value_name = "ID")]
    id: Option<String>,
}

pub fn run(args: &ParamsArgs) -> anyhow::Result<()> {
    if let Some(id) = &args.id {
        let desc = params::descriptor(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {id}"))?;
        show_one(desc);
        return Ok(());
    }

    println!("Controls:");
    println!();
    println!(
        "  {:12}  {:>4}  {:12}  {:>8}  {:>8}  {:>8}  {}",
        "ID", "Host", "Name", "Min", "Max", "Default", "Display"
    );
    println!(
        "  {:12}  {:>4}  {:12}  {:>8}  {:>8}  {:>8}  {}",
        "--", "----", "----", "---", "---", "-------", "-------"
    );
    for desc in &DESCRIPTORS {
        println!(
            "  {:12}  {:>4}  {:12}  {:>8.2}  {:>8.2}  {:>8.2}  {}",
            desc.string_id,
            desc.id.0,
            desc.name,
            desc.min,
            desc.max,
            desc.default,
            desc.format_value(desc.default)
        );
    }

    println!();
    let placements: Vec<&str> = CompressorPlacement::ALL.iter().map(|p| p.name()).collect();
    println!(
        "Compressor placement: {} (default {})",
        placements.join(", "),
        CompressorPlacement::default().name()
    );
    println!();
    println!("Example usage:");
    println!("  drekavac process input.wav output.wav --param drive=4 --param cutoff=1200Hz");

    Ok(())
}

fn show_one(desc: &ParamDescriptor) {
    println!("{} ({})", desc.name, desc.string_id);
    println!("{}", "=".repeat(desc.name.len() + desc.string_id.len() + 3));
    println!();
    println!("  Host ID:  {}", desc.id.0);
    println!("  Short:    {}", desc.short_name);
    println!(
        "  Range:    {:.2} .. {:.2} ({} .. {})",
        desc.min,
        desc.max,
        desc.format_value(desc.min),
        desc.format_value(desc.max)
    );
    println!(
        "  Default:  {:.2} ({})",
        desc.default,
        desc.format_value(desc.default)
    );
    println!("  Step:     {}", desc.step);
    println!("  Unit:     {:?}", desc.unit());
}
