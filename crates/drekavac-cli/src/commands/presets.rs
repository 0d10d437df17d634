//! `presets` subcommands: list, show, save and paths.

use super::common::{build_params, parse_key_val, resolve_preset};
use anyhow::Context;
use clap::{Args, Subcommand};
use drekavac_config::{
    Preset, ensure_user_presets_dir, factory_presets, list_presets_in_dir,
    preset_name_from_path, user_presets_dir, with_preset_extension,
};
use drekavac_effects::DESCRIPTORS;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,

    /// Use this directory instead of the user presets directory
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory and user presets
    List {
        /// Factory presets only
        #[arg(long, conflicts_with = "user")]
        factory: bool,

        /// User presets only
        #[arg(long)]
        user: bool,
    },

    /// Print a preset's values
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a preset built from a base preset and overrides
    Save {
        /// Preset name, also the file name
        name: String,

        /// Preset to start from (defaults when omitted)
        #[arg(long)]
        from: Option<String>,

        /// Parameter override (e.g. "drive=4"); repeatable
        #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
        param: Vec<(String, String)>,

        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,

        /// Replace an existing file with the same name
        #[arg(long)]
        force: bool,
    },

    /// Show the presets directory
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let dir = args.dir.as_deref();
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(dir, factory, user),
        PresetsCommand::Show { name } => show_preset(dir, &name),
        PresetsCommand::Save {
            name,
            from,
            param,
            description,
            force,
        } => save_preset(dir, &name, from.as_deref(), &param, description, force),
        PresetsCommand::Paths => {
            let dir = dir.map_or_else(user_presets_dir, Path::to_path_buf);
            println!("User presets: {}", dir.display());
            Ok(())
        }
    }
}

fn heading(title: &str) {
    println!("{title}");
    println!("{}", "-".repeat(title.len()));
}

fn list_presets(dir: Option<&Path>, factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        heading("Factory");
        for preset in factory_presets() {
            println!(
                "  {:<12} {}",
                preset.name,
                preset.description.unwrap_or_default()
            );
        }
        println!();
    }

    if factory_only {
        return Ok(());
    }

    let dir = dir.map_or_else(user_presets_dir, Path::to_path_buf);
    heading(&format!("User ({})", dir.display()));
    let paths = list_presets_in_dir(&dir);
    if paths.is_empty() {
        println!("  (none)");
        println!();
        println!("  drekavac presets save <name> --param drive=4");
        return Ok(());
    }

    for path in paths {
        let stem = preset_name_from_path(&path).unwrap_or_default();
        match Preset::load(&path) {
            Ok(preset) => println!(
                "  {:<12} {}",
                stem,
                preset.description.unwrap_or_default()
            ),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable preset");
                println!("  {stem:<12} (unreadable: {err})");
            }
        }
    }
    println!();

    Ok(())
}

fn show_preset(dir: Option<&Path>, name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset(name, dir)?;
    let params = preset
        .to_params()
        .with_context(|| format!("Preset '{}' has invalid values", preset.name))?;

    heading(&preset.name);
    if let Some(desc) = &preset.description {
        println!("{desc}");
    }
    println!();

    for (desc, (id, value)) in DESCRIPTORS.iter().zip(params.iter()) {
        let marker = if preset.params.contains_key(id) {
            ""
        } else {
            " (default)"
        };
        println!(
            "  {:12} = {:<8.3} {}{}",
            id,
            value,
            desc.format_value(value),
            marker
        );
    }

    Ok(())
}

fn save_preset(
    dir: Option<&Path>,
    name: &str,
    from: Option<&str>,
    overrides: &[(String, String)],
    description: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => ensure_user_presets_dir()?,
    };
    let path = dir.join(with_preset_extension(Path::new(name)));

    if path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    let base = from.map(|base| resolve_preset(base, Some(&dir))).transpose()?;
    let params = build_params(base.as_ref(), overrides)?;

    let mut preset = Preset::from_params(name, &params);
    if let Some(desc) = description.or_else(|| base.and_then(|b| b.description)) {
        preset = preset.with_description(desc);
    }

    let saved = preset
        .save(&path)
        .with_context(|| format!("Failed to save preset {}", path.display()))?;
    println!("Saved preset '{}' to {}", name, saved.display());

    Ok(())
}
