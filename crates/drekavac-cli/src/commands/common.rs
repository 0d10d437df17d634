//! Argument parsing and preset lookup shared by the commands.

use anyhow::{Context, bail};
use drekavac_config::{Preset, load_preset_in, user_presets_dir};
use drekavac_core::OversamplingFactor;
use drekavac_effects::{CompressorPlacement, ControlParams, params};
use std::path::Path;

/// Split `key=value`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!(
            "Invalid parameter format: '{s}' (expected key=value)"
        )),
    }
}

/// Parse an oversampling ratio (`2` or `4`).
pub fn parse_oversampling(s: &str) -> Result<OversamplingFactor, String> {
    s.trim()
        .parse::<usize>()
        .ok()
        .and_then(OversamplingFactor::from_ratio)
        .ok_or_else(|| format!("Unsupported oversampling factor '{s}' (expected 2 or 4)"))
}

/// Parse a compressor placement name.
pub fn parse_placement(s: &str) -> Result<CompressorPlacement, String> {
    CompressorPlacement::from_name(s.trim()).ok_or_else(|| {
        let names: Vec<&str> = CompressorPlacement::ALL.iter().map(|p| p.name()).collect();
        format!("Unknown compressor placement '{s}' (expected {})", names.join(", "))
    })
}

/// Parse an output bit depth.
pub fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.trim().parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Unsupported bit depth '{s}' (expected 16, 24 or 32)")),
    }
}

/// Resolve a value for control `id`.
///
/// A bare number is taken as the stored value and must be in range. Text with
/// a unit (`1200Hz`, `40%`) is read through the control's display mapping and
/// clamped.
pub fn parse_param_value(id: &str, text: &str) -> anyhow::Result<f32> {
    let Some(descriptor) = params::descriptor(id) else {
        let known: Vec<&str> = params::DESCRIPTORS.iter().map(|d| d.string_id).collect();
        bail!("Unknown parameter '{id}' (known: {})", known.join(", "));
    };

    if let Ok(value) = text.parse::<f32>() {
        drekavac_config::validate_param(id, value)?;
        return Ok(value);
    }

    descriptor
        .parse_value(text)
        .with_context(|| format!("Cannot read '{text}' as a value for '{id}'"))
}

/// Apply `id=value` overrides on top of `params`.
pub fn apply_overrides(
    params: &mut ControlParams,
    overrides: &[(String, String)],
) -> anyhow::Result<()> {
    for (id, text) in overrides {
        let value = parse_param_value(id, text)?;
        params.set_by_id(id, value);
        tracing::debug!(id = %id, value, "parameter override");
    }
    Ok(())
}

/// Find a preset by file path, factory name, or user preset name.
///
/// `dir` replaces the user presets directory when given.
pub fn resolve_preset(name: &str, dir: Option<&Path>) -> anyhow::Result<Preset> {
    let dir = dir.map_or_else(user_presets_dir, Path::to_path_buf);
    load_preset_in(name, &dir).with_context(|| format!("Failed to load preset '{name}'"))
}

/// Control values for an optional base preset plus overrides.
pub fn build_params(
    preset: Option<&Preset>,
    overrides: &[(String, String)],
) -> anyhow::Result<ControlParams> {
    let mut params = match preset {
        Some(preset) => preset
            .to_params()
            .with_context(|| format!("Preset '{}' has invalid values", preset.name))?,
        None => ControlParams::default(),
    };
    apply_overrides(&mut params, overrides)?;
    Ok(params)
}
