//! File-based processing command.

use super::common::{
    build_params, parse_bit_depth, parse_key_val, parse_oversampling, parse_placement,
    resolve_preset,
};
use anyhow::Context;
use clap::Args;
use drekavac_core::{OversamplingFactor, linear_to_db};
use drekavac_effects::CompressorPlacement;
use drekavac_io::{AudioBuffer, WavSpec, read_wav, write_wav};
use drekavac_plugin::{DrekavacProcessor, DrekavacShared, ProcessorConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name (factory or user) or path to a .preset file
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter override (e.g. "drive=4", "cutoff=1200Hz"); repeatable
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Oversampling factor (2 or 4)
    #[arg(long, default_value = "2", value_parser = parse_oversampling)]
    oversampling: OversamplingFactor,

    /// Compressor placement (bypass, pre, post)
    #[arg(long, default_value = "post", value_parser = parse_placement)]
    compressor: CompressorPlacement,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,

    /// Shift the output earlier by the processing latency
    #[arg(long)]
    compensate_latency: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("Block size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let (audio, spec) = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    if spec.sample_rate == 0 {
        anyhow::bail!("{} declares a sample rate of 0 Hz", args.input.display());
    }
    let num_channels = audio.num_channels();
    let num_frames = audio.num_frames();

    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        num_channels,
        num_frames,
        spec.sample_rate,
        num_frames as f32 / spec.sample_rate as f32
    );

    let preset = args
        .preset
        .as_deref()
        .map(|name| resolve_preset(name, None))
        .transpose()?;
    let params = build_params(preset.as_ref(), &args.param)?;

    let shared = DrekavacShared::new();
    if let Some(preset) = &preset {
        println!("Loading preset: {}", preset.name);
        shared.set_preset_name(preset.name.clone());
    }
    shared.set_params(&params);

    let config = ProcessorConfig {
        oversampling: args.oversampling,
        compressor: args.compressor,
    };
    let mut processor = DrekavacProcessor::new(shared.clone(), config);
    processor.prepare(spec.sample_rate as f32, args.block_size, num_channels);

    let latency = processor.latency_samples();
    println!(
        "Processing at {}x ({} Hz), compressor {}, latency {} samples...",
        args.oversampling.ratio(),
        processor.oversampled_rate(),
        args.compressor.name(),
        latency
    );
    for (id, value) in params.iter() {
        tracing::debug!(id, value, "control");
    }

    let input_peak = audio.peak();
    let mut output = if args.compensate_latency {
        pad_frames(audio, latency)?
    } else {
        audio
    };
    let total = output.num_frames();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .context("invalid progress template")?
            .progress_chars("##-"),
    );

    for start in (0..total).step_by(args.block_size) {
        let end = (start + args.block_size).min(total);
        let mut block = output.frames_mut(start, end);
        processor.process_planar(&mut block);
        pb.set_position(end as u64);
    }
    pb.finish_with_message("done");

    if args.compensate_latency {
        output = drop_leading_frames(output, latency)?;
    }

    println!("\nStats:");
    println!("  Input:  Peak {:.1} dB", peak_db(input_peak));
    println!("  Output: Peak {:.1} dB", peak_db(output.peak()));

    let out_spec = WavSpec {
        channels: u16::try_from(num_channels).context("too many channels")?,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    tracing::info!(
        output = %args.output.display(),
        frames = output.num_frames(),
        preset = %shared.preset_name(),
        "processing finished"
    );
    println!("Done!");

    Ok(())
}

fn peak_db(peak: f32) -> f32 {
    if peak <= 0.0 { -120.0 } else { linear_to_db(peak) }
}

/// Append `frames` of silence to every channel.
fn pad_frames(audio: AudioBuffer, frames: usize) -> anyhow::Result<AudioBuffer> {
    let mut channels = audio.into_channels();
    for channel in &mut channels {
        channel.resize(channel.len() + frames, 0.0);
    }
    Ok(AudioBuffer::from_channels(channels)?)
}

/// Remove the first `frames` from every channel.
fn drop_leading_frames(audio: AudioBuffer, frames: usize) -> anyhow::Result<AudioBuffer> {
    let mut channels = audio.into_channels();
    for channel in &mut channels {
        let frames = frames.min(channel.len());
        channel.drain(..frames);
    }
    Ok(AudioBuffer::from_channels(channels)?)
}
