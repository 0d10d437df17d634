//! Integration tests for the drekavac binary.
//!
//! Each test drives the built binary through `std::process::Command` and
//! checks its output files and exit status.

use drekavac_io::{AudioBuffer, WavSpec, read_wav, write_wav};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn drekavac_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_drekavac"))
}

fn run(args: &[&str]) -> Output {
    drekavac_bin()
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run drekavac")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn sine(freq: f32, amplitude: f32, frames: usize, sample_rate: u32) -> Vec<f32> {
    (0..frames)
        .map(|i| {
            amplitude
                * (std::f32::consts::TAU * freq * i as f32 / sample_rate as f32).sin()
        })
        .collect()
}

fn write_stereo_input(path: &Path, frames: usize) {
    let audio = AudioBuffer::from_channels(vec![
        sine(220.0, 0.5, frames, 48000),
        sine(330.0, 0.3, frames, 48000),
    ])
    .unwrap();
    let spec = WavSpec {
        channels: 2,
        sample_rate: 48000,
        bits_per_sample: 32,
    };
    write_wav(path, &audio, spec).unwrap();
}

// ---------------------------------------------------------------------------
// help / params
// ---------------------------------------------------------------------------

#[test]
fn help_lists_commands() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for command in ["process", "params", "presets"] {
        assert!(text.contains(command), "help should mention '{command}'");
    }
}

#[test]
fn params_lists_every_control() {
    let output = run(&["params"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for id in [
        "drive", "tone", "distortion", "cutoff", "fold", "flavor", "output", "drywet",
    ] {
        assert!(text.contains(id), "params listing should contain '{id}'");
    }
    assert!(text.contains("post"));
}

#[test]
fn params_detail_shows_host_id() {
    let output = run(&["params", "cutoff"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Cutoff"));
    assert!(text.contains("103"));
    assert!(text.contains("Hz"));
}

#[test]
fn params_unknown_fails() {
    let output = run(&["params", "volume"]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// process
// ---------------------------------------------------------------------------

#[test]
fn process_stereo_defaults() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.wav");
    let out = temp.path().join("out.wav");
    write_stereo_input(&input, 4800);

    let output = run(&[
        "process",
        input.to_str().unwrap(),
        out.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (audio, spec) = read_wav(&out).unwrap();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(audio.num_frames(), 4800);
    for channel in audio.channels() {
        assert!(channel.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
    }
    assert!(audio.peak() > 0.1);
}

#[test]
fn process_with_preset_and_overrides() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.wav");
    let out = temp.path().join("out.wav");
    write_stereo_input(&input, 2000);

    let output = run(&[
        "process",
        input.to_str().unwrap(),
        out.to_str().unwrap(),
        "--preset",
        "fuzz",
        "--param",
        "cutoff=2000Hz",
        "--param",
        "drywet=1",
        "--oversampling",
        "4",
        "--compressor",
        "pre",
        "--block-size",
        "37",
        "--bit-depth",
        "24",
    ]);
    assert!(
        output.status.success(),
        "process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout(&output).contains("Fuzz"));

    let (audio, spec) = read_wav(&out).unwrap();
    assert_eq!(spec.bits_per_sample, 24);
    assert_eq!(audio.num_frames(), 2000);
    assert!(audio.peak() <= 1.0);
}

#[test]
fn dry_output_with_latency_compensation_tracks_input() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.wav");
    let out = temp.path().join("out.wav");

    let source = sine(100.0, 0.1, 4800, 48000);
    let audio = AudioBuffer::from_channels(vec![source.clone()]).unwrap();
    let spec = WavSpec {
        channels: 1,
        sample_rate: 48000,
        bits_per_sample: 32,
    };
    write_wav(&input, &audio, spec).unwrap();

    let output = run(&[
        "process",
        input.to_str().unwrap(),
        out.to_str().unwrap(),
        "--param",
        "drywet=0",
        "--compensate-latency",
    ]);
    assert!(output.status.success());

    let (processed, _) = read_wav(&out).unwrap();
    assert_eq!(processed.num_frames(), source.len());
    let processed = processed.channel(0).unwrap();
    for i in 200..source.len() - 200 {
        let expected = source[i].tanh();
        assert!(
            (processed[i] - expected).abs() < 5e-3,
            "frame {i}: {} vs {expected}",
            processed[i]
        );
    }
}

#[test]
fn process_rejects_bad_arguments() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.wav");
    let out = temp.path().join("out.wav");
    write_stereo_input(&input, 256);
    let input = input.to_str().unwrap();
    let out = out.to_str().unwrap();

    for extra in [
        ["--param", "volume=1"],
        ["--param", "drive=11"],
        ["--oversampling", "8"],
        ["--compressor", "side"],
        ["--preset", "no-such-preset"],
        ["--block-size", "0"],
    ] {
        let output = run(&["process", input, out, extra[0], extra[1]]);
        assert!(!output.status.success(), "{extra:?} should fail");
    }
}

#[test]
fn process_handles_one_hertz_input() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("slow.wav");
    let out = temp.path().join("out.wav");
    let audio = AudioBuffer::from_channels(vec![vec![0.5, -0.5, 0.25, 0.0]]).unwrap();
    let spec = WavSpec {
        channels: 1,
        sample_rate: 1,
        bits_per_sample: 32,
    };
    write_wav(&input, &audio, spec).unwrap();

    let output = run(&["process", input.to_str().unwrap(), out.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let (processed, spec) = read_wav(&out).unwrap();
    assert_eq!(spec.sample_rate, 1);
    let samples = processed.channel(0).unwrap();
    assert_eq!(samples.len(), 4);
    assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
}

#[test]
fn process_missing_input_fails() {
    let temp = TempDir::new().unwrap();
    let output = run(&[
        "process",
        temp.path().join("missing.wav").to_str().unwrap(),
        temp.path().join("out.wav").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// presets
// ---------------------------------------------------------------------------

#[test]
fn presets_list_shows_factory_presets() {
    let temp = TempDir::new().unwrap();
    let output = run(&["presets", "--dir", temp.path().to_str().unwrap(), "list"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for name in ["Default", "Warm", "Fuzz", "Folded"] {
        assert!(text.contains(name), "listing should contain '{name}'");
    }
    assert!(text.contains("(none)"));
}

#[test]
fn presets_save_list_show() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_str().unwrap();

    let output = run(&[
        "presets",
        "save",
        "crunchy",
        "--dir",
        dir,
        "--from",
        "warm",
        "--param",
        "drive=6",
        "--description",
        "More drive",
    ]);
    assert!(
        output.status.success(),
        "save failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(temp.path().join("crunchy.preset").is_file());

    let listed = stdout(&run(&["presets", "list", "--user", "--dir", dir]));
    assert!(listed.contains("crunchy"));
    assert!(listed.contains("More drive"));

    let shown = run(&["presets", "show", "crunchy", "--dir", dir]);
    assert!(shown.status.success());
    let text = stdout(&shown);
    assert!(text.contains("drive"));
    assert!(text.contains("6.000"));

    // Second save without --force refuses to overwrite.
    let again = run(&["presets", "save", "crunchy", "--dir", dir]);
    assert!(!again.status.success());
    let forced = run(&["presets", "save", "crunchy", "--dir", dir, "--force"]);
    assert!(forced.status.success());
}

#[test]
fn saved_preset_drives_processing() {
    let temp = TempDir::new().unwrap();
    let preset_path = temp.path().join("mine.preset");
    let saved = run(&[
        "presets",
        "save",
        "mine",
        "--dir",
        temp.path().to_str().unwrap(),
        "--param",
        "output=0",
    ]);
    assert!(saved.status.success());

    let input = temp.path().join("in.wav");
    let out = temp.path().join("out.wav");
    write_stereo_input(&input, 1024);
    let output = run(&[
        "process",
        input.to_str().unwrap(),
        out.to_str().unwrap(),
        "--preset",
        preset_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let (audio, _) = read_wav(&out).unwrap();
    assert_eq!(audio.peak(), 0.0);
}

#[test]
fn presets_show_factory() {
    let output = run(&["presets", "show", "folded"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Folded"));
    assert!(text.contains("fold"));
}
