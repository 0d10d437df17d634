//! Integration tests for drekavac-config.
//!
//! These tests verify end-to-end functionality across modules.

use drekavac_config::{
    ConfigError, Preset, UNKNOWN_PRESET_NAME, factory_presets, find_preset_in,
    get_factory_preset, list_presets_in_dir, preset_name_from_path,
};
use drekavac_effects::{ChannelChain, ControlParams};
use std::fs;
use tempfile::TempDir;

#[test]
fn save_load_roundtrip_keeps_values_and_name() {
    let temp_dir = TempDir::new().unwrap();
    let params = ControlParams {
        drive: 4.25,
        tone: 0.1,
        cutoff: 0.333,
        flavor: 1.0,
        ..ControlParams::default()
    };
    let original = Preset::from_params("Roundtrip", &params).with_description("saved and read");

    let written = original.save(temp_dir.path().join("roundtrip")).unwrap();
    assert_eq!(written.extension().unwrap(), "preset");

    let loaded = Preset::load(&written).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(loaded.to_params().unwrap(), params);
}

#[test]
fn save_creates_nested_directories() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("a").join("b").join("deep.preset");
    let written = Preset::default().save(&target).unwrap();
    assert_eq!(written, target);
    assert!(target.is_file());
}

#[test]
fn saved_presets_are_listed_and_found() {
    let temp_dir = TempDir::new().unwrap();
    for preset in factory_presets() {
        let file = preset.name.to_lowercase();
        preset.save(temp_dir.path().join(file)).unwrap();
    }
    fs::write(temp_dir.path().join("readme.txt"), "not a preset").unwrap();

    let listed = list_presets_in_dir(temp_dir.path());
    let names: Vec<_> = listed
        .iter()
        .filter_map(|p| preset_name_from_path(p))
        .collect();
    assert_eq!(names, ["default", "folded", "fuzz", "warm"]);

    let found = find_preset_in("fuzz", temp_dir.path()).unwrap();
    assert_eq!(Preset::load(found).unwrap().name, "Fuzz");
}

#[test]
fn load_missing_file_is_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Preset::load(temp_dir.path().join("absent.preset")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn load_malformed_toml_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.preset");
    fs::write(&path, "name = \"Broken\"\n[params\ndrive = 1").unwrap();
    assert!(matches!(Preset::load(&path), Err(ConfigError::TomlParse(_))));
}

#[test]
fn nameless_file_loads_as_unknown() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("anon.preset");
    fs::write(&path, "[params]\nfold = 0.4\n").unwrap();
    let preset = Preset::load(&path).unwrap();
    assert_eq!(preset.name, UNKNOWN_PRESET_NAME);
    assert_eq!(preset.to_params().unwrap().fold, 0.4);
}

#[test]
fn invalid_file_parses_but_does_not_apply() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hot.preset");
    fs::write(&path, "name = \"Hot\"\n[params]\noutput = 9.0\n").unwrap();
    let preset = Preset::load(&path).unwrap();
    assert!(matches!(preset.to_params(), Err(ConfigError::Validation(_))));
}

#[test]
fn factory_presets_drive_a_chain() {
    for name in ["default", "warm", "fuzz", "folded"] {
        let params = get_factory_preset(name).unwrap().to_params().unwrap();
        let mut chain = ChannelChain::new(96000.0);
        chain.apply(&params);

        let mut block: Vec<f32> = (0..4096)
            .map(|i| 0.5 * (i as f32 * 0.03).sin())
            .collect();
        chain.process_block(&mut block);
        assert!(
            block.iter().all(|s| s.is_finite() && s.abs() <= 1.0),
            "{name} produced out-of-range output"
        );
        assert!(block.iter().any(|&s| s != 0.0));
    }
}

#[test]
fn json_blob_matches_toml_contents() {
    let preset = get_factory_preset("warm").unwrap();
    let from_json = Preset::from_json(&preset.to_json().unwrap()).unwrap();
    let from_toml = Preset::from_toml(&preset.to_toml().unwrap()).unwrap();
    assert_eq!(from_json, from_toml);
}
