//! Factory presets bundled with the library.
//!
//! | Name | Character |
//! |------|-----------|
//! | `default` | Every control at its default |
//! | `warm` | Low drive, dark shelf, mostly distortion branch |
//! | `fuzz` | High drive and distortion, open cutoff, compressor friendly |
//! | `folded` | Heavy wavefolding, flavor toward the fold branch |

use crate::Preset;

const DEFAULT: &str = r#"
name = "Default"
description = "Every control at its default"

[params]
drive = 1.0
tone = 0.5
distortion = 1.0
cutoff = 0.75
fold = 0.2
flavor = 0.5
output = 1.0
drywet = 0.5
"#;

const WARM: &str = r#"
name = "Warm"
description = "Low drive, dark shelf, mostly distortion branch"

[params]
drive = 2.0
tone = 0.3
distortion = 1.5
cutoff = 0.55
fold = 0.05
flavor = 0.15
output = 1.0
drywet = 0.7
"#;

const FUZZ: &str = r#"
name = "Fuzz"
description = "Saturated drive into a wide-open distortion"

[params]
drive = 7.0
tone = 0.65
distortion = 8.0
cutoff = 0.95
fold = 0.1
flavor = 0.2
output = 0.8
drywet = 1.0
"#;

const FOLDED: &str = r#"
name = "Folded"
description = "Heavy wavefolding with the flavor pushed to the fold branch"

[params]
drive = 1.5
tone = 0.55
distortion = 1.0
cutoff = 0.7
fold = 0.85
flavor = 0.9
output = 0.9
drywet = 0.85
"#;

/// Names of all factory presets, lowercase.
pub const FACTORY_PRESET_NAMES: &[&str] = &["default", "warm", "fuzz", "folded"];

const FACTORY_PRESETS: &[(&str, &str)] = &[
    ("default", DEFAULT),
    ("warm", WARM),
    ("fuzz", FUZZ),
    ("folded", FOLDED),
];

/// All factory presets, parsed.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by key or display name, case-insensitively.
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    FACTORY_PRESETS
        .iter()
        .filter_map(|(key, toml)| Preset::from_toml(toml).ok().map(|preset| (key, preset)))
        .find(|(key, preset)| {
            key.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name)
        })
        .map(|(_, preset)| preset)
}

/// Names of all factory presets.
pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

/// Whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESET_NAMES
        .iter()
        .any(|key| key.eq_ignore_ascii_case(name))
}
