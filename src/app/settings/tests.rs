use tempfile::{NamedTempFile, tempdir};

use super::{
    RuntimeSettings, load_runtime_settings, load_runtime_settings_from, save_runtime_settings,
};
use crate::{backdrop::Variant, cli::EffectArg, test_support::state_test_cli};

#[test]
fn cli_defaults_map_effect_and_motion() {
    let mut cli = state_test_cli();
    assert_eq!(
        RuntimeSettings::from_cli_defaults(&cli),
        RuntimeSettings::default()
    );

    cli.effect = Some(EffectArg::Rain);
    cli.reduced_motion = true;
    let settings = RuntimeSettings::from_cli_defaults(&cli);
    assert_eq!(settings.effect, Variant::Rain);
    assert!(settings.reduced_motion);
}

#[test]
fn load_without_disk_returns_cli_defaults() {
    let (settings, path) = load_runtime_settings(&state_test_cli(), false);
    assert!(path.is_none());
    assert_eq!(settings.effect, Variant::Hail);
}

#[test]
fn roundtrip_through_disk() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("settings.json");
    let saved = RuntimeSettings {
        effect: Variant::Snowfall,
        reduced_motion: true,
    };

    save_runtime_settings(&path, &saved).expect("save settings");
    let restored = load_runtime_settings_from(&state_test_cli(), &path);
    assert_eq!(restored, saved);
}

#[test]
fn cli_flags_override_saved_settings() {
    let file = NamedTempFile::new().expect("create temp settings file");
    save_runtime_settings(
        file.path(),
        &RuntimeSettings {
            effect: Variant::Snowfall,
            reduced_motion: false,
        },
    )
    .expect("save settings");

    let mut cli = state_test_cli();
    cli.effect = Some(EffectArg::Hail);
    cli.reduced_motion = true;
    let settings = load_runtime_settings_from(&cli, file.path());
    assert_eq!(settings.effect, Variant::Hail);
    assert!(settings.reduced_motion);
}

#[test]
fn unreadable_or_partial_files_fall_back_to_defaults() {
    let file = NamedTempFile::new().expect("create temp settings file");
    std::fs::write(file.path(), "{ not json").expect("write garbage");
    assert_eq!(
        load_runtime_settings_from(&state_test_cli(), file.path()),
        RuntimeSettings::default()
    );

    std::fs::write(file.path(), r#"{"effect":"Rain"}"#).expect("write partial");
    let settings = load_runtime_settings_from(&state_test_cli(), file.path());
    assert_eq!(settings.effect, Variant::Rain);
    assert!(!settings.reduced_motion);
}

#[test]
fn missing_file_is_not_an_error() {
    let dir = tempdir().expect("create temp dir");
    let settings = load_runtime_settings_from(&state_test_cli(), &dir.path().join("absent.json"));
    assert_eq!(settings, RuntimeSettings::default());
}
