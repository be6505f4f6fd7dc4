use std::collections::HashMap;

use super::*;

fn from_vars(vars: &[(&str, &str)]) -> PlannerConfig {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    PlannerConfig::from_lookup(|key| map.get(key).cloned().ok_or(VarError::NotPresent))
}

#[test]
fn defaults_when_unset() {
    let config = from_vars(&[]);
    assert_eq!(config, PlannerConfig::default());
    assert_eq!(config.storage_dir, PathBuf::from(".hexmap"));
    assert_eq!(config.templates_dir, PathBuf::from("templates"));
    assert_eq!(config.autosave_interval, Duration::from_secs(30));
    assert_eq!(config.default_map_name, "My Hex Map");
}

#[test]
fn reads_every_variable() {
    let config = from_vars(&[
        ("HEXMAP_STORAGE_DIR", "/var/lib/hexmap"),
        ("HEXMAP_TEMPLATES_DIR", "/opt/templates"),
        ("HEXMAP_AUTOSAVE_SECS", "5"),
        ("HEXMAP_DEFAULT_NAME", "Campaign"),
    ]);
    assert_eq!(config.storage_dir, PathBuf::from("/var/lib/hexmap"));
    assert_eq!(config.templates_dir, PathBuf::from("/opt/templates"));
    assert_eq!(config.autosave_interval, Duration::from_secs(5));
    assert_eq!(config.default_map_name, "Campaign");
}

#[test]
fn unparseable_interval_falls_back() {
    let config = from_vars(&[("HEXMAP_AUTOSAVE_SECS", "soon")]);
    assert_eq!(config.autosave_interval, Duration::from_secs(DEFAULT_AUTOSAVE_SECS));
}

#[test]
fn blank_values_fall_back() {
    let config = from_vars(&[("HEXMAP_STORAGE_DIR", "  "), ("HEXMAP_DEFAULT_NAME", "")]);
    assert_eq!(config.storage_dir, PathBuf::from(DEFAULT_STORAGE_DIR));
    assert_eq!(config.default_map_name, DEFAULT_MAP_NAME);
}

#[test]
fn values_are_trimmed() {
    let config = from_vars(&[("HEXMAP_AUTOSAVE_SECS", " 12 "), ("HEXMAP_DEFAULT_NAME", " Atlas ")]);
    assert_eq!(config.autosave_interval, Duration::from_secs(12));
    assert_eq!(config.default_map_name, "Atlas");
}
