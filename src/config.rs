use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use cross_xdg::BaseDirs;
use tracing::{debug, warn};

use crate::interpreter::Settings;

/// Environment variable naming an explicit config file, bypassing XDG lookup.
pub const CONFIG_ENV: &str = "BRAIN_CONFIG";

static DEFAULTS: OnceLock<Settings> = OnceLock::new();

/// Run settings used when no CLI flag overrides them.
///
/// Read once from `brain.toml` (see [`config_path`]); built-in defaults
/// apply when the file is missing.
pub fn defaults() -> &'static Settings {
    DEFAULTS.get_or_init(|| load_from_toml().unwrap_or_default())
}

/// `$BRAIN_CONFIG`, or `brain.toml` in the XDG config home.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("brain.toml");
    Some(path)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Parse the `[defaults]` section of a config file.
///
/// Recognised keys are `classic`, `numeric_input`, `numeric_output` and
/// `memory`. Unknown keys and unparsable values are skipped with a warning.
pub fn parse_defaults(content: &str) -> Settings {
    // Very small hand-rolled parser: look for [defaults] section and key = value pairs
    let mut in_defaults = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            in_defaults = &line[1..line.len()-1] == "defaults";
            continue;
        }
        if !in_defaults { continue; }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq+1..].trim();
            // Accept quoted or unquoted
            let val = if val_raw.starts_with('"') && val_raw.ends_with('"') && val_raw.len() >= 2 {
                val_raw[1..val_raw.len()-1].to_string()
            } else { val_raw.to_string() };
            map.insert(key, val);
        }
    }

    let mut settings = Settings::default();
    for (key, val) in &map {
        let applied = match key.as_str() {
            "classic" => parse_bool(val).map(|v| settings = settings.classic(v)),
            "numeric_input" => parse_bool(val).map(|v| settings = settings.numeric_input(v)),
            "numeric_output" => parse_bool(val).map(|v| settings = settings.numeric_output(v)),
            "memory" => val
                .parse::<usize>()
                .ok()
                .filter(|&n| n >= 1)
                .map(|n| settings = settings.tape_len(n)),
            _ => None,
        };
        if applied.is_none() {
            warn!(key = %key, value = %val, "ignoring config entry");
        }
    }
    settings
}

fn load_from_toml() -> Option<Settings> {
    let path = config_path()?;
    let content = fs::read_to_string(&path).ok()?;
    debug!(path = %path.display(), "loaded config");
    Some(parse_defaults(&content))
}
