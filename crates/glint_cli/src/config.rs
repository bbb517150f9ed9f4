//! Camera configuration layering: scene defaults, then a JSON file, then
//! command-line flags.

use anyhow::{bail, Context, Result};
use glint_renderer::CameraSettings;
use serde_json::Value;
use std::path::Path;

/// Overlay the fields present in the JSON file at `path` onto `base`.
pub fn load_settings(path: &Path, base: &CameraSettings) -> Result<CameraSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    overlay_settings(base, &text).with_context(|| format!("Invalid config {}", path.display()))
}

/// Overlay a JSON object onto `base`. Unknown keys are rejected so typos
/// don't go unnoticed.
pub fn overlay_settings(base: &CameraSettings, json: &str) -> Result<CameraSettings> {
    let overlay: Value = serde_json::from_str(json).context("Config is not valid JSON")?;
    let Value::Object(overlay) = overlay else {
        bail!("Config must be a JSON object");
    };

    let mut merged = serde_json::to_value(base)?;
    let Value::Object(fields) = &mut merged else {
        bail!("Camera settings did not serialize to an object");
    };

    for (key, value) in overlay {
        if !fields.contains_key(&key) {
            bail!("Unknown camera setting `{key}`");
        }
        fields.insert(key, value);
    }

    Ok(serde_json::from_value(merged)?)
}

/// Parse an aspect ratio written as `W/H` or as a plain number.
pub fn parse_aspect(s: &str) -> std::result::Result<f64, String> {
    let value = match s.split_once('/') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().map_err(|_| format!("bad width in `{s}`"))?;
            let h: f64 = h.trim().parse().map_err(|_| format!("bad height in `{s}`"))?;
            w / h
        }
        None => s.trim().parse().map_err(|_| format!("`{s}` is not a number"))?,
    };

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("aspect ratio must be positive, got `{s}`"))
    }
}
