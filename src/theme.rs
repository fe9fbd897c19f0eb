/*
 *  theme.rs
 *
 *  klokka - configurable terminal clock
 *
 *  Maps stored setting strings to renderable values: background
 *  presets and hex strings to RGBA colors, font identifiers to
 *  font file paths.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use log::warn;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An RGBA color, each channel in [0,1]. Alpha is always fully opaque
/// for parsed colors; only this module constructs values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Channels as 8-bit values, rounded. Used by the terminal surface
    /// for 24-bit ANSI colors.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        )
    }
}

/// Sentinel returned when hex parsing fails. Deliberately loud: a
/// visibly red clock beats a crashed one.
pub const FALLBACK_COLOR: Rgba = Rgba {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Preset substituted for unknown names and for "Custom" without a color.
pub const DEFAULT_PRESET: &str = "Dark Gray";

/// Background color presets, name to hex. Fixed for the process lifetime.
pub const BACKGROUND_PRESETS: &[(&str, &str)] = &[
    ("Dark Gray", "#2B2B2B"),
    ("Pure Black", "#000000"),
    ("Graphite", "#3C3C3C"),
    ("Midnight Blue", "#0F1419"),
    ("Dark Navy", "#1A1F3A"),
    ("Forest Green", "#0F1F0F"),
    ("Charcoal", "#222222"),
];

/// Selected value for a background that is not one of the presets.
pub const CUSTOM_PRESET: &str = "Custom";

#[derive(Debug, Error)]
pub enum HexError {
    #[error("invalid hex color length: {0}")]
    Length(usize),
    #[error("invalid hex digit: '{0}'")]
    Digit(char),
}

fn preset_hex(name: &str) -> Option<&'static str> {
    BACKGROUND_PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hex)| *hex)
}

/// Parse a hex color string into an RGBA color.
///
/// Accepts an optional leading '#' and either 3 or 6 hex digits;
/// shorthand is expanded by doubling each digit ("F00" -> "FF0000").
/// Anything else logs a warning and yields the opaque-red sentinel.
pub fn parse_hex(input: &str) -> Rgba {
    match try_parse_hex(input) {
        Ok(color) => color,
        Err(e) => {
            warn!("invalid color '{}', using red as fallback: {}", input, e);
            FALLBACK_COLOR
        }
    }
}

fn try_parse_hex(input: &str) -> Result<Rgba, HexError> {
    let stripped = input.trim().trim_start_matches('#');

    // Per-char digit parsing; never index into the string, so
    // multi-byte input degrades like any other bad digit.
    let digits: Vec<u8> = stripped
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(HexError::Digit(c)))
        .collect::<Result<_, _>>()?;

    let digits: Vec<u8> = match digits.len() {
        6 => digits,
        3 => digits.iter().flat_map(|&d| [d, d]).collect(),
        n => return Err(HexError::Length(n)),
    };

    let mut channels = [0.0f32; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let byte = digits[i * 2] * 16 + digits[i * 2 + 1];
        *channel = byte as f32 / 255.0;
    }

    Ok(Rgba {
        r: channels[0],
        g: channels[1],
        b: channels[2],
        a: 1.0,
    })
}

/// Resolve the background setting to a color.
///
/// "Custom" uses `custom_hex`; an empty custom value falls back to the
/// default preset with a warning. Unknown preset names degrade silently
/// to the default preset.
pub fn resolve_background(preset: &str, custom_hex: &str) -> Rgba {
    if preset == CUSTOM_PRESET {
        if custom_hex.is_empty() {
            warn!(
                "'{}' background selected but no color provided, using {}",
                CUSTOM_PRESET, DEFAULT_PRESET
            );
            return parse_hex(preset_hex(DEFAULT_PRESET).unwrap_or("#2B2B2B"));
        }
        return parse_hex(custom_hex);
    }

    let hex = preset_hex(preset).unwrap_or_else(|| preset_hex(DEFAULT_PRESET).unwrap_or("#2B2B2B"));
    parse_hex(hex)
}

/// Resolve a font identifier to a font file path under `fonts_dir`.
///
/// Returns None (caller uses the surface's built-in default font) and
/// logs a warning when the file does not exist on disk.
pub fn resolve_font_path(fonts_dir: &Path, font_id: &str) -> Option<PathBuf> {
    let path = fonts_dir.join(format!("{font_id}.ttf"));
    if path.exists() {
        Some(path)
    } else {
        warn!("font file not found: {}, using default font", path.display());
        None
    }
}
