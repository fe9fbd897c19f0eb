/*
 *  refresh.rs
 *
 *  klokka - configurable terminal clock
 *
 *  Presentation refresh loop: the 1 Hz tick that updates the time and
 *  date labels, and the settings-changed hook that re-derives the
 *  presentation state from current settings.
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

use crate::settings::{
    SettingChange, Settings, KEY_BACKGROUND, KEY_CUSTOM_BACKGROUND, KEY_LAUNCH_MODE,
    SECTION_AESTHETICS, SECTION_DISPLAY,
};
use crate::surface::{LabelId, Surface};
use crate::theme::{parse_hex, resolve_background, resolve_font_path};
use chrono::{DateTime, Local};
use log::info;
use std::path::PathBuf;

pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATE_FORMAT: &str = "%A, %B %d";

/// Drives label updates and settings-change propagation.
///
/// Both triggers recompute their slice of presentation state wholesale
/// from current settings, so their firing order never matters.
pub struct RefreshLoop {
    fonts_dir: PathBuf,
}

impl RefreshLoop {
    pub fn new(fonts_dir: PathBuf) -> Self {
        Self { fonts_dir }
    }

    /// One tick of the clock. The time label is always written; the
    /// date label only when its text actually changed (it changes once
    /// a day, and the comparison saves a redundant surface write).
    pub fn tick<S: Surface>(&self, now: DateTime<Local>, surface: &mut S) {
        surface.set_label_text(LabelId::Time, &now.format(TIME_FORMAT).to_string());

        let date_text = now.format(DATE_FORMAT).to_string();
        if surface.label_text(LabelId::Date) != date_text {
            surface.set_label_text(LabelId::Date, &date_text);
        }
    }

    /// Derive the full presentation state from settings (startup path).
    pub fn apply_all<S: Surface>(&self, settings: &Settings, surface: &mut S) {
        self.apply_background(settings, surface);
        self.apply_aesthetics(settings, surface);
    }

    /// React to a committed settings edit.
    pub fn on_setting_changed<S: Surface>(
        &self,
        change: &SettingChange,
        settings: &Settings,
        surface: &mut S,
    ) {
        match (change.section.as_str(), change.key.as_str()) {
            (SECTION_AESTHETICS, KEY_BACKGROUND) | (SECTION_AESTHETICS, KEY_CUSTOM_BACKGROUND) => {
                self.apply_background(settings, surface);
            }
            (SECTION_AESTHETICS, _) => {
                self.apply_aesthetics(settings, surface);
            }
            (SECTION_DISPLAY, KEY_LAUNCH_MODE) => {
                // Launch mode is read once before the surface exists;
                // it cannot be applied live.
                info!(
                    "launch mode changed to '{}'. Please restart the application for this change to take effect.",
                    change.value
                );
            }
            _ => {}
        }
    }

    fn apply_background<S: Surface>(&self, settings: &Settings, surface: &mut S) {
        let color = resolve_background(
            &settings.aesthetics.background,
            &settings.aesthetics.custom_background,
        );
        surface.set_background(color);
    }

    fn apply_aesthetics<S: Surface>(&self, settings: &Settings, surface: &mut S) {
        let font = resolve_font_path(&self.fonts_dir, &settings.aesthetics.font);
        let color = parse_hex(&settings.aesthetics.color);

        for label in [LabelId::Time, LabelId::Date] {
            surface.set_label_font(label, font.clone());
            surface.set_label_color(label, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{KEY_COLOR, KEY_FONT};
    use crate::surface::MockSurface;
    use chrono::TimeZone;

    fn refresh() -> RefreshLoop {
        RefreshLoop::new(PathBuf::from("fonts"))
    }

    #[test]
    fn test_tick_writes_both_labels_initially() {
        let mut surface = MockSurface::new();
        let now = Local.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap();

        refresh().tick(now, &mut surface);

        assert_eq!(surface.label_text(LabelId::Time), "10:30:00");
        assert_eq!(surface.label_text(LabelId::Date), "Saturday, March 14");
        assert_eq!(surface.time.text_writes, 1);
        assert_eq!(surface.date.text_writes, 1);
    }

    #[test]
    fn test_same_day_tick_suppresses_date_write_only() {
        let mut surface = MockSurface::new();
        let r = refresh();
        let first = Local.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap();
        let second = Local.with_ymd_and_hms(2026, 3, 14, 10, 30, 1).unwrap();

        r.tick(first, &mut surface);
        surface.reset_counts();
        r.tick(second, &mut surface);

        // Time is always written, even if the string were identical.
        assert_eq!(surface.time.text_writes, 1);
        assert_eq!(surface.date.text_writes, 0);
    }

    #[test]
    fn test_repeated_time_string_still_written() {
        let mut surface = MockSurface::new();
        let r = refresh();
        let now = Local.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap();

        r.tick(now, &mut surface);
        r.tick(now, &mut surface);

        assert_eq!(surface.time.text_writes, 2);
    }

    #[test]
    fn test_day_rollover_writes_date() {
        let mut surface = MockSurface::new();
        let r = refresh();
        let before = Local.with_ymd_and_hms(2026, 3, 14, 23, 59, 59).unwrap();
        let after = Local.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();

        r.tick(before, &mut surface);
        surface.reset_counts();
        r.tick(after, &mut surface);

        assert_eq!(surface.date.text_writes, 1);
        assert_eq!(surface.label_text(LabelId::Date), "Sunday, March 15");
    }

    #[test]
    fn test_background_change_only_touches_background() {
        let mut surface = MockSurface::new();
        let settings = Settings::default();

        let change = SettingChange {
            section: SECTION_AESTHETICS.to_string(),
            key: KEY_BACKGROUND.to_string(),
            value: "Pure Black".to_string(),
        };
        refresh().on_setting_changed(&change, &settings, &mut surface);

        assert_eq!(surface.background_writes, 1);
        assert_eq!(surface.time.color_writes, 0);
        assert_eq!(surface.date.color_writes, 0);
    }

    #[test]
    fn test_color_change_touches_both_labels() {
        let mut surface = MockSurface::new();
        let mut settings = Settings::default();
        settings.aesthetics.color = "#00FF00".to_string();

        let change = SettingChange {
            section: SECTION_AESTHETICS.to_string(),
            key: KEY_COLOR.to_string(),
            value: "#00FF00".to_string(),
        };
        refresh().on_setting_changed(&change, &settings, &mut surface);

        assert_eq!(surface.background_writes, 0);
        assert_eq!(surface.time.color_writes, 1);
        assert_eq!(surface.date.color_writes, 1);
        assert_eq!(surface.time.font_writes, 1);
        assert_eq!(surface.date.font_writes, 1);
    }

    #[test]
    fn test_missing_font_applies_default() {
        let mut surface = MockSurface::new();
        let settings = Settings::default(); // Roboto-Thin, not on disk here

        let change = SettingChange {
            section: SECTION_AESTHETICS.to_string(),
            key: KEY_FONT.to_string(),
            value: "Roboto-Thin".to_string(),
        };
        RefreshLoop::new(std::env::temp_dir().join("klokka-refresh-no-fonts"))
            .on_setting_changed(&change, &settings, &mut surface);

        assert_eq!(surface.time.font, None);
        assert_eq!(surface.time.font_writes, 1);
    }

    #[test]
    fn test_launch_mode_change_applies_nothing() {
        let mut surface = MockSurface::new();
        let settings = Settings::default();

        let change = SettingChange {
            section: SECTION_DISPLAY.to_string(),
            key: KEY_LAUNCH_MODE.to_string(),
            value: "fullscreen".to_string(),
        };
        refresh().on_setting_changed(&change, &settings, &mut surface);

        assert_eq!(surface.background_writes, 0);
        assert_eq!(surface.time.text_writes, 0);
        assert_eq!(surface.time.color_writes, 0);
    }
}
