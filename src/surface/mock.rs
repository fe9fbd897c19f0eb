/*
 *  surface/mock.rs
 *
 *  klokka - configurable terminal clock
 *
 *  Mock display surface for testing without a terminal
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

use super::{LabelId, Surface};
use crate::theme::Rgba;
use std::path::PathBuf;

/// Per-label state snapshot.
#[derive(Debug, Clone, Default)]
pub struct MockLabel {
    pub text: String,
    pub color: Option<Rgba>,
    pub font: Option<PathBuf>,
    /// Number of text writes issued against this label.
    pub text_writes: usize,
    pub color_writes: usize,
    pub font_writes: usize,
}

/// Records every surface operation for inspection in tests.
///
/// Useful for unit tests, integration tests, and CI where no terminal
/// is attached.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    pub background: Option<Rgba>,
    pub background_writes: usize,
    pub time: MockLabel,
    pub date: MockLabel,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self, label: LabelId) -> &MockLabel {
        match label {
            LabelId::Time => &self.time,
            LabelId::Date => &self.date,
        }
    }

    fn label_mut(&mut self, label: LabelId) -> &mut MockLabel {
        match label {
            LabelId::Time => &mut self.time,
            LabelId::Date => &mut self.date,
        }
    }

    /// Reset write counters (useful between test phases).
    pub fn reset_counts(&mut self) {
        self.background_writes = 0;
        for label in [LabelId::Time, LabelId::Date] {
            let l = self.label_mut(label);
            l.text_writes = 0;
            l.color_writes = 0;
            l.font_writes = 0;
        }
    }
}

impl Surface for MockSurface {
    fn set_background(&mut self, color: Rgba) {
        self.background = Some(color);
        self.background_writes += 1;
    }

    fn set_label_text(&mut self, label: LabelId, text: &str) {
        let l = self.label_mut(label);
        l.text = text.to_string();
        l.text_writes += 1;
    }

    fn label_text(&self, label: LabelId) -> &str {
        &self.label(label).text
    }

    fn set_label_color(&mut self, label: LabelId, color: Rgba) {
        let l = self.label_mut(label);
        l.color = Some(color);
        l.color_writes += 1;
    }

    fn set_label_font(&mut self, label: LabelId, font: Option<PathBuf>) {
        let l = self.label_mut(label);
        l.font = font;
        l.font_writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::parse_hex;

    #[test]
    fn test_write_counts() {
        let mut surface = MockSurface::new();
        surface.set_label_text(LabelId::Time, "12:00:00");
        surface.set_label_text(LabelId::Time, "12:00:01");
        surface.set_label_text(LabelId::Date, "Friday, March 14");
        surface.set_background(parse_hex("#000000"));

        assert_eq!(surface.time.text_writes, 2);
        assert_eq!(surface.date.text_writes, 1);
        assert_eq!(surface.background_writes, 1);
        assert_eq!(surface.label_text(LabelId::Time), "12:00:01");
    }

    #[test]
    fn test_reset_counts_keeps_state() {
        let mut surface = MockSurface::new();
        surface.set_label_text(LabelId::Date, "Friday, March 14");
        surface.reset_counts();

        assert_eq!(surface.date.text_writes, 0);
        assert_eq!(surface.label_text(LabelId::Date), "Friday, March 14");
    }
}
