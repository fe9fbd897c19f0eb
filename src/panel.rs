/*
 *  panel.rs
 *
 *  klokka - configurable terminal clock
 *
 *  In-terminal settings panel. Choice fields commit on every cycle,
 *  text fields commit on enter; committed values flow through the
 *  settings store, never directly into the presentation state.
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

use crate::fonts::font_ids;
use crate::settings::{
    SettingChange, Settings, KEY_BACKGROUND, KEY_COLOR, KEY_CUSTOM_BACKGROUND, KEY_FONT,
    KEY_LAUNCH_MODE, SECTION_AESTHETICS, SECTION_DISPLAY,
};
use crate::theme::{BACKGROUND_PRESETS, CUSTOM_PRESET};

/// Result of feeding one key event to the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    /// Panel dismissed.
    Close,
    /// A field edit was committed and should be applied to the store.
    Commit(SettingChange),
    /// Key consumed, no commit.
    Handled,
    /// Key not meaningful to the panel.
    Ignored,
}

#[derive(Debug, Clone)]
enum FieldKind {
    /// Cycles through a fixed value list.
    Choice(Vec<String>),
    /// Free text, edited inline.
    Text,
}

#[derive(Debug, Clone)]
struct Field {
    section: &'static str,
    key: &'static str,
    label: &'static str,
    kind: FieldKind,
    value: String,
}

/// Settings panel state: a field list, a cursor, and at most one
/// in-progress text edit.
pub struct Panel {
    fields: Vec<Field>,
    selected: usize,
    edit: Option<String>,
}

impl Panel {
    /// Snapshot the current settings into an editable field list.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut backgrounds: Vec<String> = BACKGROUND_PRESETS
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        backgrounds.push(CUSTOM_PRESET.to_string());

        let fields = vec![
            Field {
                section: SECTION_DISPLAY,
                key: KEY_LAUNCH_MODE,
                label: "Launch mode",
                kind: FieldKind::Choice(vec!["windowed".to_string(), "fullscreen".to_string()]),
                value: settings.display.launch_mode.to_string(),
            },
            Field {
                section: SECTION_AESTHETICS,
                key: KEY_BACKGROUND,
                label: "Background",
                kind: FieldKind::Choice(backgrounds),
                value: settings.aesthetics.background.clone(),
            },
            Field {
                section: SECTION_AESTHETICS,
                key: KEY_CUSTOM_BACKGROUND,
                label: "Custom background",
                kind: FieldKind::Text,
                value: settings.aesthetics.custom_background.clone(),
            },
            Field {
                section: SECTION_AESTHETICS,
                key: KEY_FONT,
                label: "Font",
                kind: FieldKind::Choice(font_ids()),
                value: settings.aesthetics.font.clone(),
            },
            Field {
                section: SECTION_AESTHETICS,
                key: KEY_COLOR,
                label: "Text color",
                kind: FieldKind::Text,
                value: settings.aesthetics.color.clone(),
            },
        ];

        Self {
            fields,
            selected: 0,
            edit: None,
        }
    }

    /// Feed one named key event to the panel.
    pub fn handle_key(&mut self, key: &str) -> PanelOutcome {
        if self.edit.is_some() {
            return self.handle_edit_key(key);
        }

        match key {
            "escape" => PanelOutcome::Close,
            "up" => {
                self.selected = self.selected.saturating_sub(1);
                PanelOutcome::Handled
            }
            "down" => {
                if self.selected + 1 < self.fields.len() {
                    self.selected += 1;
                }
                PanelOutcome::Handled
            }
            "left" => self.cycle_selected(-1),
            "right" => self.cycle_selected(1),
            "enter" => match &self.fields[self.selected].kind {
                FieldKind::Text => {
                    self.edit = Some(self.fields[self.selected].value.clone());
                    PanelOutcome::Handled
                }
                FieldKind::Choice(_) => self.cycle_selected(1),
            },
            _ => PanelOutcome::Ignored,
        }
    }

    fn handle_edit_key(&mut self, key: &str) -> PanelOutcome {
        match key {
            "enter" => {
                let Some(value) = self.edit.take() else {
                    return PanelOutcome::Ignored;
                };
                let field = &mut self.fields[self.selected];
                field.value = value.clone();
                PanelOutcome::Commit(SettingChange {
                    section: field.section.to_string(),
                    key: field.key.to_string(),
                    value,
                })
            }
            "escape" => {
                self.edit = None;
                PanelOutcome::Handled
            }
            "backspace" => {
                if let Some(buffer) = self.edit.as_mut() {
                    buffer.pop();
                }
                PanelOutcome::Handled
            }
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        if let Some(buffer) = self.edit.as_mut() {
                            buffer.push(c);
                        }
                        PanelOutcome::Handled
                    }
                    _ => PanelOutcome::Ignored,
                }
            }
        }
    }

    fn cycle_selected(&mut self, step: i32) -> PanelOutcome {
        let field = &mut self.fields[self.selected];
        let FieldKind::Choice(choices) = &field.kind else {
            return PanelOutcome::Ignored;
        };
        if choices.is_empty() {
            return PanelOutcome::Ignored;
        }

        // Unknown stored values cycle in at the first entry.
        let current = choices.iter().position(|c| *c == field.value).unwrap_or(0);
        let next =
            (current as i32 + step).rem_euclid(choices.len() as i32) as usize;
        field.value = choices[next].clone();

        PanelOutcome::Commit(SettingChange {
            section: field.section.to_string(),
            key: field.key.to_string(),
            value: field.value.clone(),
        })
    }

    /// Render the panel as plain lines for the surface overlay.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["Clock Settings".to_string(), String::new()];

        for (i, field) in self.fields.iter().enumerate() {
            let marker = if i == self.selected { "›" } else { " " };
            let value = if i == self.selected {
                match (&self.edit, &field.kind) {
                    (Some(buffer), _) => format!("{buffer}_"),
                    (None, FieldKind::Choice(_)) => format!("◂ {} ▸", field.value),
                    (None, FieldKind::Text) => format!("{} (enter to edit)", field.value),
                }
            } else {
                field.value.clone()
            };
            lines.push(format!("{marker} {:<18} {value}", field.label));
        }

        lines.push(String::new());
        lines.push("↑↓ select   ◂▸ change   esc close".to_string());
        lines
    }
}
