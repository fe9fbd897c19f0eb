/*
 *  surface/mod.rs
 *
 *  klokka - configurable terminal clock
 *
 *  Display surface abstraction: two text labels plus a background
 *  color. The refresh loop only ever writes to a surface, except for
 *  the date-label read used by the no-op-write optimization.
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

pub mod mock;
pub mod term;

use crate::theme::Rgba;
use std::path::PathBuf;

pub use mock::MockSurface;
pub use term::TermSurface;

/// The two text labels every surface carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelId {
    Time,
    Date,
}

/// Minimal display-surface contract.
///
/// A font of `None` means the surface's built-in default font.
pub trait Surface {
    fn set_background(&mut self, color: Rgba);

    fn set_label_text(&mut self, label: LabelId, text: &str);

    /// Current text of a label. Read back only to suppress redundant
    /// date-label writes.
    fn label_text(&self, label: LabelId) -> &str;

    fn set_label_color(&mut self, label: LabelId, color: Rgba);

    fn set_label_font(&mut self, label: LabelId, font: Option<PathBuf>);
}
