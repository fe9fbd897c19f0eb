/*
 *  surface/term.rs
 *
 *  klokka - configurable terminal clock
 *
 *  Terminal display surface backed by crossterm. Renders the time
 *  label as large block-glyph digits and the date beneath it, with
 *  colors taken from the applied presentation state.
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
use crate::settings::LaunchMode;
use crate::theme::{parse_hex, Rgba};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use std::path::PathBuf;

/// Glyph matrix height for the large clock digits.
const GLYPH_ROWS: usize = 5;
/// Glyph width plus one column of spacing.
const GLYPH_STRIDE: u16 = 6;

/// Frame size used in windowed launch mode.
const WINDOW_COLS: u16 = 64;
const WINDOW_ROWS: u16 = 18;

#[derive(Debug, Clone)]
struct LabelState {
    text: String,
    color: Rgba,
    font: Option<PathBuf>,
}

/// Terminal-backed display surface.
///
/// Owns the alternate screen and raw mode for the process lifetime;
/// both are restored on drop. A terminal cannot rasterize TTF files,
/// so the applied font path is carried as state and surfaced in the
/// footer line.
pub struct TermSurface {
    out: Stdout,
    mode: LaunchMode,
    background: Rgba,
    time: LabelState,
    date: LabelState,
}

impl TermSurface {
    pub fn new(mode: LaunchMode) -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;

        let initial = LabelState {
            text: String::new(),
            color: parse_hex("#FFFFFF"),
            font: None,
        };

        Ok(Self {
            out,
            mode,
            background: parse_hex("#2B2B2B"),
            time: initial.clone(),
            date: initial,
        })
    }

    fn label(&self, label: LabelId) -> &LabelState {
        match label {
            LabelId::Time => &self.time,
            LabelId::Date => &self.date,
        }
    }

    fn label_mut(&mut self, label: LabelId) -> &mut LabelState {
        match label {
            LabelId::Time => &mut self.time,
            LabelId::Date => &mut self.date,
        }
    }

    /// Redraw the whole frame, with an optional settings-panel overlay.
    pub fn render(&mut self, overlay: Option<&[String]>) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;

        // Fullscreen uses the whole terminal; windowed draws a fixed
        // frame centered in it.
        let (x0, y0, w, h) = match self.mode {
            LaunchMode::Fullscreen => (0, 0, cols, rows),
            LaunchMode::Windowed => {
                let w = WINDOW_COLS.min(cols);
                let h = WINDOW_ROWS.min(rows);
                ((cols - w) / 2, (rows - h) / 2, w, h)
            }
        };

        let bg = to_term_color(self.background);
        let fg = to_term_color(self.time.color);

        queue!(self.out, ResetColor, terminal::Clear(terminal::ClearType::All))?;
        queue!(self.out, SetBackgroundColor(bg))?;
        for row in 0..h {
            queue!(
                self.out,
                MoveTo(x0, y0 + row),
                Print(" ".repeat(w as usize))
            )?;
        }

        if self.mode == LaunchMode::Windowed {
            self.draw_frame_border(x0, y0, w, h, fg, bg)?;
        }

        // Large time digits, centered; falls back to plain text when
        // the frame is too small for the glyph matrix.
        let glyph_width = self.time.text.chars().count() as u16 * GLYPH_STRIDE;
        let time_y = (y0 + h / 2).saturating_sub(GLYPH_ROWS as u16 / 2 + 1);
        queue!(self.out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
        if glyph_width + 2 <= w && h >= GLYPH_ROWS as u16 + 6 {
            let gx = x0 + (w - glyph_width) / 2;
            for row in 0..GLYPH_ROWS {
                let line: String = self
                    .time
                    .text
                    .chars()
                    .map(|c| format!("{} ", glyph_row(c, row)))
                    .collect();
                queue!(self.out, MoveTo(gx, time_y + row as u16), Print(line))?;
            }
        } else {
            let tx = x0 + (w.saturating_sub(self.time.text.chars().count() as u16)) / 2;
            queue!(self.out, MoveTo(tx, time_y + 2), Print(&self.time.text))?;
        }

        // Date line, same color family as the time label.
        let date_fg = to_term_color(self.date.color);
        let dx = x0 + (w.saturating_sub(self.date.text.chars().count() as u16)) / 2;
        queue!(
            self.out,
            SetForegroundColor(date_fg),
            MoveTo(dx, time_y + GLYPH_ROWS as u16 + 2),
            Print(&self.date.text)
        )?;

        self.draw_footer(x0, y0, w, h, bg)?;

        if let Some(lines) = overlay {
            self.draw_overlay(cols, rows, lines)?;
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    fn draw_frame_border(&mut self, x0: u16, y0: u16, w: u16, h: u16, fg: Color, bg: Color) -> io::Result<()> {
        if w < 2 || h < 2 {
            return Ok(());
        }
        let horiz = "─".repeat(w as usize - 2);
        queue!(
            self.out,
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            MoveTo(x0, y0),
            Print(format!("┌{horiz}┐")),
            MoveTo(x0, y0 + h - 1),
            Print(format!("└{horiz}┘"))
        )?;
        for row in 1..h - 1 {
            queue!(
                self.out,
                MoveTo(x0, y0 + row),
                Print("│"),
                MoveTo(x0 + w - 1, y0 + row),
                Print("│")
            )?;
        }
        Ok(())
    }

    fn draw_footer(&mut self, x0: u16, y0: u16, w: u16, h: u16, bg: Color) -> io::Result<()> {
        let font_name = self
            .time
            .font
            .as_deref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "default".to_string());
        let footer = format!("font: {font_name}  │  F1 settings   Esc quit");
        let fx = x0 + (w.saturating_sub(footer.chars().count() as u16)) / 2;
        queue!(
            self.out,
            SetForegroundColor(Color::DarkGrey),
            SetBackgroundColor(bg),
            MoveTo(fx, y0 + h.saturating_sub(2)),
            Print(footer)
        )
    }

    fn draw_overlay(&mut self, cols: u16, rows: u16, lines: &[String]) -> io::Result<()> {
        let inner_w = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(20) as u16;
        let Some((bx, by, box_w, box_h)) = overlay_box(cols, rows, inner_w, lines.len() as u16)
        else {
            return Ok(());
        };

        let horiz = "─".repeat(box_w as usize - 2);
        queue!(
            self.out,
            SetBackgroundColor(Color::Rgb { r: 30, g: 30, b: 30 }),
            SetForegroundColor(Color::White),
            MoveTo(bx, by),
            Print(format!("┌{horiz}┐"))
        )?;
        for (i, line) in lines.iter().enumerate() {
            let pad = inner_w as usize - line.chars().count();
            queue!(
                self.out,
                MoveTo(bx, by + 1 + i as u16),
                Print(format!("│ {}{} │", line, " ".repeat(pad)))
            )?;
        }
        queue!(
            self.out,
            MoveTo(bx, by + box_h - 1),
            Print(format!("└{horiz}┘"))
        )
    }
}

impl Surface for TermSurface {
    fn set_background(&mut self, color: Rgba) {
        self.background = color;
    }

    fn set_label_text(&mut self, label: LabelId, text: &str) {
        self.label_mut(label).text = text.to_string();
    }

    fn label_text(&self, label: LabelId) -> &str {
        &self.label(label).text
    }

    fn set_label_color(&mut self, label: LabelId, color: Rgba) {
        self.label_mut(label).color = color;
    }

    fn set_label_font(&mut self, label: LabelId, font: Option<PathBuf>) {
        self.label_mut(label).font = font;
    }
}

impl Drop for TermSurface {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Centered overlay box geometry, or None when the terminal has no
/// room for even the border.
fn overlay_box(cols: u16, rows: u16, inner_w: u16, line_count: u16) -> Option<(u16, u16, u16, u16)> {
    let box_w = (inner_w + 4).min(cols);
    let box_h = (line_count + 2).min(rows);
    if box_w < 2 || box_h < 2 {
        return None;
    }
    Some(((cols - box_w) / 2, (rows - box_h) / 2, box_w, box_h))
}

fn to_term_color(color: Rgba) -> Color {
    let (r, g, b) = color.to_rgb8();
    Color::Rgb { r, g, b }
}

/// One row of the 5x5 block glyph for a clock character.
fn glyph_row(c: char, row: usize) -> &'static str {
    const BLANK: [&str; GLYPH_ROWS] = ["     "; GLYPH_ROWS];
    let glyph: [&str; GLYPH_ROWS] = match c {
        '0' => ["█████", "█   █", "█   █", "█   █", "█████"],
        '1' => ["  ██ ", "   █ ", "   █ ", "   █ ", "   █ "],
        '2' => ["█████", "    █", "█████", "█    ", "█████"],
        '3' => ["█████", "    █", " ████", "    █", "█████"],
        '4' => ["█   █", "█   █", "█████", "    █", "    █"],
        '5' => ["█████", "█    ", "█████", "    █", "█████"],
        '6' => ["█████", "█    ", "█████", "█   █", "█████"],
        '7' => ["█████", "    █", "   █ ", "  █  ", "  █  "],
        '8' => ["█████", "█   █", "█████", "█   █", "█████"],
        '9' => ["█████", "█   █", "█████", "    █", "█████"],
        ':' => ["     ", "  █  ", "     ", "  █  ", "     "],
        _ => BLANK,
    };
    glyph[row]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_rows_are_uniform() {
        for c in "0123456789:".chars() {
            for row in 0..GLYPH_ROWS {
                assert_eq!(glyph_row(c, row).chars().count(), 5, "glyph {c} row {row}");
            }
        }
    }

    #[test]
    fn test_unknown_glyph_is_blank() {
        for row in 0..GLYPH_ROWS {
            assert!(glyph_row('x', row).chars().all(|c| c == ' '));
        }
    }

    #[test]
    fn test_overlay_box_fits_terminal() {
        let (bx, by, w, h) = overlay_box(80, 24, 30, 9).unwrap();
        assert_eq!((w, h), (34, 11));
        assert_eq!((bx, by), (23, 6));
    }

    #[test]
    fn test_overlay_box_skipped_on_tiny_terminal() {
        assert_eq!(overlay_box(1, 24, 30, 9), None);
        assert_eq!(overlay_box(80, 1, 30, 9), None);
        assert_eq!(overlay_box(0, 0, 30, 9), None);
    }
}
