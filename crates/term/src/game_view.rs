//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{board_columns, format_time, BoardCard, LevelInfo, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Outcome, Phase};

const BG: Rgb = Rgb::new(0, 0, 0);
const TABLE: Rgb = Rgb::new(20, 40, 30);
const POPUP_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders the home screen, the card board and the result popup.
pub struct GameView {
    /// Card width in terminal columns, border included.
    card_w: u16,
    /// Card height in terminal rows, border included.
    card_h: u16,
    /// Columns between neighbouring cards.
    gap: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            card_w: 7,
            card_h: 3,
            gap: 1,
        }
    }
}

impl GameView {
    pub fn new(card_w: u16, card_h: u16) -> Self {
        Self {
            card_w: card_w.max(3),
            card_h: card_h.max(3),
            gap: 1,
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// `cursor` is the board index to highlight while playing. Callers can
    /// reuse a framebuffer across frames and only resize when the terminal
    /// size changes.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<usize>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        match snap.phase {
            Phase::Home => self.draw_home(fb, snap, viewport),
            Phase::Playing => self.draw_board(fb, snap, cursor, viewport),
            Phase::Resolved => {
                self.draw_board(fb, snap, None, viewport);
                self.draw_popup(fb, snap, viewport);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<usize>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_home(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, viewport: Viewport) {
        let info = LevelInfo::for_level(snap.level);
        let title = CellStyle::new(Rgb::new(250, 210, 90), BG).bold();
        let text = CellStyle::default();
        let hint = CellStyle::new(Rgb::new(150, 150, 160), BG).dim();

        let lines = [
            ("Can You Remember?".to_string(), title),
            ("Memory Game".to_string(), text),
            (String::new(), text),
            (format!("Level {}", info.level), text.bold()),
            (
                format!("Time Available: {}", format_time(info.time_secs)),
                text,
            ),
            (format!("Cards: {} ({} pairs)", info.cards, info.pairs), text),
            (String::new(), text),
            ("Press Enter to start".to_string(), text.bold()),
            ("q to quit".to_string(), hint),
        ];

        let top = viewport.height.saturating_sub(lines.len() as u16) / 2;
        for (i, (line, style)) in lines.iter().enumerate() {
            fb.put_str_centered(0, viewport.width, top + i as u16, line, *style);
        }
    }

    fn draw_board(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        cursor: Option<usize>,
        viewport: Viewport,
    ) {
        let cols = board_columns(snap.board.len()) as u16;
        let rows = snap.board.len().div_ceil(cols as usize) as u16;
        let grid_w = cols * self.card_w + cols.saturating_sub(1) * self.gap;
        let grid_h = rows * self.card_h;
        // Header, blank, grid, blank, footer.
        let total_h = grid_h + 4;

        let top = viewport.height.saturating_sub(total_h) / 2;
        let left = viewport.width.saturating_sub(grid_w) / 2;

        self.draw_header(fb, snap, viewport, top);

        for (i, card) in snap.board.iter().enumerate() {
            let col = i as u16 % cols;
            let row = i as u16 / cols;
            let x = left + col * (self.card_w + self.gap);
            let y = top + 2 + row * self.card_h;
            self.draw_card(fb, card, cursor == Some(i), x, y);
        }

        let hint = CellStyle::new(Rgb::new(150, 150, 160), BG).dim();
        fb.put_str_centered(
            0,
            viewport.width,
            top + 3 + grid_h,
            "arrows move   Enter flip   s stop   q quit",
            hint,
        );
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, viewport: Viewport, y: u16) {
        let label = CellStyle::default().bold();
        let time_style = if snap.time_remaining <= 30 {
            CellStyle::new(Rgb::new(240, 90, 90), BG).bold()
        } else {
            label
        };

        let parts = [
            (format!("Level {}", snap.level), label),
            (format!("Score {}/{}", snap.score, snap.pairs_required), label),
            (format!("Incorrect {}", snap.incorrect), label),
            (format!("Time {}", format_time(snap.time_remaining)), time_style),
        ];
        let sep = 4u16;
        let total: u16 = parts
            .iter()
            .map(|(s, _)| s.chars().count() as u16)
            .sum::<u16>()
            + sep * (parts.len() as u16 - 1);

        let mut x = viewport.width.saturating_sub(total) / 2;
        for (text, style) in &parts {
            fb.put_str(x, y, text, *style);
            x = x.saturating_add(text.chars().count() as u16 + sep);
        }
    }

    fn draw_card(&self, fb: &mut FrameBuffer, card: &BoardCard, selected: bool, x: u16, y: u16) {
        let (edge, face) = if card.matched {
            (
                CellStyle::new(Rgb::new(90, 200, 110), TABLE),
                CellStyle::new(Rgb::new(120, 230, 140), TABLE).bold(),
            )
        } else if card.face_up {
            (
                CellStyle::new(Rgb::new(230, 230, 230), TABLE),
                CellStyle::new(Rgb::new(255, 255, 255), TABLE).bold(),
            )
        } else {
            (
                CellStyle::new(Rgb::new(120, 130, 160), TABLE),
                CellStyle::new(Rgb::new(70, 80, 120), TABLE).dim(),
            )
        };
        let edge = if selected {
            CellStyle::new(Rgb::new(250, 210, 90), TABLE).bold()
        } else {
            edge
        };

        let inner_w = self.card_w - 2;
        let inner_h = self.card_h - 2;
        fb.stroke_rect(x, y, self.card_w, self.card_h, edge);

        if card.face_up {
            fb.fill_rect(x + 1, y + 1, inner_w, inner_h, ' ', face);
            fb.put_str_centered(x + 1, inner_w, y + 1 + inner_h / 2, &card.symbol, face);
        } else {
            fb.fill_rect(x + 1, y + 1, inner_w, inner_h, '░', face);
        }
    }

    fn draw_popup(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, viewport: Viewport) {
        let Some(outcome) = snap.outcome else {
            return;
        };
        let text = CellStyle::new(Rgb::new(220, 220, 220), POPUP_BG);
        let title_fg = match outcome {
            Outcome::LevelComplete => Rgb::new(120, 230, 140),
            Outcome::GameOver => Rgb::new(240, 90, 90),
        };

        let mut lines = vec![
            (outcome.title().to_string(), CellStyle::new(title_fg, POPUP_BG).bold()),
            (String::new(), text),
            (format!("Level {}", snap.level), text),
            (format!("Score: {}/{}", snap.score, snap.pairs_required), text),
            (format!("Incorrect: {}", snap.incorrect), text),
            (
                format!("Time Remaining: {}", format_time(snap.time_remaining)),
                text,
            ),
            (String::new(), text),
        ];
        match outcome {
            Outcome::LevelComplete => {
                let next = LevelInfo::for_level(snap.level.saturating_add(1));
                lines.push(("You completed the level!".to_string(), text));
                lines.push((
                    format!(
                        "Next level: {} ({} cards)",
                        format_time(next.time_secs),
                        next.cards
                    ),
                    text,
                ));
                lines.push((String::new(), text));
                lines.push((
                    "[Enter] Next Level   [r] Restart Level".to_string(),
                    text.bold(),
                ));
            }
            Outcome::GameOver => {
                lines.push(("[Enter] Close".to_string(), text.bold()));
            }
        }

        let content_w = lines
            .iter()
            .map(|(s, _)| s.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let w = (content_w + 6).min(viewport.width);
        let h = (lines.len() as u16 + 2).min(viewport.height);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        fb.fill_rect(x, y, w, h, ' ', text);
        fb.stroke_rect(x, y, w, h, CellStyle::new(Rgb::new(200, 200, 200), POPUP_BG));
        for (i, (line, style)) in lines.iter().enumerate() {
            let row = y + 1 + i as u16;
            if row + 1 >= y + h {
                break;
            }
            fb.put_str_centered(x + 1, w.saturating_sub(2), row, line, *style);
        }
    }
}
