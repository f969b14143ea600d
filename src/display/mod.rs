/// Rendering layer: all terminal I/O lives here.
///
/// `Screen` implements the renderer, UI and audio collaborators on top of
/// crossterm. Playfield coordinates are scaled onto whatever terminal size
/// is current; no game logic happens here.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::collaborators::{AudioAdapter, Renderer, UiAdapter};
use crate::compute::star_positions;
use crate::entities::{
    Bullet, Enemy, Player, BULLET_WIDTH, ENEMY_HEIGHT, ENEMY_WIDTH, PLAYER_HEIGHT,
};
use crate::{HEIGHT, WIDTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_STAR: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Rows taken by the HUD line and the top border.
const TOP_ROWS: u16 = 2;
/// Rows taken by the bottom border and the controls hint.
const BOTTOM_ROWS: u16 = 2;

/// Map a terminal column back to a playfield x for pointer input.
pub fn column_to_playfield_x(col: u16, cols: u16) -> f32 {
    let inner = cols.saturating_sub(2).max(1) as f32;
    let offset = col.saturating_sub(1) as f32 + 0.5;
    (offset / inner * WIDTH).clamp(0.0, WIDTH)
}

pub struct Screen<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    score: u32,
    level_label: &'static str,
    game_over_visible: bool,
    start_visible: bool,
    bell_pending: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            score: 0,
            level_label: "",
            game_over_visible: false,
            start_visible: true,
            bell_pending: false,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Shown in the HUD next to the score.
    pub fn set_level_label(&mut self, label: &'static str) {
        self.level_label = label;
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn inner_width(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    fn inner_height(&self) -> u16 {
        self.rows.saturating_sub(TOP_ROWS + BOTTOM_ROWS).max(1)
    }

    fn column(&self, x: f32) -> u16 {
        let inner = self.inner_width();
        let c = (x / WIDTH * inner as f32).floor().clamp(0.0, (inner - 1) as f32);
        1 + c as u16
    }

    /// `None` when `y` lies outside the visible playfield.
    fn row(&self, y: f32) -> Option<u16> {
        if !(0.0..HEIGHT).contains(&y) {
            return None;
        }
        let r = (y / HEIGHT * self.inner_height() as f32).floor() as u16;
        Some(TOP_ROWS + r.min(self.inner_height() - 1))
    }

    fn put(&mut self, col: u16, row: u16, color: Color, text: &str) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    // ── Border & HUD ──────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> io::Result<()> {
        let w = self.cols as usize;
        let bottom = self.rows.saturating_sub(BOTTOM_ROWS);
        let bar = "─".repeat(w.saturating_sub(2));

        self.put(0, 1, C_BORDER, &format!("┌{bar}┐"))?;
        self.put(0, bottom, C_BORDER, &format!("└{bar}┘"))?;
        for row in TOP_ROWS..bottom {
            self.put(0, row, C_BORDER, "│")?;
            self.put(self.cols.saturating_sub(1), row, C_BORDER, "│")?;
        }
        Ok(())
    }

    fn draw_hud(&mut self) -> io::Result<()> {
        let score = format!("Score: {}", self.score);
        self.put(1, 0, C_HUD_SCORE, &score)?;

        if !self.level_label.is_empty() {
            let label = format!("[ {} ]", self.level_label);
            let col = self.cols.saturating_sub(label.chars().count() as u16 + 1);
            self.put(col, 0, Color::White, &label)?;
        }

        let hint = if self.start_visible {
            "1/2/3 : Start   Q : Quit"
        } else {
            "← → / A D : Move   SPACE : Shoot   Mouse : Drag   Q : Quit"
        };
        self.put(1, self.rows.saturating_sub(1), C_HINT, hint)
    }

    // ── Overlays ──────────────────────────────────────────────────────────────

    fn draw_centered(&mut self, lines: &[(String, Color)]) -> io::Result<()> {
        let cx = self.cols / 2;
        let start_row = (self.rows / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (msg, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            self.put(col, start_row + i as u16, *color, msg)?;
        }
        Ok(())
    }

    fn draw_start_overlay(&mut self) -> io::Result<()> {
        let lines = [
            ("★  PIXEL  SHOOTER  ★".to_string(), Color::Cyan),
            (String::new(), Color::White),
            ("Select difficulty:".to_string(), Color::White),
            ("[1] Easy".to_string(), Color::Green),
            ("[2] Medium".to_string(), Color::Yellow),
            ("[3] Hard".to_string(), Color::Red),
        ];
        self.draw_centered(&lines)
    }

    fn draw_game_over_overlay(&mut self) -> io::Result<()> {
        let lines = [
            ("╔══════════════════╗".to_string(), Color::Red),
            ("║    GAME  OVER    ║".to_string(), Color::Red),
            ("╚══════════════════╝".to_string(), Color::Red),
            (format!("Final Score: {}", self.score), Color::Yellow),
            ("R - Restart  M - Menu  Q - Quit".to_string(), Color::White),
        ];
        self.draw_centered(&lines)
    }
}

impl<W: Write> Renderer for Screen<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()
    }

    fn draw_background(&mut self, frame: u64) -> io::Result<()> {
        for (x, y) in star_positions(frame) {
            if let Some(row) = self.row(y) {
                let col = self.column(x);
                self.put(col, row, C_STAR, ".")?;
            }
        }
        Ok(())
    }

    fn draw_player(&mut self, player: &Player) -> io::Result<()> {
        // Sprite (2 rows, 3 cols):
        //   ▲
        //  /|\
        let col = self.column(player.center_x());
        let tip_row = self.row(player.y);
        if let Some(row) = tip_row {
            self.put(col, row, C_PLAYER, "▲")?;
        }
        // Wings go at least one row under the tip.
        let wing_row = self
            .row(player.y + PLAYER_HEIGHT / 2.0)
            .map(|r| tip_row.map_or(r, |tip| r.max(tip + 1)));
        if let Some(row) = wing_row {
            if row < self.rows.saturating_sub(BOTTOM_ROWS) {
                let left = col.saturating_sub(1).max(1);
                self.put(left, row, C_PLAYER, "/|\\")?;
            }
        }
        Ok(())
    }

    fn draw_bullet(&mut self, bullet: &Bullet) -> io::Result<()> {
        if let Some(row) = self.row(bullet.y) {
            let col = self.column(bullet.x + BULLET_WIDTH / 2.0);
            self.put(col, row, C_BULLET, "║")?;
        }
        Ok(())
    }

    fn draw_enemy(&mut self, enemy: &Enemy) -> io::Result<()> {
        if let Some(row) = self.row(enemy.y + ENEMY_HEIGHT / 2.0) {
            let col = self.column(enemy.x + ENEMY_WIDTH / 2.0);
            let left = col.saturating_sub(1).max(1);
            self.put(left, row, C_ENEMY, "<▼>")?;
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.draw_hud()?;
        if self.start_visible {
            self.draw_start_overlay()?;
        }
        if self.game_over_visible {
            self.draw_game_over_overlay()?;
        }
        if self.bell_pending {
            self.out.queue(Print('\u{7}'))?;
            self.bell_pending = false;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

impl<W: Write> UiAdapter for Screen<W> {
    fn show_score(&mut self, score: u32) {
        self.score = score;
    }

    fn show_game_over_overlay(&mut self, visible: bool) {
        self.game_over_visible = visible;
    }

    fn show_start_overlay(&mut self, visible: bool) {
        self.start_visible = visible;
    }
}

impl<W: Write> AudioAdapter for Screen<W> {
    /// The terminal bell stands in for the explosion; several kills in one
    /// frame ring once.
    fn play_explosion(&mut self) {
        self.bell_pending = true;
    }
}
