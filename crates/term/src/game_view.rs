//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! World pixels from the core are converted to terminal cells with the board
//! grid as reference, so rail waypoints land inside the cell that owns them and
//! the train can be drawn off-board (at the dock) as well as on it.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Direction, PieceKind, BLOCK_SIZE, BOARD_HEIGHT, BOARD_WIDTH, GRID_OFFSET_X, GRID_OFFSET_Y,
    HEADING_OFFSET,
};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board frame placement inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Terminal renderer for Tetris Train.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_rail: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            show_rail: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Toggle the rail overlay on placed pieces.
    pub fn with_rail(mut self, show_rail: bool) -> Self {
        self.show_rail = show_rail;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame(viewport);
        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', bg);
        self.draw_border(fb, frame, border);

        // Placed cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_code(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_block(fb, frame, x, y, kind),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if self.show_rail {
            self.draw_rail(fb, frame, snap);
        }

        // Active piece.
        if let Some(active) = snap.active.as_ref() {
            for &(x, y) in &active.cells {
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_block(fb, frame, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_train(fb, frame, snap);
        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused {
            self.draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    /// Terminal cell under a world-space point, if it is inside the viewport.
    fn world_to_screen(&self, frame: Frame, wx: f32, wy: f32) -> Option<(u16, u16)> {
        let col = ((wx - GRID_OFFSET_X) / BLOCK_SIZE * self.cell_w as f32).floor();
        let row = ((wy - GRID_OFFSET_Y) / BLOCK_SIZE * self.cell_h as f32).floor();
        let sx = frame.x as f32 + 1.0 + col;
        let sy = frame.y as f32 + 1.0 + row;
        if sx < 0.0 || sy < 0.0 || sx > u16::MAX as f32 || sy > u16::MAX as f32 {
            return None;
        }
        Some((sx as u16, sy as u16))
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), BOARD_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    /// Rail glyphs drawn over the blocks that carry them.
    fn draw_rail(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        for wp in &snap.rail {
            let col = ((wp.x - GRID_OFFSET_X) / BLOCK_SIZE).floor();
            let row = ((wp.y - GRID_OFFSET_Y) / BLOCK_SIZE).floor();
            if col < 0.0 || row < 0.0 || col >= BOARD_WIDTH as f32 || row >= BOARD_HEIGHT as f32 {
                continue;
            }
            let (x, y) = (col as u16, row as u16);
            let bg = PieceKind::from_code(snap.board[y as usize][x as usize])
                .map(piece_color)
                .unwrap_or(BOARD_BG);
            let style = CellStyle::new(Rgb::new(20, 20, 20), bg).bold();
            self.fill_cell_rect(fb, frame, x, y, rail_glyph(wp.direction), style);
        }
    }

    fn draw_train(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        let Some((x, y)) = self.world_to_screen(frame, snap.train.x, snap.train.y) else {
            return;
        };
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(139, 69, 19)).bold();
        fb.put_char(x, y, train_glyph(snap.train.heading), style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        fb.put_str(
            panel_x,
            y,
            snap.next.as_str(),
            CellStyle::new(piece_color(snap.next), PANEL_BG).bold(),
        );
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.placed_count as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TRAIN", label);
        y = y.saturating_add(1);
        if snap.rail.is_empty() {
            fb.put_str(panel_x, y, "docked", value.dim());
        } else {
            fb.put_u32(panel_x, y, snap.train.path_index as u32 + 1, value);
            let n = 1 + digits(snap.train.path_index as u32 + 1);
            fb.put_char(panel_x + n - 1, y, '/', value.dim());
            fb.put_u32(panel_x + n, y, snap.rail.len() as u32, value);
        }
        y = y.saturating_add(2);

        if panel_w >= 16 && y.saturating_add(4) < viewport.height {
            let hint = value.dim();
            fb.put_str(panel_x, y, "←→↓ move", hint);
            fb.put_str(panel_x, y + 1, "↑/space rotate", hint);
            fb.put_str(panel_x, y + 2, "p pause r restart", hint);
            fb.put_str(panel_x, y + 3, "q quit", hint);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn digits(n: u32) -> u16 {
    let mut n = n;
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// Track glyph for a waypoint direction tag.
pub fn rail_glyph(direction: Direction) -> char {
    match direction {
        Direction::East | Direction::West => '═',
        Direction::North | Direction::South => '║',
        Direction::Junction => '╬',
    }
}

/// Arrow for the train's direction of travel.
///
/// The core heading is the travel angle shifted by a quarter turn; undo that
/// and bucket the result into the four screen directions.
pub fn train_glyph(heading: f32) -> char {
    use std::f32::consts::{FRAC_PI_4, PI, TAU};
    let travel = (heading - HEADING_OFFSET).rem_euclid(TAU);
    if travel < FRAC_PI_4 || travel >= TAU - FRAC_PI_4 {
        '▶'
    } else if travel < PI - FRAC_PI_4 {
        '▼'
    } else if travel < PI + FRAC_PI_4 {
        '◀'
    } else {
        '▲'
    }
}
