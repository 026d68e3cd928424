//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Only the visible rows are drawn; the vanishing zone stays hidden. Pieces
//! and falling blocks are placed at their rounded visual rows so motion
//! follows the core's interpolation.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockType, GamePhase, GAUGE_MAX};

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

const FIELD_BG: Rgb = Rgb::new(28, 28, 36);
const GRID_DOT: Rgb = Rgb::new(80, 80, 92);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const GAUGE_FILL: Rgb = Rgb::new(255, 204, 0);
const GAUGE_EMPTY: Rgb = Rgb::new(70, 70, 70);

/// Flat palette per color.
pub fn block_color(kind: BlockType) -> Option<Rgb> {
    match kind {
        BlockType::None => None,
        BlockType::Red => Some(Rgb::new(255, 59, 48)),
        BlockType::Green => Some(Rgb::new(52, 199, 89)),
        BlockType::Blue => Some(Rgb::new(0, 122, 255)),
        BlockType::Yellow => Some(Rgb::new(255, 204, 0)),
        BlockType::Purple => Some(Rgb::new(175, 82, 222)),
        BlockType::Orange => Some(Rgb::new(255, 149, 0)),
    }
}

/// Board placement computed once per frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    cols: usize,
    rows: usize,
}

/// A lightweight terminal renderer for the match-3 game.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Smallest viewport that shows the whole field and the side panel.
    pub fn min_viewport(&self, snap: &GameSnapshot) -> Viewport {
        let frame_w = snap.field_width as u16 * self.cell_w + 2;
        let frame_h = snap.field_height as u16 * self.cell_h + 2;
        Viewport::new(frame_w + 2 + PANEL_MIN_W, frame_h.max(PANEL_H))
    }

    /// Render the current game into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        if fb.width() != viewport.width || fb.height() != viewport.height {
            fb.resize(viewport.width, viewport.height);
        }
        fb.clear(Cell::default());

        let cols = snap.field_width;
        let rows = snap.field_height;
        let w = cols as u16 * self.cell_w + 2;
        let h = rows as u16 * self.cell_h + 2;
        // Center the field together with the side panel when both fit.
        let with_panel = w + 2 + PANEL_MIN_W;
        let x = if viewport.width >= with_panel {
            (viewport.width - with_panel) / 2
        } else {
            viewport.width.saturating_sub(w) / 2
        };
        let frame = Frame {
            x,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
            cols,
            rows,
        };

        self.draw_border(fb, &frame);

        let dot = CellStyle::fg(GRID_DOT).with_bg(FIELD_BG).dim();
        for y in 0..rows {
            for x in 0..cols {
                self.fill_cell(fb, &frame, x, y, '·', dot);
            }
        }

        for cell in &snap.cells {
            if cell.y >= 0 {
                self.draw_block(fb, &frame, cell.x, cell.y as f32, cell.kind);
            }
        }

        for block in &snap.falling {
            self.draw_block(fb, &frame, block.x, block.visual_y, block.kind);
        }

        if let Some(active) = snap.active {
            let top = active.visual_y - (active.kinds.len() as f32 - 1.0);
            for (i, &kind) in active.kinds.iter().enumerate() {
                self.draw_block(fb, &frame, active.x, top + i as f32, kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &frame);

        if snap.phase == GamePhase::GameOver {
            self.draw_overlay(fb, &frame, &["GAME OVER", "R: RESTART"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: &Frame) {
        let (x, y, w, h) = (frame.x, frame.y, frame.w, frame.h);
        let style = CellStyle::fg(BORDER);

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

    /// Draw a block at a possibly fractional row; rows outside the visible
    /// field are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, frame: &Frame, x: i32, y: f32, kind: BlockType) {
        let Some(fg) = block_color(kind) else {
            return;
        };
        let row = y.round();
        if x < 0 || x as usize >= frame.cols || row < 0.0 || row as usize >= frame.rows {
            return;
        }
        let style = CellStyle::fg(fg).with_bg(FIELD_BG).bold();
        self.fill_cell(fb, frame, x as usize, row as usize, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame,
        x: usize,
        y: usize,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: &Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let mut y = frame.y;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for (i, kinds) in snap.next.iter().enumerate() {
            let px = panel_x + i as u16 * (self.cell_w + 1);
            for (j, &kind) in kinds.iter().enumerate() {
                if let Some(fg) = block_color(kind) {
                    fb.fill_rect(px, y + j as u16, self.cell_w, 1, '█', CellStyle::fg(fg));
                }
            }
        }
        y += snap.next.first().map_or(0, |k| k.len() as u16) + 1;

        fb.put_str(panel_x, y, "GAUGE", label);
        y += 1;
        let fraction = snap.gauge / GAUGE_MAX;
        fb.put_bar(
            panel_x,
            y,
            GAUGE_BAR_W,
            fraction,
            CellStyle::fg(GAUGE_FILL),
            CellStyle::fg(GAUGE_EMPTY).dim(),
        );
        let pct = (snap.gauge.clamp(0.0, GAUGE_MAX)).floor() as u32;
        let end = fb.put_u32(panel_x + GAUGE_BAR_W + 1, y, pct, value);
        fb.put_char(end, y, '%', value);
        y += 2;

        fb.put_str(panel_x, y, "COMBO", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.combo, value);
        y += 2;

        fb.put_str(panel_x, y, "TIME", label);
        y += 1;
        let secs = (snap.elapsed_ms / 1000.0) as u32;
        put_two_digits(fb, panel_x, y, secs / 60, value);
        fb.put_char(panel_x + 2, y, ':', value);
        put_two_digits(fb, panel_x + 3, y, secs % 60, value);
        y += 2;

        let phase = CellStyle { dim: true, ..value };
        fb.put_str(panel_x, y, snap.phase.as_str(), phase);
        if snap.soft_drop {
            fb.put_str(panel_x, y + 1, "soft drop", phase);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: &Frame, lines: &[&str]) {
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        let first = frame.y + frame.h / 2 - (lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = frame.x + frame.w.saturating_sub(text_w) / 2;
            fb.put_str(x, first + i as u16, text, style);
        }
    }
}

const PANEL_MIN_W: u16 = 14;
const PANEL_H: u16 = 16;
const GAUGE_BAR_W: u16 = 10;

fn put_two_digits(fb: &mut FrameBuffer, x: u16, y: u16, value: u32, style: CellStyle) {
    let v = value.min(99);
    fb.put_char(x, y, char::from(b'0' + (v / 10) as u8), style);
    fb.put_char(x + 1, y, char::from(b'0' + (v % 10) as u8), style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveSnapshot, CellSnapshot};

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            field_width: 3,
            field_height: 4,
            vanishing_height: 2,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn palette_skips_none() {
        assert_eq!(block_color(BlockType::None), None);
        for kind in BlockType::COLORS {
            assert!(block_color(kind).is_some());
        }
    }

    #[test]
    fn hidden_rows_are_not_drawn() {
        let mut snap = snapshot();
        snap.cells.push(CellSnapshot {
            x: 0,
            y: -1,
            kind: BlockType::Red,
        });
        snap.active = Some(ActiveSnapshot {
            x: 1,
            y: 0,
            visual_y: 0.0,
            kinds: [BlockType::Red, BlockType::Green, BlockType::Blue],
        });

        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, Viewport::new(8, 6));

        // Only the bottom cell of the piece is on screen, at row 0.
        let blocks: Vec<(u16, u16)> = (0..6)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get(x, y).map(|c| c.ch) == Some('█'))
            .collect();
        assert_eq!(blocks, vec![(3, 1), (4, 1)]);
        assert_eq!(
            fb.get(3, 1).map(|c| c.style.fg),
            block_color(BlockType::Blue)
        );
    }

    #[test]
    fn two_digit_clock() {
        let mut fb = FrameBuffer::new(4, 1);
        put_two_digits(&mut fb, 0, 0, 7, CellStyle::default());
        put_two_digits(&mut fb, 2, 0, 123, CellStyle::default());
        let text: String = fb.row(0).iter().map(|c| c.ch).collect();
        assert_eq!(text, "0799");
    }
}
