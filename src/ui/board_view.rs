//! Board rendering for the Gomoku GUI

use crate::{Pos, SessionSnapshot, Stone, BOARD_SIZE};
use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if any.
    ///
    /// Clicks are only reported when `input_color` is set (the human is to
    /// move) and the cell is empty.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        snapshot: &SessionSnapshot,
        winning_line: Option<[Pos; 5]>,
        input_color: Option<Stone>,
    ) -> Option<Pos> {
        let available_size = ui.available_size();

        // Fit the board into the available space
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (BOARD_SIZE as f32 - 1.0);

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);
        self.draw_stones(&painter, &snapshot.cells);

        if let Some(pos) = snapshot.last_move {
            self.draw_last_move_marker(&painter, pos);
        }
        if let Some(line) = winning_line {
            self.draw_winning_line(&painter, &line);
        }

        let color = input_color?;
        let board_pos = self.screen_to_board(response.hover_pos()?)?;
        let is_empty = snapshot.cells[board_pos.row as usize][board_pos.col as usize] == Stone::Empty;

        self.draw_hover_preview(&painter, board_pos, color, is_empty);

        if response.clicked() && is_empty {
            Some(board_pos)
        } else {
            None
        }
    }

    /// Draw the 15x15 grid lines
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = (BOARD_SIZE as f32 - 1.0) * self.cell_size;

        for i in 0..BOARD_SIZE {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            // Vertical line
            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + span);
            painter.line_segment([start, end], stroke);

            // Horizontal line
            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + span, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    /// Draw star points (hoshi)
    fn draw_star_points(&self, painter: &Painter) {
        for (row, col) in STAR_POINTS {
            let center = self.board_to_screen(Pos::new(row, col));
            painter.circle_filled(center, STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Draw coordinate labels: column index on top, row index on the left,
    /// matching the `(row, col)` numbers used in messages and logs.
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for i in 0..BOARD_SIZE {
            let along = BOARD_MARGIN + i as f32 * self.cell_size;
            let label = i.to_string();

            let top = Pos2::new(self.board_rect.min.x + along, self.board_rect.min.y + 14.0);
            painter.text(top, egui::Align2::CENTER_CENTER, &label, font.clone(), GRID_LINE);

            let left = Pos2::new(self.board_rect.min.x + 14.0, self.board_rect.min.y + along);
            painter.text(left, egui::Align2::CENTER_CENTER, &label, font.clone(), GRID_LINE);
        }
    }

    /// Draw all placed stones
    fn draw_stones(&self, painter: &Painter, cells: &[[Stone; BOARD_SIZE]; BOARD_SIZE]) {
        for (row, line) in cells.iter().enumerate() {
            for (col, &stone) in line.iter().enumerate() {
                if stone != Stone::Empty {
                    self.draw_stone(painter, Pos::new(row as u8, col as u8), stone);
                }
            }
        }
    }

    /// Draw a single stone with visual polish
    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(center + shadow_offset, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));
                painter.circle_filled(center, radius, BLACK_STONE);

                // Highlight
                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(center + highlight_offset, radius * 0.2, BLACK_STONE_HIGHLIGHT);
            }
            Stone::White => {
                painter.circle_filled(center + shadow_offset, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 40));
                painter.circle_filled(center, radius, WHITE_STONE);

                // Inner shadow for depth
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_STONE_SHADOW));
            }
            Stone::Empty => {}
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let center = self.board_to_screen(pos);
        painter.circle_filled(center, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos; 5]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            painter.line_segment([self.board_to_screen(pair[0]), self.board_to_screen(pair[1])], stroke);
        }

        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        for pos in line {
            painter.circle_stroke(self.board_to_screen(*pos), radius, stroke);
        }
    }

    /// Ghost stone under the pointer, red when the cell is taken
    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Stone, is_empty: bool) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let color = if is_empty {
            match turn {
                Stone::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
                Stone::White => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
                Stone::Empty => return,
            }
        } else {
            hover_blocked()
        };

        painter.circle_filled(center, radius, color);
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;

        Pos::try_new(y.floor() as i32, x.floor() as i32)
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + pos.col as f32 * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + pos.row as f32 * self.cell_size;
        Pos2::new(x, y)
    }
}
