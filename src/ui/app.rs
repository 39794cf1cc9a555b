//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::{GameState, HostSettings};
use super::theme::*;
use crate::{GameStatus, Stone};

fn color_name(stone: Stone) -> &'static str {
    match stone {
        Stone::Black => "Black",
        Stone::White => "White",
        Stone::Empty => "-",
    }
}

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: HostSettings) -> Self {
        Self {
            state: GameState::new(settings),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }

    fn new_game(&mut self, ai_color: Stone) {
        log::info!("new game, human plays {}", color_name(ai_color.opponent()));
        self.state.reset(ai_color);
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (play Black)").clicked() {
                        self.new_game(Stone::White);
                        ui.close_menu();
                    }
                    if ui.button("New Game (play White)").clicked() {
                        self.new_game(Stone::Black);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "AI Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("You: {}", color_name(self.state.session.human_color())));
                });
            });
        });
    }

    /// Render the side panel with game info
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                let status = self.state.session.status();
                if status.is_terminal() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, status);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("15 x 15, five in a row").size(11.0).color(TEXT_MUTED));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.session.side_to_move();
            let is_black = turn == Stone::Black;
            let (stone_char, accent) = if is_black {
                ("●", egui::Color32::from_rgb(70, 70, 75))
            } else {
                ("○", egui::Color32::from_rgb(220, 220, 225))
            };

            ui.horizontal(|ui| {
                let stone_color = if is_black { TEXT_PRIMARY } else { egui::Color32::from_rgb(30, 30, 35) };

                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    stone_char,
                    egui::FontId::proportional(28.0),
                    stone_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(color_name(turn).to_uppercase()).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_game_over() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else if self.state.is_ai_busy() {
                        ("AI thinking...", TIMER_WARNING)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let delay = self.state.settings().think_delay.as_secs_f32();
                let color = if secs <= delay {
                    TIMER_NORMAL
                } else if secs <= delay + 1.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{:.2}s", secs)).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            let btn_frame = Frame::new()
                .fill(egui::Color32::from_rgb(50, 53, 58))
                .corner_radius(CornerRadius::same(6))
                .inner_margin(8.0);

            btn_frame.show(ui, |ui| {
                let label = egui::Label::new(RichText::new("New Game (N)").size(12.0).color(TEXT_PRIMARY))
                    .sense(egui::Sense::click());
                if ui.add(label).clicked() {
                    let ai_color = self.state.session.ai_color();
                    self.new_game(ai_color);
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.session.move_count()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.state.last_ai_result else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("{:?}", result.search_type))
                                .size(11.0)
                                .strong()
                                .color(TIMER_NORMAL),
                        );
                        ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                        ui.label(RichText::new(format!("Depth: {}", result.depth)).size(10.0).color(TEXT_SECONDARY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                            ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("-> {}", result.best_move))
                        .size(12.0)
                        .strong()
                        .color(WIN_HIGHLIGHT),
                );
            });
    }

    fn render_game_over_card(&self, ui: &mut egui::Ui, status: GameStatus) {
        let headline = match status.winner() {
            Some(winner) if winner == self.state.session.human_color() => format!("{} WINS! You won.", color_name(winner).to_uppercase()),
            Some(winner) => format!("{} WINS! The AI won.", color_name(winner).to_uppercase()),
            None => "DRAW: the board is full".to_string(),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("GAME OVER")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(180, 255, 180)),
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(16.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(4.0);
                    ui.label(RichText::new("Press N for a new game").size(11.0).color(TEXT_SECONDARY));
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_ERROR));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let snapshot = self.state.session.snapshot();
            let winning_line = self.state.session.winning_line();
            let input_color = (self.state.is_human_turn() && !self.state.is_ai_busy())
                .then(|| self.state.session.human_color());

            if let Some(pos) = self.board_view.show(ui, &snapshot, winning_line, input_color) {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (toggle_debug, new_game) = ctx.input(|i| (i.key_pressed(egui::Key::D), i.key_pressed(egui::Key::N)));

        if toggle_debug {
            self.show_debug = !self.show_debug;
        }
        if new_game {
            let ai_color = self.state.session.ai_color();
            self.new_game(ai_color);
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.poll_ai();
        if self.state.is_ai_turn() && !self.state.is_ai_busy() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Keep polling while the engine works or the delay runs
        if self.state.is_ai_busy() {
            ctx.request_repaint();
        }
    }
}
