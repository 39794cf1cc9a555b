//! Game state management for the Gomoku GUI
//!
//! The engine runs on a worker thread so the window stays responsive. Its
//! answer is then held back until the think delay has passed since the
//! request, and only then committed to the session. Starting a new game
//! cancels both steps.

use crate::{AIEngine, EngineConfig, GameError, GameSession, GameStatus, MoveResult, Pos, StopHandle, Stone};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Host settings chosen on the command line.
#[derive(Debug, Clone)]
pub struct HostSettings {
    pub ai_color: Stone,
    pub engine: EngineConfig,
    /// Minimum time between asking for the AI move and showing it
    pub think_delay: Duration,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            ai_color: Stone::White,
            engine: EngineConfig::default(),
            think_delay: Duration::from_millis(500),
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    /// Engine is searching on a worker thread
    Thinking {
        receiver: Receiver<Option<MoveResult>>,
        start_time: Instant,
        stop: StopHandle,
    },
    /// Engine answered; waiting out the think delay before committing
    Delaying {
        result: MoveResult,
        ready_at: Instant,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub session: GameSession,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
    settings: HostSettings,
}

impl GameState {
    pub fn new(settings: HostSettings) -> Self {
        Self {
            session: GameSession::new(settings.ai_color),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            message: None,
            settings,
        }
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    /// Start over, optionally switching sides. Any pending AI work is dropped.
    pub fn reset(&mut self, ai_color: Stone) {
        self.cancel_ai();
        self.settings.ai_color = ai_color;
        self.session = GameSession::new(ai_color);
        self.last_ai_result = None;
        self.move_timer = MoveTimer::default();
        self.message = None;
    }

    /// Raise the stop flag of a running search and forget any held result.
    pub fn cancel_ai(&mut self) {
        if let AiState::Thinking { stop, .. } = &self.ai_state {
            stop.stop();
            log::debug!("AI request cancelled");
        }
        self.ai_state = AiState::Idle;
    }

    pub fn is_game_over(&self) -> bool {
        self.session.status().is_terminal()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_game_over() && self.session.side_to_move() == self.session.human_color()
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_game_over() && self.session.side_to_move() == self.session.ai_color()
    }

    /// True from the request until the move is committed, delay included
    pub fn is_ai_busy(&self) -> bool {
        !matches!(self.ai_state, AiState::Idle)
    }

    /// Human click. Errors are shown to the player as-is.
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<GameStatus, String> {
        if self.is_ai_busy() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_game_over() && !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        let color = self.session.human_color();
        match self.session.apply_move(pos, color) {
            Ok(status) => {
                self.move_timer.stop();
                self.move_timer.start();
                self.message = None;
                Ok(status)
            }
            Err(err) => {
                log::debug!("rejected human move: {}", err);
                Err(err.to_string())
            }
        }
    }

    /// Kick off the engine on a worker thread when it is the AI's turn.
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_busy() {
            return;
        }

        let board = self.session.board().clone();
        let color = self.session.ai_color();
        let stop = StopHandle::new();
        let mut engine = AIEngine::with_stop_handle(self.settings.engine.clone(), stop.clone());

        let (tx, rx) = channel();
        thread::spawn(move || {
            // The receiver is gone when the game was reset meanwhile
            let _ = tx.send(engine.choose_move(&board, color));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            stop,
        };
    }

    /// Advance the AI request: collect the engine's answer, then commit it
    /// once the think delay is over. Call once per frame.
    pub fn poll_ai(&mut self) {
        let now = Instant::now();
        let next = match &self.ai_state {
            AiState::Idle => return,
            AiState::Thinking { receiver, start_time, .. } => match receiver.try_recv() {
                Ok(Some(result)) => AiState::Delaying {
                    result,
                    ready_at: *start_time + self.settings.think_delay,
                    start_time: *start_time,
                },
                Ok(None) => {
                    self.fail_ai("AI could not find a move");
                    return;
                }
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.fail_ai("AI worker stopped unexpectedly");
                    return;
                }
            },
            AiState::Delaying { ready_at, .. } if now < *ready_at => return,
            AiState::Delaying { .. } => AiState::Idle,
        };

        if let AiState::Delaying { result, start_time, .. } = std::mem::replace(&mut self.ai_state, next) {
            self.commit_ai_move(result, start_time);
        }
    }

    fn commit_ai_move(&mut self, result: MoveResult, start_time: Instant) {
        match self.session.commit_engine_move(result.best_move) {
            Ok(_) => {
                self.move_timer.set_ai_time(start_time.elapsed());
                self.move_timer.start();
                self.last_ai_result = Some(result);
            }
            Err(err @ GameError::InvariantViolation(_)) => {
                self.message = Some(format!("Engine fault: {}", err));
            }
            Err(err) => {
                self.message = Some(err.to_string());
            }
        }
    }

    fn fail_ai(&mut self, text: &str) {
        log::error!("{}", text);
        self.ai_state = AiState::Idle;
        self.message = Some(text.to_string());
    }

    /// Time since the AI request, while one is pending
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } | AiState::Delaying { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_settings() -> HostSettings {
        HostSettings {
            think_delay: Duration::ZERO,
            ..HostSettings::default()
        }
    }

    fn wait_for_ai(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while state.is_ai_busy() && Instant::now() < deadline {
            state.poll_ai();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_human_then_ai_move() {
        let mut state = GameState::new(instant_settings());
        assert!(state.is_human_turn());
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        assert!(state.is_ai_turn());

        state.start_ai_thinking();
        assert!(state.is_ai_busy());
        wait_for_ai(&mut state);

        assert_eq!(state.session.move_count(), 2);
        assert!(state.is_human_turn());
        assert!(state.last_ai_result.is_some());
    }

    #[test]
    fn test_click_rejected_while_ai_busy() {
        let mut state = GameState::new(instant_settings());
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        state.start_ai_thinking();
        assert!(state.try_place_stone(Pos::new(0, 0)).is_err());
        wait_for_ai(&mut state);
    }

    #[test]
    fn test_occupied_click_reports_error() {
        let mut state = GameState::new(instant_settings());
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        state.start_ai_thinking();
        wait_for_ai(&mut state);
        let err = state.try_place_stone(Pos::new(7, 7)).unwrap_err();
        assert!(err.contains("occupied"), "{}", err);
    }

    #[test]
    fn test_think_delay_holds_the_move() {
        let settings = HostSettings {
            think_delay: Duration::from_secs(3600),
            ..HostSettings::default()
        };
        let mut state = GameState::new(settings);
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        state.start_ai_thinking();

        let deadline = Instant::now() + Duration::from_secs(30);
        while !matches!(state.ai_state, AiState::Delaying { .. }) && Instant::now() < deadline {
            state.poll_ai();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(matches!(state.ai_state, AiState::Delaying { .. }));
        state.poll_ai();
        assert_eq!(state.session.move_count(), 1, "move must wait for the delay");

        // New game drops the held move
        state.reset(Stone::White);
        assert!(!state.is_ai_busy());
        assert_eq!(state.session.move_count(), 0);
    }

    #[test]
    fn test_ai_moves_first_as_black() {
        let settings = HostSettings {
            ai_color: Stone::Black,
            ..instant_settings()
        };
        let mut state = GameState::new(settings);
        assert!(state.is_ai_turn());
        state.start_ai_thinking();
        wait_for_ai(&mut state);
        assert_eq!(state.session.board().get(Pos::center()), Stone::Black);
    }
}
