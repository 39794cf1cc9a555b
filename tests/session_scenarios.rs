//! Integration tests for the session API: a host driving whole games

use assert_matches::assert_matches;
use gomoku::{
    start_game, AIEngine, EngineConfig, GameError, GameSession, GameStatus, InvalidReason, Pos, SearchType, Stone,
    BOARD_SIZE,
};

fn play(session: &mut GameSession, moves: &[((u8, u8), Stone)]) {
    for &((r, c), stone) in moves {
        session.apply_move(Pos::new(r, c), stone).unwrap();
    }
}

#[test]
fn test_ai_answers_center_opening_nearby() {
    let mut session = start_game();
    let mut engine = AIEngine::new();

    session.apply_move(Pos::new(7, 7), Stone::Black).unwrap();
    let reply = session.request_ai_move(&mut engine).unwrap();

    assert_eq!(reply.status, GameStatus::InProgress);
    assert!(reply.pos.chebyshev(Pos::new(7, 7)) <= 2, "reply {} too far away", reply.pos);
    assert!(reply.pos.manhattan(Pos::new(7, 7)) <= 3);
    assert_eq!(session.board().get(reply.pos), Stone::White);
}

#[test]
fn test_ai_takes_immediate_win() {
    let mut session = start_game();
    let mut engine = AIEngine::new();
    play(
        &mut session,
        &[
            ((0, 0), Stone::Black),
            ((5, 5), Stone::White),
            ((0, 2), Stone::Black),
            ((5, 6), Stone::White),
            ((14, 3), Stone::Black),
            ((5, 7), Stone::White),
            ((12, 12), Stone::Black),
            ((5, 8), Stone::White),
            ((9, 1), Stone::Black),
        ],
    );

    let reply = session.request_ai_move(&mut engine).unwrap();
    assert_eq!(reply.result.search_type, SearchType::ImmediateWin);
    assert!(reply.pos == Pos::new(5, 4) || reply.pos == Pos::new(5, 9));
    assert_eq!(reply.status, GameStatus::WhiteWon);
    assert!(session.winning_line().is_some());
}

#[test]
fn test_ai_blocks_four() {
    let mut session = start_game();
    let mut engine = AIEngine::new();
    play(
        &mut session,
        &[
            ((3, 3), Stone::Black),
            ((10, 10), Stone::White),
            ((3, 4), Stone::Black),
            ((12, 9), Stone::White),
            ((3, 5), Stone::Black),
            ((9, 13), Stone::White),
            ((3, 6), Stone::Black),
        ],
    );

    let reply = session.request_ai_move(&mut engine).unwrap();
    assert_eq!(reply.result.search_type, SearchType::Block);
    assert!(reply.pos == Pos::new(3, 2) || reply.pos == Pos::new(3, 7));
    assert_eq!(reply.status, GameStatus::InProgress);
}

#[test]
fn test_ai_blocks_open_three() {
    let mut session = start_game();
    let mut engine = AIEngine::new();
    play(
        &mut session,
        &[
            ((3, 3), Stone::Black),
            ((10, 10), Stone::White),
            ((3, 4), Stone::Black),
            ((12, 12), Stone::White),
            ((3, 5), Stone::Black),
        ],
    );

    let reply = session.request_ai_move(&mut engine).unwrap();
    assert!(
        reply.pos == Pos::new(3, 2) || reply.pos == Pos::new(3, 6),
        "open three left unblocked, AI played {}",
        reply.pos
    );
}

#[test]
fn test_same_position_same_reply() {
    let moves = [
        ((7, 7), Stone::Black),
        ((7, 8), Stone::White),
        ((8, 8), Stone::Black),
        ((6, 6), Stone::White),
        ((9, 9), Stone::Black),
    ];
    let mut first = start_game();
    let mut second = start_game();
    play(&mut first, &moves);
    play(&mut second, &moves);

    let a = first.request_ai_move(&mut AIEngine::new()).unwrap();
    let b = second.request_ai_move(&mut AIEngine::new()).unwrap();
    assert_eq!(a.pos, b.pos);
    assert_eq!(first.snapshot(), second.snapshot());
}

#[test]
fn test_filled_board_is_draw() {
    let mut session = start_game();
    let mut status = GameStatus::InProgress;
    for row in 0..BOARD_SIZE as u8 {
        for col in 0..BOARD_SIZE as u8 {
            let stone = if (col / 2 + row) % 2 == 0 { Stone::Black } else { Stone::White };
            status = session.apply_move(Pos::new(row, col), stone).unwrap();
        }
    }
    assert_eq!(status, GameStatus::Draw);
    assert_matches!(
        session.apply_move(Pos::new(7, 7), Stone::Black),
        Err(GameError::MoveOnTerminalGame { status: GameStatus::Draw })
    );
}

#[test]
fn test_user_errors_are_reported() {
    let mut session = start_game();
    session.apply_move(Pos::new(7, 7), Stone::Black).unwrap();

    let err = session.apply_move(Pos::new(7, 7), Stone::White).unwrap_err();
    assert!(err.is_user_error());
    assert_matches!(err, GameError::InvalidMove { reason: InvalidReason::Occupied, .. });
    assert_eq!(err.to_string(), "invalid move at (7, 7): cell is occupied");

    let err = session.apply_move(Pos::new(15, 0), Stone::White).unwrap_err();
    assert_matches!(err, GameError::InvalidMove { reason: InvalidReason::OutOfBounds, .. });
    assert_eq!(session.move_count(), 1);
}

#[test]
fn test_self_play_reaches_a_result() {
    let config = EngineConfig::default().with_max_depth(2);
    let mut black = AIEngine::with_config(config.clone());
    let mut white = AIEngine::with_config(config);
    let mut session = GameSession::new(Stone::White);

    while !session.status().is_terminal() {
        let (engine, stone) = if session.side_to_move() == Stone::Black {
            (&mut black, Stone::Black)
        } else {
            (&mut white, Stone::White)
        };
        let result = engine.choose_move(session.board(), stone).unwrap();
        session.apply_move(result.best_move, stone).unwrap();
        assert_eq!(session.board().stone_count(), session.move_count());
    }

    let status = session.status();
    assert!(status.is_terminal());
    if status.winner().is_some() {
        assert!(session.winning_line().is_some());
    }
}
