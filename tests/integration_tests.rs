//! Integration tests for tiny-go
//!
//! These exercise the public API end to end: rules on real positions, full searches
//! and short engine-vs-engine games.

use tiny_go::ai::Ai;
use tiny_go::board::{Board, Color, Move, MoveError, Point, is_ko};
use tiny_go::config::Config;
use tiny_go::game::{GameState, Outcome, check_end_game};
use tiny_go::mcts::SearchTree;

// =============================================================================
// Helper functions
// =============================================================================

/// Assert that every stone on the board belongs to a group with a liberty.
fn assert_all_groups_alive(board: &Board) {
    for (x, y) in board.points().collect::<Vec<Point>>() {
        if board.get(x, y).is_some() {
            assert!(board.group_has_liberty(x, y), "group at ({x},{y}) has no liberty\n{board}");
        }
    }
}

/// Play alternating moves from an empty 7x7 game, Black first.
fn setup_game(moves: &[Point]) -> GameState {
    let mut game = GameState::new(7, 6.5);
    for &mv in moves {
        game.play(Move::Play(mv)).expect("setup move should be legal");
    }
    game
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_surrounded_stone_is_captured() {
    let mut board = Board::new(7);
    board.place(3, 3, Color::Black).unwrap();
    for &(x, y) in &[(2, 3), (4, 3), (3, 2)] {
        assert!(board.place(x, y, Color::White).unwrap().is_empty());
    }
    let captured = board.place(3, 4, Color::White).unwrap();
    assert_eq!(board.get(3, 3), None);
    assert!(captured.contains(&(3, 3)));
    assert_eq!(captured.len(), 1);
    assert_all_groups_alive(&board);
}

#[test]
fn test_edge_group_capture() {
    let mut board = Board::new(7);
    for &(x, y) in &[(0, 3), (0, 4)] {
        board.place(x, y, Color::Black).unwrap();
    }
    for &(x, y) in &[(0, 2), (1, 3), (1, 4)] {
        board.place(x, y, Color::White).unwrap();
    }
    let captured = board.place(0, 5, Color::White).unwrap();
    assert_eq!(captured, vec![(0, 3), (0, 4)]);
    assert_eq!(board.count(Color::Black), 0);
}

#[test]
fn test_liberty_invariant_over_random_games() {
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..10 {
        let mut board = Board::new(7);
        let mut player = Color::Black;
        for _ in 0..80 {
            let x = rng.usize(..7);
            let y = rng.usize(..7);
            if board.place(x, y, player).is_ok() {
                player = player.opponent();
            }
            assert_all_groups_alive(&board);
        }
    }
}

#[test]
fn test_suicide_purity_on_crowded_board() {
    let mut board = Board::new(7);
    let mut rng = fastrand::Rng::with_seed(99);
    tiny_go::playout::rollout(&mut board, Color::Black, 35, &mut rng);
    let snapshot = board.clone();
    for (x, y) in snapshot.points().collect::<Vec<Point>>() {
        board.is_suicide(x, y, Color::Black);
        board.is_suicide(x, y, Color::White);
    }
    assert_eq!(board, snapshot);
}

#[test]
fn test_ko_round_trip() {
    let mut game = setup_game(&[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2), (3, 1), (6, 6), (2, 2)]);
    let before_capture = game.board().clone();

    assert_eq!(game.play(Move::Play((2, 1))).unwrap(), vec![(1, 1)]);

    // The retake would reproduce the position before Black's capture.
    let mut retake = game.board().clone();
    retake.place(1, 1, Color::White).unwrap();
    assert!(is_ko(&before_capture, &retake));

    let after_capture = game.board().clone();
    assert_eq!(game.play(Move::Play((1, 1))), Err(MoveError::Ko));
    assert_eq!(game.board(), &after_capture);
}

#[test]
fn test_scoring_is_deterministic() {
    let game = setup_game(&[(3, 3), (2, 2), (4, 4), (1, 1)]);
    let first = game.board().score(6.5);
    let second = game.board().score(6.5);
    assert_eq!(first, second);
    assert_eq!(first, game.score());
}

#[test]
fn test_pass_pass_ends_game() {
    assert!(check_end_game(&[false, true, true]));
    assert!(!check_end_game(&[true, false]));

    let mut game = setup_game(&[(3, 3)]);
    game.play(Move::Pass).unwrap();
    assert!(!game.is_over());
    game.play(Move::Pass).unwrap();
    assert!(game.is_over());
    assert_eq!(game.pass_history(), &[false, true, true]);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_budget_conservation() {
    let config = Config::for_testing();
    let game = setup_game(&[(3, 3), (3, 4)]);
    let mut tree = SearchTree::new(game.board(), game.to_move(), &config);
    tree.run(200, &mut fastrand::Rng::with_seed(8));

    let root = tree.get(tree.root());
    assert_eq!(root.visits, 200);
    let child_visits: u32 = tree.children(tree.root()).map(|c| c.visits).sum();
    assert!(child_visits <= 200);
    assert!(root.children.len() <= config.max_children);
}

#[test]
fn test_search_move_is_legal() {
    let config = Config::for_testing();
    let game = setup_game(&[(3, 3), (2, 3), (4, 3), (3, 2)]);
    let mut tree = SearchTree::new(game.board(), Color::Black, &config);
    tree.run(config.simulations, &mut fastrand::Rng::with_seed(3));
    let (x, y) = tree.best_move().expect("open board has moves");
    assert!(game.board().legal_moves(Color::Black).contains(&(x, y)));
}

#[test]
fn test_engine_vs_engine_game_stays_legal() {
    let config = Config {
        simulations: 20,
        rollout_depth: 8,
        ..Config::for_testing()
    };
    let mut game = GameState::new(5, config.komi);
    let mut ai = Ai::new(config);

    for _ in 0..200 {
        if game.is_over() {
            break;
        }
        let mv = ai.get_move_with_ko(game.board(), game.to_move(), game.previous());
        if let Err(e) = game.play(mv) {
            panic!("engine chose illegal move {mv:?}: {e}");
        }
        assert_all_groups_alive(game.board());
    }

    let (black, white) = game.score();
    let expected = if black > white {
        Outcome::BlackWins
    } else if white > black {
        Outcome::WhiteWins
    } else {
        Outcome::Draw
    };
    assert_eq!(game.outcome(), expected);
}
