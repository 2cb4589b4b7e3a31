//! Computer player: runs a tree search and checks its answer against the live board.

use log::{debug, warn};

use crate::board::{Board, Color, Move, Point, is_ko};
use crate::config::Config;
use crate::mcts::SearchTree;

/// MCTS-driven move chooser.
pub struct Ai {
    config: Config,
    rng: fastrand::Rng,
}

impl Ai {
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { config, rng }
    }

    /// Choose a move for `color` on `board`, ignoring ko.
    pub fn get_move(&mut self, board: &Board, color: Color) -> Move {
        self.get_move_with_ko(board, color, None)
    }

    /// Choose a move for `color` on `board`.
    ///
    /// The search runs on its own copy; `board` is never modified. Root moves are
    /// tried most visited first, and the first one that is playable on the live board
    /// (empty, not suicide, not recreating `previous`) is returned. If none of them is,
    /// a random playable move is returned, and `Move::Pass` when there is none.
    pub fn get_move_with_ko(
        &mut self,
        board: &Board,
        color: Color,
        previous: Option<&Board>,
    ) -> Move {
        let mut tree = SearchTree::new(board, color, &self.config);
        tree.run(self.config.simulations, &mut self.rng);
        let ranked = tree.ranked_moves();
        drop(tree);

        self.pick(&ranked, board, color, previous)
    }

    fn pick(
        &mut self,
        ranked: &[Point],
        board: &Board,
        color: Color,
        previous: Option<&Board>,
    ) -> Move {
        let playable = |&(x, y): &Point| {
            let mut next = board.clone();
            next.place(x, y, color).is_ok() && previous.is_none_or(|prev| !is_ko(prev, &next))
        };

        if let Some(&mv) = ranked.iter().find(|&&p| playable(&p)) {
            if ranked.first() != Some(&mv) {
                warn!("search move {:?} rejected on live board, using {mv:?}", ranked[0]);
            }
            return Move::Play(mv);
        }

        let legal: Vec<Point> = board.legal_moves(color).into_iter().filter(playable).collect();
        if legal.is_empty() {
            debug!("{color} has no legal move, passing");
            return Move::Pass;
        }
        warn!("no search move playable on live board, picking a random legal move");
        Move::Play(legal[self.rng.usize(..legal.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    /// White to move right after Black took a ko; retaking at (5,5) is illegal.
    fn ko_game() -> GameState {
        let mut game = GameState::new(7, 6.5);
        for mv in [
            (5, 6), // B
            (4, 6), // W
            (6, 5), // B
            (5, 5), // W
            (5, 4), // B
            (3, 5), // W
            (0, 0), // B elsewhere
            (4, 4), // W
            (4, 5), // B takes the ko
        ] {
            game.play(Move::Play(mv)).unwrap();
        }
        game
    }

    #[test]
    fn test_get_move_does_not_mutate_board() {
        let mut board = Board::new(7);
        board.place(3, 3, Color::Black).unwrap();
        let before = board.clone();
        let mut ai = Ai::new(Config::for_testing());
        let mv = ai.get_move(&board, Color::White);
        assert_eq!(board, before);
        match mv {
            Move::Play((x, y)) => assert!(board.legal_moves(Color::White).contains(&(x, y))),
            Move::Pass => panic!("expected a move on an open board"),
        }
    }

    #[test]
    fn test_get_move_matches_search_recommendation() {
        let config = Config::for_testing();
        let board = Board::new(5);
        let mut ai = Ai::new(config.clone());
        let mv = ai.get_move(&board, Color::Black);

        let mut tree = SearchTree::new(&board, Color::Black, &config);
        tree.run(config.simulations, &mut fastrand::Rng::with_seed(42));
        assert_eq!(mv, Move::Play(tree.best_move().unwrap()));
    }

    #[test]
    fn test_passes_without_legal_moves() {
        let mut ai = Ai::new(Config::for_testing());
        assert_eq!(ai.get_move(&Board::new(1), Color::Black), Move::Pass);
    }

    #[test]
    fn test_passes_when_only_suicide_points_remain() {
        // 2x2 board with black at (1,0) and (0,1): both empty points are suicide for white.
        let mut board = Board::new(2);
        board.place(1, 0, Color::Black).unwrap();
        board.place(0, 1, Color::Black).unwrap();
        let mut ai = Ai::new(Config::for_testing());
        assert_eq!(ai.get_move(&board, Color::White), Move::Pass);
        assert!(matches!(ai.get_move(&board, Color::Black), Move::Play(_)));
    }

    #[test]
    fn test_seeded_ai_is_deterministic() {
        let board = Board::new(7);
        let mut a = Ai::new(Config::for_testing());
        let mut b = Ai::new(Config::for_testing());
        assert_eq!(a.get_move(&board, Color::Black), b.get_move(&board, Color::Black));
    }

    #[test]
    fn test_pick_skips_ko_retake_for_next_ranked_move() {
        let game = ko_game();
        let mut ai = Ai::new(Config::for_testing());
        let ranked = [(5, 5), (3, 6), (0, 3)];
        let mv = ai.pick(&ranked, game.board(), Color::White, game.previous());
        assert_eq!(mv, Move::Play((3, 6)));
        // Without the previous board the retake is an ordinary capture.
        assert_eq!(ai.pick(&ranked, game.board(), Color::White, None), Move::Play((5, 5)));
    }

    #[test]
    fn test_pick_falls_back_to_random_non_ko_move() {
        let game = ko_game();
        let mut ai = Ai::new(Config::for_testing());
        for _ in 0..20 {
            match ai.pick(&[(5, 5)], game.board(), Color::White, game.previous()) {
                Move::Play(p) => {
                    assert_ne!(p, (5, 5));
                    assert!(game.board().legal_moves(Color::White).contains(&p));
                }
                Move::Pass => panic!("white has legal moves besides the ko"),
            }
        }
    }

    #[test]
    fn test_get_move_with_ko_is_always_playable() {
        for seed in 0..10 {
            let mut game = ko_game();
            let config = Config {
                simulations: 1,
                seed: Some(seed),
                ..Config::for_testing()
            };
            let mut ai = Ai::new(config);
            let mv = ai.get_move_with_ko(game.board(), Color::White, game.previous());
            assert_ne!(mv, Move::Pass);
            assert_ne!(mv, Move::Play((5, 5)));
            assert!(game.play(mv).is_ok(), "seed {seed}: {mv:?} rejected");
        }
    }
}
