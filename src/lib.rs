//! tiny-go: a small-board Go engine with Monte Carlo Tree Search.
//!
//! ## Modules
//!
//! - [`board`] - Rules: liberties, captures, suicide, ko, scoring
//! - [`playout`] - Random rollouts and their reward
//! - [`mcts`] - Arena-based UCB1 tree search
//! - [`ai`] - Move chooser built on the search
//! - [`game`] - Turn state, pass history and end of game
//! - [`gtp`] - Go Text Protocol front-end
//! - [`config`], [`constants`] - Engine parameters
//!
//! ## Example
//!
//! ```
//! use tiny_go::ai::Ai;
//! use tiny_go::board::Move;
//! use tiny_go::config::Config;
//! use tiny_go::game::GameState;
//!
//! let mut game = GameState::new(7, 6.5);
//! game.play(Move::Play((3, 3))).unwrap();
//!
//! let mut ai = Ai::new(Config::for_testing());
//! let reply = ai.get_move(game.board(), game.to_move());
//! game.play(reply).unwrap();
//! ```

pub mod ai;
pub mod board;
pub mod config;
pub mod constants;
pub mod game;
pub mod gtp;
pub mod mcts;
pub mod playout;
