//! Board dimensions and search parameters.
//!
//! # Board Size Configuration
//!
//! The default board size is controlled by Cargo features:
//! - `board7x7` (default): 7x7 board
//! - `board9x9`: 9x9 board
//!
//! ```sh
//! cargo build                                            # 7x7 (default)
//! cargo build --no-default-features --features board9x9  # 9x9
//! ```
//!
//! The size is only a default; [`crate::board::Board`] is sized at runtime.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
#[cfg(feature = "board7x7")]
pub const DEFAULT_SIZE: usize = 7;

#[cfg(feature = "board9x9")]
pub const DEFAULT_SIZE: usize = 9;

#[cfg(all(feature = "board7x7", feature = "board9x9"))]
compile_error!("Cannot enable both 'board7x7' and 'board9x9' features at the same time");

#[cfg(not(any(feature = "board7x7", feature = "board9x9")))]
compile_error!("Must enable exactly one board size feature: 'board7x7' or 'board9x9'");

/// Largest board the GTP vertex notation can address (A..T without I).
pub const MAX_SIZE: usize = 19;

/// Compensation points for White.
pub const KOMI: f64 = 6.5;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of search iterations per move.
pub const N_SIMS: usize = 100;

/// UCB1 exploration constant (approximately sqrt(2)).
pub const UCB_C: f64 = 1.41;

/// Maximum number of plies in a single rollout.
pub const ROLLOUT_DEPTH: usize = 30;

/// Children kept per node when selection prunes by visit count.
pub const MAX_CHILDREN: usize = 10;
