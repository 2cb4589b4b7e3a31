//! Monte Carlo Tree Search (MCTS) with UCB1 selection.
//!
//! The tree lives in an arena: nodes are stored in a `Vec` and refer to each other by
//! [`NodeId`]. Each node owns its own board snapshot. One iteration runs
//!
//! 1. Selection: descend through fully expanded nodes by UCB1
//! 2. Expansion: turn one untried move into a child
//! 3. Rollout: random playout from the new child
//! 4. Backpropagation: update statistics back to the root, flipping the reward per ply
//!
//! The whole tree is dropped after a move decision; nothing is reused across moves.

use std::cmp::{Ordering, Reverse};

use log::debug;

use crate::board::{Board, Color, Point};
use crate::config::Config;
use crate::playout::{rollout, stone_reward};

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Position at this node
    pub board: Board,
    /// Player to move at this node
    pub player: Color,
    /// Move that led here from the parent (`None` at the root)
    pub mv: Option<Point>,
    /// Parent node (`None` at the root)
    pub parent: Option<NodeId>,
    /// Expanded children, in expansion order until pruned
    pub children: Vec<NodeId>,
    /// Legal moves not yet expanded; popped from the back
    pub untried: Vec<Point>,
    /// Number of visits
    pub visits: u32,
    /// Accumulated reward (win rate = wins / visits)
    pub wins: f64,
}

impl Node {
    fn new(board: Board, player: Color, mv: Option<Point>, parent: Option<NodeId>) -> Self {
        let untried = board.legal_moves(player);
        Self {
            board,
            player,
            mv,
            parent,
            children: Vec::new(),
            untried,
            visits: 0,
            wins: 0.0,
        }
    }

    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.wins / self.visits as f64
        } else {
            0.0
        }
    }

    /// No untried moves and no children: the player to move had no legal move.
    pub fn is_terminal(&self) -> bool {
        self.untried.is_empty() && self.children.is_empty()
    }

    fn ucb1(&self, parent_visits: u32, c: f64) -> f64 {
        let v = self.visits as f64;
        self.winrate() + c * (2.0 * (parent_visits as f64).ln() / v).sqrt()
    }
}

/// Search tree for a single move decision.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    exploration: f64,
    rollout_depth: usize,
    max_children: usize,
}

impl SearchTree {
    /// Root the tree at a copy of `board` with `player` to move.
    pub fn new(board: &Board, player: Color, config: &Config) -> Self {
        Self {
            nodes: vec![Node::new(board.clone(), player, None, None)],
            exploration: config.exploration,
            rollout_depth: config.rollout_depth,
            max_children: config.max_children,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Total nodes allocated, including pruned ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id`, in current order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.get(id).children.iter().map(|&c| self.get(c))
    }

    /// Run `iterations` select/expand/rollout/backpropagate cycles.
    pub fn run(&mut self, iterations: usize, rng: &mut fastrand::Rng) {
        for _ in 0..iterations {
            let leaf = self.select();
            let node = self.expand(leaf).unwrap_or(leaf);
            let reward = self.simulate(node, rng);
            self.backpropagate(node, reward);
        }

        let root = self.get(self.root());
        debug!(
            "search: {} iterations, {} nodes, {} root children, best {:?}",
            iterations,
            self.len(),
            root.children.len(),
            self.best_move()
        );
    }

    /// Descend from the root while the current node is fully expanded.
    fn select(&mut self) -> NodeId {
        let mut current = self.root();
        loop {
            let node = self.get(current);
            if node.children.is_empty() || !node.untried.is_empty() {
                return current;
            }
            self.prune(current);
            current = self.best_child(current);
        }
    }

    /// Keep only the `max_children` most-visited children of `id`.
    ///
    /// Partial selection keyed by (visits descending, position), so the survivors are
    /// the same as a stable sort would give, ordered most-visited first.
    fn prune(&mut self, id: NodeId) {
        let cap = self.max_children;
        if cap == 0 || self.get(id).children.len() <= cap {
            return;
        }
        let mut keyed: Vec<(Reverse<u32>, usize, NodeId)> = self
            .get(id)
            .children
            .iter()
            .enumerate()
            .map(|(pos, &c)| (Reverse(self.get(c).visits), pos, c))
            .collect();
        keyed.select_nth_unstable(cap - 1);
        keyed.truncate(cap);
        keyed.sort_unstable();
        self.get_mut(id).children = keyed.into_iter().map(|(_, _, c)| c).collect();
    }

    /// Child of `id` with the highest UCB1 score; the first one wins ties.
    fn best_child(&self, id: NodeId) -> NodeId {
        let node = self.get(id);
        let mut best = node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &c in &node.children {
            let score = self.get(c).ucb1(node.visits, self.exploration);
            if score.partial_cmp(&best_score) == Some(Ordering::Greater) {
                best = c;
                best_score = score;
            }
        }
        best
    }

    /// Expand the most recently listed untried move of `id` into a new child.
    ///
    /// Returns `None` if the node has no untried moves.
    fn expand(&mut self, id: NodeId) -> Option<NodeId> {
        let node = self.get_mut(id);
        let (x, y) = node.untried.pop()?;
        let player = node.player;
        let mut board = node.board.clone();
        board.commit(x, y, player);

        let child = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(board, player.opponent(), Some((x, y)), Some(id)));
        self.get_mut(id).children.push(child);
        Some(child)
    }

    /// Random playout from `id`, judged for the node's own player.
    fn simulate(&self, id: NodeId, rng: &mut fastrand::Rng) -> f64 {
        let node = self.get(id);
        let mut board = node.board.clone();
        rollout(&mut board, node.player, self.rollout_depth, rng);
        stone_reward(&board, node.player)
    }

    /// Add `reward` at `id`, then walk to the root, flipping it at every step up.
    fn backpropagate(&mut self, id: NodeId, mut reward: f64) {
        let mut current = Some(id);
        while let Some(cid) = current {
            let node = self.get_mut(cid);
            node.visits += 1;
            node.wins += reward;
            reward = 1.0 - reward;
            current = node.parent;
        }
    }

    /// Move of the most visited root child.
    ///
    /// On equal visit counts the child that comes first in the root's child order
    /// (expansion order, or visit order once pruned) is chosen.
    pub fn best_move(&self) -> Option<Point> {
        let mut best: Option<&Node> = None;
        for child in self.children(self.root()) {
            if best.is_none_or(|b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best.and_then(|n| n.mv)
    }

    /// Root moves ordered by visits, most visited first. Equal counts keep child order,
    /// so the head of the list is [`SearchTree::best_move`].
    pub fn ranked_moves(&self) -> Vec<Point> {
        let mut children: Vec<&Node> = self.children(self.root()).collect();
        children.sort_by_key(|c| Reverse(c.visits));
        children.into_iter().filter_map(|c| c.mv).collect()
    }
}
