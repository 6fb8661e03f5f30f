//! Move-tree leaf counting ("perft") for regression checks and benchmarks.
//!
//! Sides alternate strictly from `to_move`; a side with no moves ends its
//! branch without contributing leaves.

use crate::errors::DraughtsResult;
use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Move, Player};
use crate::move_generation::legal_move_apply::{apply_move, is_crowning_move};
use crate::move_generation::legal_move_generator::all_legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub crownings: usize,
    /// Interior positions where the side to move was stuck.
    pub dead_ends: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.crownings += rhs.crownings;
        self.dead_ends += rhs.dead_ends;
    }
}

pub fn perft(board: &Board, to_move: Player, depth: u8) -> DraughtsResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    perft_recurse(board, to_move, depth, &mut total)?;
    Ok(total)
}

/// Leaf counts below each root move, in generation order.
pub fn perft_divide(
    board: &Board,
    to_move: Player,
    depth: u8,
) -> DraughtsResult<Vec<(Move, PerftCounts)>> {
    let mut out = Vec::new();
    for mv in all_legal_moves(board, to_move) {
        let next = apply_move(board, &mv)?;
        let counts = if depth <= 1 {
            leaf_counts(board, &mv)
        } else {
            perft(&next, to_move.opposite(), depth - 1)?
        };
        out.push((mv, counts));
    }
    Ok(out)
}

fn perft_recurse(
    board: &Board,
    to_move: Player,
    remaining: u8,
    counts: &mut PerftCounts,
) -> DraughtsResult<()> {
    let moves = all_legal_moves(board, to_move);
    if moves.is_empty() {
        counts.dead_ends += 1;
        return Ok(());
    }

    for mv in moves {
        if remaining == 1 {
            counts.merge(leaf_counts(board, &mv));
            continue;
        }
        let next = apply_move(board, &mv)?;
        perft_recurse(&next, to_move.opposite(), remaining - 1, counts)?;
    }

    Ok(())
}

fn leaf_counts(board: &Board, mv: &Move) -> PerftCounts {
    let crowning = board
        .piece_at(mv.from)
        .is_some_and(|piece| is_crowning_move(piece, mv));
    PerftCounts {
        nodes: 1,
        captures: usize::from(mv.is_jump()),
        crownings: usize::from(crowning),
        dead_ends: 0,
    }
}
