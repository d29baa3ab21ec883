//! Occupancy-aware ray attacks for bishops, rooks and queens.
//!
//! Rays run from the origin until the board edge or the first occupied square,
//! which is included so that captures of a blocking enemy piece (and defence
//! of a blocking friendly piece) fall out of the same mask.

use crate::game_state::chess_types::Square;
use crate::moves::leaper_attacks::bit_if_on_board;

const DIAGONALS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ORTHOGONALS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Empty-board rays, useful for alignment tests.
pub const BISHOP_RAYS: [u64; 64] = empty_board_rays(&DIAGONALS);
pub const ROOK_RAYS: [u64; 64] = empty_board_rays(&ORTHOGONALS);

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    DIAGONALS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ORTHOGONALS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = (square % 8) as i32 + file_step;
    let mut rank = (square / 8) as i32 + rank_step;
    let mut attacks = 0u64;

    loop {
        let bit = bit_if_on_board(file, rank);
        if bit == 0 {
            break;
        }
        attacks |= bit;
        if occupancy & bit != 0 {
            break;
        }
        file += file_step;
        rank += rank_step;
    }

    attacks
}

const fn empty_board_rays(directions: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut d = 0usize;
        while d < directions.len() {
            let (df, dr) = directions[d];
            let mut file = (sq % 8) as i32 + df;
            let mut rank = (sq / 8) as i32 + dr;
            loop {
                let bit = bit_if_on_board(file, rank);
                if bit == 0 {
                    break;
                }
                table[sq] |= bit;
                file += df;
                rank += dr;
            }
            d += 1;
        }
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_ray_counts_from_d4() {
        let d4 = 27usize;
        assert_eq!(ROOK_RAYS[d4].count_ones(), 14);
        assert_eq!(BISHOP_RAYS[d4].count_ones(), 13);
        assert_eq!(queen_attacks(27, 0).count_ones(), 27);
    }

    #[test]
    fn blocker_is_included_and_stops_the_ray() {
        let a1 = 0u8;
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(a1, blocker_on_a4);

        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
        assert_ne!(attacks & (1u64 << 7), 0);
    }

    #[test]
    fn queen_attacks_match_union_of_bishop_and_rook() {
        let d4 = 27u8;
        let blockers = (1u64 << 43) | (1u64 << 30);
        let attacks = queen_attacks(d4, blockers);

        assert_eq!(attacks, bishop_attacks(d4, blockers) | rook_attacks(d4, blockers));
        assert_ne!(attacks & (1u64 << 43), 0);
        assert_eq!(attacks & (1u64 << 51), 0);
        assert_eq!(attacks & (1u64 << 31), 0);
    }
}
