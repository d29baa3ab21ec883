//! Precomputed attack maps for pieces with fixed offsets: knights, kings and
//! pawn captures. Tables are built at compile time.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const WHITE_PAWN_CAPTURE_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_CAPTURE_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_OFFSETS);
pub const WHITE_PAWN_ATTACKS: [u64; 64] = leaper_table(&WHITE_PAWN_CAPTURE_OFFSETS);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = leaper_table(&BLACK_PAWN_CAPTURE_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

const fn leaper_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            let (df, dr) = offsets[i];
            attacks |= bit_if_on_board(file + df, rank + dr);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

pub(crate) const fn bit_if_on_board(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << ((rank as usize) * 8 + (file as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_on_d4_reaches_eight_squares_and_on_a1_two() {
        assert_eq!(knight_attacks(27).count_ones(), 8);
        assert_eq!(knight_attacks(0), (1u64 << 10) | (1u64 << 17));
    }

    #[test]
    fn king_in_corner_has_three_neighbours() {
        assert_eq!(king_attacks(0).count_ones(), 3);
        assert_eq!(king_attacks(63).count_ones(), 3);
        assert_eq!(king_attacks(28).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_point_forward_for_each_color() {
        let e2 = 12u8;
        assert_eq!(pawn_attacks(Color::White, e2), (1u64 << 19) | (1u64 << 21));
        let e7 = 52u8;
        assert_eq!(pawn_attacks(Color::Black, e7), (1u64 << 43) | (1u64 << 45));
        // Edge files only capture inward.
        assert_eq!(pawn_attacks(Color::White, 8), 1u64 << 17);
        // Last rank pawns attack nothing.
        assert_eq!(pawn_attacks(Color::White, 60), 0);
    }
}
