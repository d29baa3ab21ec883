//! FEN-to-GameState parser.
//!
//! Builds a fully-populated state from a Forsyth-Edwards Notation string,
//! including piece bitboards, rights, clocks and occupancies, then checks that
//! the position could occur in a game this engine plays. The result carries
//! no game chain; `GameState::from_fen` roots a new one.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::CASTLING_LANES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::utils::algebraic::algebraic_to_square;

const BACK_RANKS: u64 = 0xFF00_0000_0000_00FF;

fn invalid(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidRepresentation(reason.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let [board_part, side_part, castling_part, en_passant_part, halfmove_part, fullmove_part] =
        fields[..]
    else {
        return Err(invalid(format!(
            "FEN must have 6 fields, found {}",
            fields.len()
        )));
    };

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.recalc_occupancy();
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("invalid fullmove number: {fullmove_part}")))?;

    validate_position(&game_state)?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;
        let mut previous_was_digit = false;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                // Adjacent counts such as "44" must be written as one digit.
                if previous_was_digit {
                    return Err(invalid(format!("rank '{rank_str}' has adjacent empty-square counts")));
                }
                previous_was_digit = true;
                file += empty_count as usize;
                if file > 8 {
                    return Err(invalid(format!("rank '{rank_str}' has more than 8 files")));
                }
                continue;
            }

            previous_was_digit = false;
            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid(format!("rank '{rank_str}' has more than 8 files")));
            }

            let sq = board_rank * 8 + file;
            game_state.pieces[piece.color.index()][piece.kind.index()] |= 1u64 << sq;
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        let bit = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(format!("invalid castling rights character: {ch}"))),
        };
        if rights & bit != 0 {
            return Err(invalid(format!("repeated castling rights character: {ch}")));
        }
        rights |= bit;
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(format!("invalid en-passant square: {en_passant_part}")))
}

fn validate_position(game_state: &GameState) -> ChessResult<()> {
    for color in Color::BOTH {
        let kings = game_state.pieces[color.index()][PieceKind::King.index()].count_ones();
        if kings != 1 {
            return Err(invalid(format!("{color} must have exactly one king, found {kings}")));
        }

        if game_state.pieces[color.index()][PieceKind::Pawn.index()] & BACK_RANKS != 0 {
            return Err(invalid(format!("{color} has a pawn on rank 1 or 8")));
        }
    }

    if game_state.fullmove_number == 0 {
        return Err(invalid("fullmove number must start at 1"));
    }

    validate_castling_rights(game_state)?;
    validate_en_passant(game_state)?;

    let waiting_side = game_state.side_to_move.opposite();
    if let Some(king_sq) = game_state.king_square(waiting_side) {
        if is_square_attacked(game_state, king_sq, game_state.side_to_move) {
            return Err(invalid(format!(
                "{waiting_side} is in check but it is {} to move",
                game_state.side_to_move
            )));
        }
    }

    Ok(())
}

fn validate_castling_rights(game_state: &GameState) -> ChessResult<()> {
    for lane in CASTLING_LANES {
        if game_state.castling_rights & lane.right == 0 {
            continue;
        }
        let own = &game_state.pieces[lane.color.index()];
        let king_home = own[PieceKind::King.index()] & (1u64 << lane.king_from) != 0;
        let rook_home = own[PieceKind::Rook.index()] & (1u64 << lane.rook_from) != 0;
        if !king_home || !rook_home {
            return Err(invalid(format!(
                "castling right for {} requires king and rook on their home squares",
                lane.color
            )));
        }
    }
    Ok(())
}

fn validate_en_passant(game_state: &GameState) -> ChessResult<()> {
    let Some(ep) = game_state.en_passant_square else {
        return Ok(());
    };

    // The side that just moved pushed a pawn two squares past `ep`.
    let pusher = game_state.side_to_move.opposite();
    let (expected_rank, pawn_sq, origin_sq) = match pusher {
        Color::White => (2u8, ep + 8, ep.wrapping_sub(8)),
        Color::Black => (5u8, ep.wrapping_sub(8), ep + 8),
    };

    if square_rank(ep) != expected_rank {
        return Err(invalid(format!(
            "en-passant square is on the wrong rank for {} to move",
            game_state.side_to_move
        )));
    }

    let pushed_pawn = game_state.pieces[pusher.index()][PieceKind::Pawn.index()] & (1u64 << pawn_sq);
    let path_clear = game_state.occupancy_all & ((1u64 << ep) | (1u64 << origin_sq)) == 0;
    if pushed_pawn == 0 || !path_clear {
        return Err(invalid("en-passant square does not follow a double pawn push"));
    }

    Ok(())
}
