use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_name;

pub fn generate_fen(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state),
        side_to_move,
        generate_castling_field(game_state.castling_rights),
        game_state
            .en_passant_square
            .map_or_else(|| "-".to_owned(), square_name),
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match game_state.piece_at(rank * 8 + file) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.to_fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (CASTLE_WHITE_KINGSIDE, 'K'),
        (CASTLE_WHITE_QUEENSIDE, 'Q'),
        (CASTLE_BLACK_KINGSIDE, 'k'),
        (CASTLE_BLACK_QUEENSIDE, 'q'),
    ]
    .into_iter()
    .filter(|(bit, _)| rights & bit != 0)
    .map(|(_, ch)| ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::bots::bot_random::RandomBot;
    use crate::bots::bot_trait::ChessBot;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::game_state::GameState;
    use crate::host::host_api::{BotLog, HostView};
    use crate::move_generation::game_outcome::game_result;
    use crate::move_generation::legal_move_executor::execute_move;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn start_position_round_trips_exactly() {
        assert_eq!(generate_fen(&GameState::new_game()), STARTING_POSITION_FEN);
    }

    #[test]
    fn parse_then_generate_preserves_every_field() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pppp1ppp/8/8/3pP3/8/PPP2PPP/RNBQKBNR b Kq e3 0 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 12 40",
            "4k3/8/8/8/8/8/8/4K3 b - - 99 150",
        ] {
            let state = parse_fen(fen).expect("FEN should parse");
            assert_eq!(generate_fen(&state), fen);
            assert_eq!(parse_fen(&generate_fen(&state)).expect("reparse"), state);
        }
    }

    #[test]
    fn every_state_of_seeded_random_games_round_trips() {
        let mut checked = 0usize;
        for seed in 0..8u64 {
            let mut bot = RandomBot::with_seed(seed);
            let mut state = GameState::new_game();

            for _ in 0..300 {
                let fen = generate_fen(&state);
                let reparsed = parse_fen(&fen).unwrap_or_else(|err| panic!("{fen} failed to parse: {err}"));
                assert_eq!(reparsed, state, "round trip changed {fen}");
                assert_eq!(generate_fen(&reparsed), fen);
                checked += 1;

                if game_result(&state).is_terminal() {
                    break;
                }
                let view = HostView::new(&state, "Random Bot", BotLog::new());
                let uci = bot.select_move(&view);
                state = execute_move(&state, &uci).expect("random bot plays legal moves");
            }
        }
        assert!(checked > 100);
    }
}
