//! Terminal-oriented Unicode board renderer for the console driver and tests.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board to a Unicode string, white at the bottom.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::from("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        let rank_char = char::from(b'1' + rank);
        out.push(rank_char);

        for file in 0..8u8 {
            out.push(' ');
            out.push(
                game_state
                    .piece_at(rank * 8 + file)
                    .map_or('·', piece_to_unicode),
            );
        }

        out.push(' ');
        out.push(rank_char);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

fn piece_to_unicode(piece: Piece) -> char {
    let glyphs = match piece.color {
        Color::White => ['♙', '♘', '♗', '♖', '♕', '♔'],
        Color::Black => ['♟', '♞', '♝', '♜', '♛', '♚'],
    };
    glyphs[piece.kind.index()]
}

#[cfg(test)]
mod tests {
    use super::render_game_state;
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_renders_ranks_top_down() {
        let text = render_game_state(&GameState::new_game());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 · · · · · · · · 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }
}
