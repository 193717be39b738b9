use cube_core::{Color, CubeState, Move, state::write_net};
use itertools::Itertools;
use owo_colors::OwoColorize;
use serde_json::json;

/// How states are written to stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Output {
    /// Unfolded net with colored cells.
    Color,
    /// Unfolded net with one letter per facelet.
    Plain,
    /// The wire format.
    Json,
}

fn colored_cell(color: Color) -> String {
    let cell = "  ";
    match color {
        Color::White => cell.on_white().to_string(),
        Color::Yellow => cell.on_yellow().to_string(),
        Color::Red => cell.on_red().to_string(),
        Color::Orange => cell.on_truecolor(255, 140, 0).to_string(),
        Color::Blue => cell.on_blue().to_string(),
        Color::Green => cell.on_green().to_string(),
    }
}

pub fn state(state: &CubeState, output: Output) -> color_eyre::Result<String> {
    Ok(match output {
        Output::Color => {
            let mut out = String::new();
            write_net(state, &mut out, colored_cell)?;
            out
        }
        Output::Plain => state.to_string(),
        Output::Json => serde_json::to_string(state)?,
    })
}

pub fn scramble(moves: &[Move], end: &CubeState, output: Output) -> color_eyre::Result<String> {
    Ok(match output {
        Output::Json => serde_json::to_string(&json!({ "moves": moves, "state": end }))?,
        Output::Color | Output::Plain => {
            format!("{}\n{}", moves.iter().join(" "), state(end, output)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use cube_core::{Face, apply_move};

    use super::*;

    #[test_log::test]
    fn json_is_the_wire_format() {
        let text = state(&CubeState::default(), Output::Json).unwrap();
        let back = serde_json::from_str::<Vec<Vec<String>>>(&text).unwrap();
        assert_eq!(back.len(), 6);
        assert_eq!(back[4], vec!["red"; 9]);
    }

    #[test_log::test]
    fn colored_net_has_nine_rows() {
        let text = state(&CubeState::default(), Output::Color).unwrap();
        assert_eq!(text.lines().count(), 9);
    }

    #[test_log::test]
    fn scramble_lists_moves_first() {
        let moves = [Move::clockwise(Face::Up), Move::counter_clockwise(Face::Back)];
        let end = moves
            .iter()
            .fold(CubeState::default(), |s, &m| apply_move(&s, m));
        let text = scramble(&moves, &end, Output::Plain).unwrap();
        assert_eq!(text.lines().next(), Some("U B'"));

        let value: serde_json::Value =
            serde_json::from_str(&scramble(&moves, &end, Output::Json).unwrap()).unwrap();
        assert_eq!(value["moves"], json!(["U", "B'"]));
    }
}
