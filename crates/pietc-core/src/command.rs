//! The Piet command set and the color-transition command table.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A stack-machine command executed on a block transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    None,
    Push,
    Pop,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Not,
    Greater,
    Pointer,
    Switch,
    Duplicate,
    Roll,
    InputNum,
    InputChar,
    OutputNum,
    OutputChar,
}

/// Compute the command executed when moving from a block of color `from`
/// into a block of color `to`.
///
/// White, black, and undefined codels carry no hue/lightness coordinates,
/// so any transition touching them executes no command, as does a
/// same-color transition (which cannot occur between distinct blocks).
/// Otherwise the command is determined by the hue difference (mod 6) and
/// lightness difference (mod 3).
pub fn command_between(from: Color, to: Color) -> Command {
    if from == to {
        return Command::None;
    }
    let (Some(from_hue), Some(from_light)) = (from.hue(), from.lightness()) else {
        return Command::None;
    };
    let (Some(to_hue), Some(to_light)) = (to.hue(), to.lightness()) else {
        return Command::None;
    };

    let hue_diff = (to_hue + 6 - from_hue) % 6;
    let light_diff = (to_light + 3 - from_light) % 3;

    match (light_diff, hue_diff) {
        (0, 0) => Command::None,
        (0, 1) => Command::Add,
        (0, 2) => Command::Divide,
        (0, 3) => Command::Greater,
        (0, 4) => Command::Duplicate,
        (0, 5) => Command::InputChar,
        (1, 0) => Command::Push,
        (1, 1) => Command::Subtract,
        (1, 2) => Command::Modulo,
        (1, 3) => Command::Pointer,
        (1, 4) => Command::Roll,
        (1, 5) => Command::OutputNum,
        (2, 0) => Command::Pop,
        (2, 1) => Command::Multiply,
        (2, 2) => Command::Not,
        (2, 3) => Command::Switch,
        (2, 4) => Command::InputNum,
        (2, 5) => Command::OutputChar,
        _ => Command::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_color_is_none() {
        assert_eq!(command_between(Color::Red, Color::Red), Command::None);
        assert_eq!(command_between(Color::White, Color::White), Command::None);
    }

    #[test]
    fn white_black_undefined_are_none() {
        assert_eq!(command_between(Color::White, Color::Red), Command::None);
        assert_eq!(command_between(Color::Red, Color::Black), Command::None);
        assert_eq!(command_between(Color::Undefined, Color::Red), Command::None);
        assert_eq!(command_between(Color::Red, Color::Undefined), Command::None);
    }

    #[test]
    fn lightness_column_from_red() {
        // Same hue, one and two lightness steps down.
        assert_eq!(command_between(Color::Red, Color::DarkRed), Command::Pop);
        assert_eq!(
            command_between(Color::LightRed, Color::Red),
            Command::Push
        );
        assert_eq!(
            command_between(Color::LightRed, Color::DarkRed),
            Command::Pop
        );
        // Lightness wraps modulo 3.
        assert_eq!(command_between(Color::DarkRed, Color::LightRed), Command::Push);
    }

    #[test]
    fn hue_row_from_red() {
        assert_eq!(command_between(Color::Red, Color::Yellow), Command::Add);
        assert_eq!(command_between(Color::Red, Color::Green), Command::Divide);
        assert_eq!(command_between(Color::Red, Color::Cyan), Command::Greater);
        assert_eq!(command_between(Color::Red, Color::Blue), Command::Duplicate);
        assert_eq!(
            command_between(Color::Red, Color::Magenta),
            Command::InputChar
        );
        // Hue wraps modulo 6.
        assert_eq!(command_between(Color::Magenta, Color::Red), Command::Add);
    }

    #[test]
    fn mixed_diagonals() {
        assert_eq!(
            command_between(Color::Red, Color::DarkYellow),
            Command::Subtract
        );
        assert_eq!(
            command_between(Color::Red, Color::LightYellow),
            Command::Multiply
        );
        assert_eq!(
            command_between(Color::Red, Color::DarkGreen),
            Command::Modulo
        );
        assert_eq!(command_between(Color::Red, Color::LightGreen), Command::Not);
        assert_eq!(
            command_between(Color::LightRed, Color::Cyan),
            Command::Pointer
        );
        assert_eq!(
            command_between(Color::LightRed, Color::DarkCyan),
            Command::Switch
        );
        assert_eq!(command_between(Color::LightRed, Color::Blue), Command::Roll);
        assert_eq!(
            command_between(Color::LightRed, Color::DarkBlue),
            Command::InputNum
        );
        assert_eq!(
            command_between(Color::LightRed, Color::Magenta),
            Command::OutputNum
        );
        assert_eq!(
            command_between(Color::LightRed, Color::DarkMagenta),
            Command::OutputChar
        );
    }
}
