use std::io::{self, Write};


/// An ANSI color code for color terminals.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

/// Pads text to a specific length, counted in characters. Positive padding values pad at the end,
/// negative at the beginning.
pub fn pad(text: &str, pad_to: isize) -> String {
    let len = text.chars().count() as isize;
    let width = pad_to.unsigned_abs();
    if pad_to > 0 && pad_to > len {
        format!("{:<width$}", text, width = width)
    } else if pad_to < 0 && -pad_to > len {
        format!("{:>width$}", text, width = width)
    } else {
        String::from(text)
    }
}

/// Returns the text styled in the given color, if colors are enabled.
pub fn paint(text: &str, color: Option<Color>) -> String {
    #[cfg(feature = "console")]
    {
        if let Some(clr) = color {
            if console::colors_enabled() {
                let styled = console::style(text);
                let colored = match clr {
                    Color::DarkGray => styled.bright().black(),
                    Color::Blue => styled.bright().blue(),
                    Color::Green => styled.bright().green(),
                    Color::Cyan => styled.bright().cyan(),
                    Color::Red => styled.bright().red(),
                    Color::Magenta => styled.bright().magenta(),
                    Color::Yellow => styled.bright().yellow(),
                    Color::White => styled.bright().white(),
                };
                return colored.to_string();
            }
        }
    }
    #[cfg(not(feature = "console"))]
    let _ = color;

    String::from(text)
}

/// Outputs text, optionally in a given color, padded to a specific length. Padding is applied
/// before coloring so that escape sequences do not count towards the width.
pub fn write_in_color<W: Write, S: AsRef<str>>(
    out: &mut W,
    text: S,
    color: Option<Color>,
    pad_to: isize,
) -> io::Result<()> {
    let padded = pad(text.as_ref(), pad_to);
    write!(out, "{}", paint(&padded, color))
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pad() {
        assert_eq!("ab   ", pad("ab", 5));
        assert_eq!("   ab", pad("ab", -5));
        assert_eq!("abcdef", pad("abcdef", 3));
        assert_eq!("abcdef", pad("abcdef", -3));
        assert_eq!("ab", pad("ab", 0));
        // characters, not bytes
        assert_eq!("a ➜ b ", pad("a ➜ b", 6));
    }

    #[test]
    fn test_write_plain() {
        let mut out = Vec::new();
        write_in_color(&mut out, "Network:", None, 11).unwrap();
        write_in_color(&mut out, "10.0.0.0/8", None, 0).unwrap();
        assert_eq!("Network:   10.0.0.0/8", String::from_utf8(out).unwrap());
    }
}
