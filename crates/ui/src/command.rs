//! Command-line parsing for the interactive loop

/// Parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Overwrite one byte
    Revise { index: usize, value: u8 },
    /// Insert one byte so it lands at `index`
    Insert { index: usize, value: u8 },
    /// Remove one byte
    Remove { index: usize },
    /// Undo `n` steps
    Undo(usize),
    /// Redo `n` steps
    Redo(usize),
    /// Move the cursor
    Goto(usize),
    /// Redraw the views
    Print,
    /// Write to the document's file
    Save,
    /// Write and quit
    SaveQuit,
    Quit,
    Help,
    /// Blank line
    Empty,
    /// Known verb with bad arguments
    Invalid(String),
    /// Unknown verb
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  revise|r <idx> <val>   overwrite the byte at idx
  insert|i <idx> <val>   insert a byte at idx (idx == length appends)
  remove|x <idx>         remove the byte at idx
  undo|u [n]             undo n edits (default 1)
  redo|y [n]             redo n edits (default 1)
  goto|g <idx>           move the cursor
  print|p                show buffer, detail and history
  save|w                 write the file
  wq                     write the file and quit
  quit|q                 quit without saving
  help|h                 this text
indices are decimal or 0x-prefixed hex, values are hex";

/// Decimal, or hex with a `0x` prefix.
fn parse_index(token: &str) -> Option<usize> {
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}

/// Hex, optional `0x` prefix, reduced to its low 8 bits.
fn parse_value(token: &str) -> Option<u8> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    u64::from_str_radix(digits, 16)
        .ok()
        .map(|value| (value & 0xFF) as u8)
}

fn parse_count(args: &[&str], verb: &str) -> Action {
    let count = match args {
        [] => Some(1),
        [n] => parse_index(n),
        _ => None,
    };

    match (verb, count) {
        ("undo", Some(n)) => Action::Undo(n),
        ("redo", Some(n)) => Action::Redo(n),
        _ => Action::Invalid(format!("usage: {verb} [n]")),
    }
}

/// Parse one input line. Never fails; bad input maps to
/// [`Action::Invalid`] or [`Action::Unknown`].
pub fn parse_command(line: &str) -> Action {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((verb, args)) = tokens.split_first() else {
        return Action::Empty;
    };

    match *verb {
        "revise" | "r" => match args {
            [idx, val] => match (parse_index(idx), parse_value(val)) {
                (Some(index), Some(value)) => Action::Revise { index, value },
                _ => Action::Invalid("usage: revise <idx> <val>".into()),
            },
            _ => Action::Invalid("usage: revise <idx> <val>".into()),
        },
        "insert" | "i" => match args {
            [idx, val] => match (parse_index(idx), parse_value(val)) {
                (Some(index), Some(value)) => Action::Insert { index, value },
                _ => Action::Invalid("usage: insert <idx> <val>".into()),
            },
            _ => Action::Invalid("usage: insert <idx> <val>".into()),
        },
        "remove" | "x" => match args {
            [idx] => parse_index(idx).map_or_else(
                || Action::Invalid("usage: remove <idx>".into()),
                |index| Action::Remove { index },
            ),
            _ => Action::Invalid("usage: remove <idx>".into()),
        },
        "goto" | "g" => match args {
            [idx] => parse_index(idx).map_or_else(
                || Action::Invalid("usage: goto <idx>".into()),
                Action::Goto,
            ),
            _ => Action::Invalid("usage: goto <idx>".into()),
        },
        "undo" | "u" => parse_count(args, "undo"),
        "redo" | "y" => parse_count(args, "redo"),
        "print" | "p" if args.is_empty() => Action::Print,
        "save" | "w" if args.is_empty() => Action::Save,
        "wq" if args.is_empty() => Action::SaveQuit,
        "quit" | "q" if args.is_empty() => Action::Quit,
        "help" | "h" | "?" => Action::Help,
        "print" | "p" | "save" | "w" | "wq" | "quit" | "q" => {
            Action::Invalid(format!("{verb} takes no arguments"))
        }
        _ => Action::Unknown(line.trim().into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edits() {
        assert_eq!(
            parse_command("revise 1 aa"),
            Action::Revise {
                index: 1,
                value: 0xAA
            }
        );
        assert_eq!(
            parse_command("i 0x10 0xFF"),
            Action::Insert {
                index: 16,
                value: 0xFF
            }
        );
        assert_eq!(parse_command("  x   3 "), Action::Remove { index: 3 });
    }

    #[test]
    fn test_value_keeps_low_byte() {
        assert_eq!(
            parse_command("r 0 1ff"),
            Action::Revise {
                index: 0,
                value: 0xFF
            }
        );
        assert_eq!(
            parse_command("r 0 100"),
            Action::Revise {
                index: 0,
                value: 0x00
            }
        );
    }

    #[test]
    fn test_parse_counts() {
        assert_eq!(parse_command("u"), Action::Undo(1));
        assert_eq!(parse_command("undo 3"), Action::Undo(3));
        assert_eq!(parse_command("y 0x2"), Action::Redo(2));
        assert!(matches!(parse_command("redo many"), Action::Invalid(_)));
        assert!(matches!(parse_command("undo 1 2"), Action::Invalid(_)));
    }

    #[test]
    fn test_parse_plain_verbs() {
        assert_eq!(parse_command("w"), Action::Save);
        assert_eq!(parse_command("wq"), Action::SaveQuit);
        assert_eq!(parse_command("q"), Action::Quit);
        assert_eq!(parse_command("p"), Action::Print);
        assert_eq!(parse_command("g 7"), Action::Goto(7));
        assert_eq!(parse_command("help"), Action::Help);
        assert_eq!(parse_command("   "), Action::Empty);
    }

    #[test]
    fn test_parse_invalid_and_unknown() {
        assert!(matches!(parse_command("r 1"), Action::Invalid(_)));
        assert!(matches!(parse_command("r one aa"), Action::Invalid(_)));
        assert!(matches!(parse_command("i 1 zz"), Action::Invalid(_)));
        assert!(matches!(parse_command("x -1"), Action::Invalid(_)));
        assert!(matches!(parse_command("w out.bin"), Action::Invalid(_)));

        match parse_command("frobnicate 1") {
            Action::Unknown(s) => assert_eq!(s, "frobnicate 1"),
            other => panic!("Expected Unknown, got {other:?}"),
        }
    }
}
