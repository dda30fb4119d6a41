#![allow(clippy::module_inception)]

use std::{fs, path::Path, rc::Rc};

use crate::errors::errors::{ErrorTip, SyntaxError};

pub mod analyzer;
pub mod ast;
pub mod environment;
pub mod errors;
pub mod generator;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;

/// A byte offset into a named source file.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Locates the line containing `position` in `content`.
///
/// Returns the 1-based line number, the line's text and the offset of
/// `position` within that line. Positions past the end of the input clamp to
/// the last character, so an at-EOF error still points somewhere useful.
pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(content.len().saturating_sub(1));

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    (line_number, String::new(), 0)
}

/// Renders a syntax error with a caret pointing at the offending character.
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `END`, did you miss a semicolon?)
/// -> fizzbuzz.lang
///    |
/// 20 | LET a = 1
///    | --------^
/// ```
pub fn display_error(error: &SyntaxError, file: &Path) {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(_) => {
            println!("Error: {} ({})", error.get_error_name(), error);
            return;
        }
    };

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(&content, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file.as_os_str().to_string_lossy());
    println!("{:>padding$}", "|");

    let trimmed = line_text.trim_start_matches(' ');
    let removed_whitespace = line_text.len() - trimmed.len();
    println!("{} | {}", line_string, trimmed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let content = std::fs::read_to_string("tests/test_file.txt").unwrap();

        let (line_number, line, line_pos) = super::get_line_at_position(&content, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "LET x = 5;\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(&content, 28);
        assert_eq!(line_number, 3);
        assert_eq!(line, "    RETURN x;\n");
        assert_eq!(line_pos, 3);
    }
}
