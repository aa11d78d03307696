//! Comment decoration builders.
//!
//! Separator lines and box comments padded to the configured width with a
//! user-chosen decorator character. PHP gets `#` line comments here even
//! though headers use its block delimiters; decorated `/* ... */` separators
//! read badly in PHP.

use masthead_core::Language;

/// A full-width separator comment line (with trailing newline).
pub fn separator_line(language: &Language, decorator: char, column: usize, width: usize) -> String {
    let (start, end) = delimiters_for(language);
    let mut line = pad_right(start, width.saturating_sub(end.len() + column), decorator);
    line.push_str(end);
    line.push('\n');
    line
}

/// The three lines of a box comment: decorated top, empty body, decorated
/// bottom. The body line is where the cursor lands.
pub fn box_comment(
    language: &Language,
    decorator: char,
    column: usize,
    width: usize,
) -> (String, String, String) {
    let (start, end) = delimiters_for(language);

    if !end.is_empty() {
        (
            pad_right(start, width.saturating_sub(column), decorator),
            " * ".to_string(),
            format!(" *{}", pad_left(end, width.saturating_sub(column + 2), decorator)),
        )
    } else {
        let top = pad_right(start, width.saturating_sub(column), decorator);
        (top.clone(), format!("{} ", start.trim()), top)
    }
}

fn delimiters_for(language: &Language) -> (&'static str, &'static str) {
    if language.name == "PHP" {
        ("#", "")
    } else {
        (language.comment.start, language.comment.end)
    }
}

fn pad_right(s: &str, len: usize, fill: char) -> String {
    let mut out = s.to_string();
    while out.chars().count() < len {
        out.push(fill);
    }
    out
}

fn pad_left(s: &str, len: usize, fill: char) -> String {
    let mut out = s.to_string();
    while out.chars().count() < len {
        out.insert(0, fill);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_block_language() {
        let c = Language::by_name("C").unwrap();
        let line = separator_line(c, '-', 0, 40);
        assert_eq!(line.len(), 41, "40 columns plus newline");
        assert!(line.starts_with("/*--"));
        assert!(line.ends_with("*/\n"));
    }

    #[test]
    fn test_separator_line_language() {
        let sh = Language::by_name("Shell").unwrap();
        let line = separator_line(sh, '=', 4, 40);
        assert!(line.starts_with("#=="));
        assert_eq!(line.len(), 37, "padded to width minus column, plus newline");
    }

    #[test]
    fn test_php_override_uses_hash() {
        let php = Language::by_name("PHP").unwrap();
        let line = separator_line(php, '*', 0, 30);
        assert!(line.starts_with("#**"));
        assert!(!line.contains("*/"));
    }

    #[test]
    fn test_box_comment_block() {
        let c = Language::by_name("C").unwrap();
        let (top, body, bottom) = box_comment(c, '*', 0, 30);
        assert_eq!(top.len(), 30);
        assert_eq!(body, " * ");
        assert!(bottom.ends_with("*/"));
        assert_eq!(bottom.len(), 30);
    }

    #[test]
    fn test_box_comment_line_language() {
        let py = Language::by_name("Python").unwrap();
        let (top, body, bottom) = box_comment(py, '#', 0, 30);
        assert_eq!(top, bottom);
        assert_eq!(body, "# ");
    }
}
