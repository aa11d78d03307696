//! Header rendering.
//!
//! Substitutes the three layout placeholders with delimiter lines padded to
//! the configured width, then (optionally) the value placeholders with the
//! current filename, author, email, organization, year and timestamp. For
//! interpreted languages a `#!/usr/bin/env` line is prepended, plus an
//! encoding declaration where the language takes one.

use anyhow::{anyhow, Result};
use chrono::Local;

use masthead_config::Config;
use masthead_core::Buffer;
use masthead_template::{placeholders, HeaderTemplate};

/// A freshly rendered header.
#[derive(Debug, Clone)]
pub struct RenderedHeader {
    /// The text to insert at the top of the buffer.
    pub text: String,
    /// Zero-based line the cursor should land on after insertion; varies
    /// with how many prelude lines were added.
    pub landing_line: usize,
}

/// Current timestamp in header format, am/pm lower-cased.
pub fn timestamp_now() -> String {
    Local::now()
        .format("%e-%b-%Y  %l:%M%p")
        .to_string()
        .replace("AM", "am")
        .replace("PM", "pm")
}

/// Timestamp variant written into the Modified field.
pub fn modified_timestamp_now() -> String {
    Local::now()
        .format("%e-%b-%Y %l:%M%p")
        .to_string()
        .replace("AM", "am")
        .replace("PM", "pm")
}

/// Render a header for `buffer` at the given indentation column.
///
/// With `substitute_values` false only the layout placeholders are filled,
/// leaving the value placeholders in place; the reconciler uses that form
/// when it needs the template's structure without today's values.
pub fn render(
    buffer: &Buffer,
    column: usize,
    config: &Config,
    template: &HeaderTemplate,
    substitute_values: bool,
) -> Result<RenderedHeader> {
    let language = buffer
        .language()
        .ok_or_else(|| anyhow!("Cannot render a header without a detected language"))?;

    let width = config.general.line_length;
    let comment = &language.comment;

    let (top_line, inner_line, last_line) = if comment.is_block() {
        (
            pad_right(comment.start, width.saturating_sub(column), '*'),
            " *".to_string(),
            format!(
                " {}",
                pad_left(comment.end, width.saturating_sub(column + 1), '*')
            ),
        )
    } else {
        let top = pad_right(comment.start, width.saturating_sub(column), '*');
        (top.clone(), comment.start.trim().to_string(), top)
    };

    let (mut text, landing_line) = match language.interpreter {
        Some(interpreter) => {
            let mut prelude = format!("#!/usr/bin/env {}\n", interpreter.resolve());
            if language.encoding_line {
                prelude.push_str("# -*- coding: utf-8 -*-\n");
                (prelude, 4)
            } else {
                (prelude, 3)
            }
        }
        None => (String::new(), 2),
    };
    text.push_str(template.text());

    text = text
        .replace(placeholders::TOP_LINE, &top_line)
        .replace(placeholders::INNER_LINE, &inner_line)
        .replace(placeholders::LAST_LINE, &last_line);

    if substitute_values {
        let now = Local::now();
        let filename = buffer
            .file_name()
            .unwrap_or_else(|| placeholders::UNTITLED.to_string());

        text = text
            .replace(placeholders::FILENAME, &filename)
            .replace(placeholders::YEAR, &now.format("%Y").to_string())
            .replace(placeholders::TIMESTAMP, &timestamp_now())
            .replace(placeholders::AUTHOR, &config.general.author)
            .replace(placeholders::EMAIL, &config.general.email)
            .replace(placeholders::ORGANIZATION, config.active_organization())
            .replace(placeholders::ORGANIZATION_XCODE, config.active_organization());
    }

    Ok(RenderedHeader { text, landing_line })
}

/// Pad `s` on the right with `fill` out to `len` display characters.
fn pad_right(s: &str, len: usize, fill: char) -> String {
    let mut out = s.to_string();
    while out.chars().count() < len {
        out.push(fill);
    }
    out
}

/// Pad `s` on the left with `fill` out to `len` display characters.
fn pad_left(s: &str, len: usize, fill: char) -> String {
    let mut out = s.to_string();
    while out.chars().count() < len {
        out.insert(0, fill);
    }
    out
}
