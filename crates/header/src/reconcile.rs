//! Header reconciliation.
//!
//! Brings an existing header up to date immediately before a buffer is
//! saved. The whole pass is gated on detecting a copyright line that sits in
//! comment scope and names either a registered organization or the
//! unsubstituted organization placeholder; anything else is left untouched,
//! so a header is never injected where none was written.
//!
//! The individual passes scan the buffer independently, mirroring the four
//! labeled fields of the default template: copyright, filename, date stamps
//! and authorship.

use std::sync::LazyLock;

use anyhow::Result;
use chrono::{Datelike, Local};
use regex::Regex;

use masthead_config::Config;
use masthead_core::Buffer;
use masthead_template::{placeholders, HeaderTemplate};

use crate::render::{modified_timestamp_now, render};
use crate::scope::CommentScope;

static COPYRIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Copyright \u{a9} .* By .* All rights reserved\.").expect("copyright pattern")
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("20[0-9]*").expect("year pattern"));

static CREATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("Created.*:.*").expect("created pattern"));

static MODIFIED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("Modified.*:.*").expect("modified pattern"));

static AUTHOR_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(.*)(Programmer|Author)(.*:)(.*)").expect("author pattern"));

static AUTHOR_PARSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(.*(Programmer|Author)(.*:\s*))([A-Za-z0-9]*\s*[A-Za-z0-9]*)\s*(<[A-Za-z0-9.]*@[A-Za-z0-9.]*>)",
    )
    .expect("author parse pattern")
});

/// Outcome of a reconciliation run.
#[derive(Debug, Default)]
pub struct Reconciliation {
    /// Whether a header was detected and the passes ran.
    pub applied: bool,
    /// Conditions worth surfacing without failing the run.
    pub warnings: Vec<String>,
}

/// Reconcile the header of `buffer` against current settings.
///
/// Returns `applied: false` without mutating anything when the buffer does
/// not carry a recognizable header.
pub fn reconcile(
    buffer: &mut Buffer,
    config: &Config,
    template: &HeaderTemplate,
) -> Result<Reconciliation> {
    let Some(language) = buffer.language() else {
        return Ok(Reconciliation::default());
    };
    let comment = &language.comment;

    // Detection guard: a comment-scoped copyright line naming one of ours.
    let scope = CommentScope::new(buffer.text(), comment);
    let Some(copyright) = buffer.find(&COPYRIGHT_RE, 0) else {
        return Ok(Reconciliation::default());
    };
    if !scope.contains(copyright.start) {
        return Ok(Reconciliation::default());
    }

    let copyright_text = &buffer.text()[copyright.clone()];
    let organization = match config
        .general
        .organizations
        .iter()
        .find(|org| copyright_text.contains(org.as_str()))
    {
        Some(org) => org.clone(),
        None if copyright_text.contains(placeholders::ORGANIZATION_XCODE) => {
            config.active_organization().to_string()
        }
        None => return Ok(Reconciliation::default()),
    };

    let mut outcome = Reconciliation {
        applied: true,
        warnings: Vec::new(),
    };

    update_copyright(buffer, copyright, &organization, &mut outcome);

    let rendered = render(buffer, buffer.indent_column(0), config, template, true)?;

    update_filename(buffer, comment, &rendered.text);
    update_date_stamps(buffer, comment, &mut outcome);
    update_authorship(buffer, comment, config, &rendered.text, &mut outcome);

    Ok(outcome)
}

/// Rewrite the copyright line: a `start-end` year range once the stored year
/// falls behind the current one, a single year otherwise.
fn update_copyright(
    buffer: &mut Buffer,
    copyright: std::ops::Range<usize>,
    organization: &str,
    outcome: &mut Reconciliation,
) {
    let current_year = Local::now().year();

    let Some(year_range) = buffer.find(&YEAR_RE, copyright.start) else {
        return;
    };
    let stored = &buffer.text()[year_range];
    let Ok(stored_year) = stored.parse::<i32>() else {
        outcome
            .warnings
            .push(format!("Unparseable copyright year '{stored}' left unchanged"));
        return;
    };

    let line = if stored_year < current_year {
        format!(
            "Copyright \u{a9} {stored_year}-{current_year} By {organization} All rights reserved."
        )
    } else {
        format!("Copyright \u{a9} {stored_year} By {organization} All rights reserved.")
    };

    buffer.replace(copyright, &line);
}

/// Set or update the filename field when the buffer has a path.
fn update_filename(buffer: &mut Buffer, comment: &masthead_core::CommentStyle, rendered: &str) {
    let Some(name) = buffer.file_name() else {
        return;
    };
    let scope = CommentScope::new(buffer.text(), comment);

    // A header rendered for a pathless buffer carries the untitled marker;
    // saving under a real name fills it in.
    if let Some(marker) = buffer.find_literal(placeholders::UNTITLED, 0) {
        if scope.contains(marker.start) {
            buffer.replace(marker, &name);
            return;
        }
    }

    // Otherwise anchor on the rendered text immediately preceding the
    // filename and rewrite the rest of that line (the rename case). The
    // character between anchor and filename can be anything the user put in
    // their template, so offsets step by chars, not bytes.
    let Some(pos) = rendered.find(&name) else {
        return;
    };
    let Some(sep) = rendered[..pos].chars().next_back() else {
        return;
    };
    let anchor = &rendered[..pos - sep.len_utf8()];
    if anchor.is_empty() {
        return;
    }
    let Some(found) = buffer.find_literal(anchor, 0) else {
        return;
    };
    if !scope.contains(found.start) {
        return;
    }
    let line = buffer.line_range_at(found.end);
    let Some(skip) = buffer.text()[found.end..line.end].chars().next() else {
        return;
    };
    buffer.replace(found.end + skip.len_utf8()..line.end, &name);
}

/// Update the Modified stamp. The Created field is recognized but left
/// alone; a legacy slash-separated Created date has no settled canonical
/// form, so it is flagged rather than rewritten.
fn update_date_stamps(
    buffer: &mut Buffer,
    comment: &masthead_core::CommentStyle,
    outcome: &mut Reconciliation,
) {
    let scope = CommentScope::new(buffer.text(), comment);

    if let Some(created) = buffer.find(&CREATED_RE, 0) {
        if scope.contains(created.start) {
            let value = buffer.text()[created.clone()]
                .split_once(':')
                .map(|(_, v)| v.to_string())
                .unwrap_or_default();
            if value.contains('/') {
                outcome
                    .warnings
                    .push("Legacy Created date format left unchanged".to_string());
            }
        }
    }

    if let Some(modified) = buffer.find(&MODIFIED_RE, 0) {
        if scope.contains(modified.start) {
            let stamp = format!("Modified :  {}", modified_timestamp_now());
            buffer.replace(modified, &stamp);
        }
    }
}

/// Reconcile the authorship line.
///
/// Same author with a stale email replaces the line; a different author gets
/// the fresh line inserted above, keeping the older attribution with its
/// label blanked out. A guard line already present means a previous run
/// inserted it, and nothing happens.
fn update_authorship(
    buffer: &mut Buffer,
    comment: &masthead_core::CommentStyle,
    config: &Config,
    rendered: &str,
    outcome: &mut Reconciliation,
) {
    let scope = CommentScope::new(buffer.text(), comment);
    let Some(found) = buffer.find(&AUTHOR_LINE_RE, 0) else {
        return;
    };
    if !scope.contains(found.start) {
        return;
    }

    let line_range = buffer.line_range_at(found.start);
    let original_line = buffer.text()[line_range.clone()].to_string();

    let Some(fresh) = AUTHOR_LINE_RE.find(rendered) else {
        // The template carries no authorship line at all; drop the stale one.
        buffer.replace(line_range, "");
        return;
    };
    let fresh_line = fresh.as_str().to_string();

    let Some(caps) = AUTHOR_PARSE_RE.captures(&original_line) else {
        outcome
            .warnings
            .push(format!("Malformed authorship line skipped: '{}'", original_line.trim()));
        return;
    };
    let name = caps.get(4).map_or("", |m| m.as_str());
    let email = caps
        .get(5)
        .map_or("", |m| m.as_str())
        .trim_start_matches('<')
        .trim_end_matches('>');

    if name == config.general.author {
        if email != config.general.email {
            buffer.replace(line_range, &fresh_line);
        }
        return;
    }

    // Different author: blank the label so the prior attribution is kept
    // without being picked up again, and put the fresh line above it.
    let guard_line = if original_line.contains("Author") {
        original_line.replace("Author", "      ")
    } else {
        original_line.replace("Programmer", "          ")
    };

    if buffer.find_literal(&guard_line, 0).is_none() {
        let replacement = format!("{fresh_line}\n{guard_line}");
        buffer.replace(line_range, &replacement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.general.line_length = 60;
        config.general.author = "Jane Doe".into();
        config.general.email = "jane@x.com".into();
        config.general.organizations = vec!["Acme Corp".into()];
        config
    }

    fn template() -> HeaderTemplate {
        HeaderTemplate::default_template()
    }

    /// A buffer that already carries a freshly rendered header.
    fn headered_buffer(path: &str) -> Buffer {
        let config = test_config();
        let mut buf = Buffer::new("");
        buf.set_path(PathBuf::from(path));
        let rendered = render(&buf, 0, &config, &template(), true).unwrap();
        let mut out = Buffer::new(format!("{}\nint main() {{}}\n", rendered.text));
        out.set_path(PathBuf::from(path));
        out
    }

    #[test]
    fn test_no_header_is_untouched() {
        let mut buf = Buffer::new("int main() {}\n");
        buf.set_path(PathBuf::from("plain.c"));
        let before = buf.text().to_string();

        let outcome = reconcile(&mut buf, &test_config(), &template()).unwrap();
        assert!(!outcome.applied);
        assert_eq!(buf.text(), before);
    }

    #[test]
    fn test_copyright_outside_comment_is_untouched() {
        let text = "char *s = \"Copyright \u{a9} 2020 By Acme Corp All rights reserved.\";\n";
        let mut buf = Buffer::new(text);
        buf.set_path(PathBuf::from("strings.c"));

        let outcome = reconcile(&mut buf, &test_config(), &template()).unwrap();
        assert!(!outcome.applied);
        assert_eq!(buf.text(), text);
    }

    #[test]
    fn test_unknown_organization_is_untouched() {
        let mut buf = Buffer::new(
            "/*\n * Copyright \u{a9} 2020 By Somebody Else All rights reserved.\n */\n",
        );
        buf.set_path(PathBuf::from("other.c"));
        let before = buf.text().to_string();

        let outcome = reconcile(&mut buf, &test_config(), &template()).unwrap();
        assert!(!outcome.applied);
        assert_eq!(buf.text(), before);
    }

    #[test]
    fn test_stale_year_becomes_range() {
        let mut buf = Buffer::new(
            "/*\n * Copyright \u{a9} 2020 By Acme Corp All rights reserved.\n */\n",
        );
        buf.set_path(PathBuf::from("old.c"));

        let outcome = reconcile(&mut buf, &test_config(), &template()).unwrap();
        assert!(outcome.applied);

        let current = Local::now().year();
        let expected = format!("2020-{current}");
        assert!(buf.text().contains(&expected), "got: {}", buf.text());
    }

    #[test]
    fn test_current_year_stays_single() {
        let current = Local::now().year();
        let mut buf = Buffer::new(format!(
            "/*\n * Copyright \u{a9} {current} By Acme Corp All rights reserved.\n */\n"
        ));
        buf.set_path(PathBuf::from("new.c"));

        reconcile(&mut buf, &test_config(), &template()).unwrap();
        assert!(buf
            .text()
            .contains(&format!("Copyright \u{a9} {current} By Acme Corp")));
        assert!(!buf.text().contains('-'));
    }

    #[test]
    fn test_reconcile_never_duplicates_copyright_line() {
        let mut buf = headered_buffer("keep.c");
        reconcile(&mut buf, &test_config(), &template()).unwrap();
        reconcile(&mut buf, &test_config(), &template()).unwrap();

        assert_eq!(buf.text().matches("Copyright \u{a9}").count(), 1);
    }

    #[test]
    fn test_placeholder_organization_is_adopted() {
        let mut buf = Buffer::new(
            "/*\n * Copyright \u{a9} 2020 By ___ORGANIZATIONNAME___ All rights reserved.\n */\n",
        );
        buf.set_path(PathBuf::from("fresh.c"));

        let outcome = reconcile(&mut buf, &test_config(), &template()).unwrap();
        assert!(outcome.applied);
        assert!(buf.text().contains("By Acme Corp"));
    }

    #[test]
    fn test_untitled_marker_replaced_on_save() {
        let buf = headered_buffer("named.c");
        let text = buf.text().replace("named.c", "<Untitled-File>");
        let mut buf2 = Buffer::new(text);
        buf2.set_path(PathBuf::from("named.c"));

        reconcile(&mut buf2, &test_config(), &template()).unwrap();
        assert!(buf2.text().contains("named.c"));
        assert!(!buf2.text().contains("<Untitled-File>"));
    }

    #[test]
    fn test_filename_anchor_with_multibyte_separator() {
        // A user template with a multibyte character right before the
        // filename placeholder must not break the rename rewrite.
        let config = test_config();
        let template = HeaderTemplate::from_text(
            "top_line\n\
             inner_line \u{a9}FILENAME_PLACEHOLDER\n\
             inner_line Copyright \u{a9} YEAR_PLACEHOLDER By ORGANIZATION_PLACEHOLDER All rights reserved.\n\
             last_line ",
        );

        let mut buf = Buffer::new("");
        buf.set_path(PathBuf::from("old.c"));
        let rendered = render(&buf, 0, &config, &template, true).unwrap();
        let mut renamed = Buffer::new(format!("{}\n", rendered.text));
        renamed.set_path(PathBuf::from("renamed.c"));

        reconcile(&mut renamed, &config, &template).unwrap();
        assert!(renamed.text().contains("\u{a9}renamed.c"));
        assert!(!renamed.text().contains("old.c"));
    }

    #[test]
    fn test_modified_stamp_rewritten() {
        let mut buf = headered_buffer("stamp.c");
        reconcile(&mut buf, &test_config(), &template()).unwrap();

        let modified_line = buf
            .text()
            .lines()
            .find(|l| l.contains("Modified"))
            .unwrap()
            .to_string();
        assert!(modified_line.contains("Modified :  "));
        // The value holds this year's stamp now.
        assert!(modified_line.contains(&Local::now().format("%Y").to_string()));
    }

    #[test]
    fn test_legacy_created_date_flagged_not_rewritten() {
        let mut buf = Buffer::new(
            "/*\n * Created  :  08/29/2020\n * Copyright \u{a9} 2020 By Acme Corp All rights reserved.\n */\n",
        );
        buf.set_path(PathBuf::from("legacy.c"));

        let outcome = reconcile(&mut buf, &test_config(), &template()).unwrap();
        assert!(outcome.applied);
        assert!(buf.text().contains("08/29/2020"));
        assert!(outcome.warnings.iter().any(|w| w.contains("Created")));
    }

    #[test]
    fn test_same_author_new_email_replaces_line() {
        let buf = headered_buffer("mail.c");
        let text = buf.text().replace("<jane@x.com>", "<jane@old.org>");
        let mut buf2 = Buffer::new(text);
        buf2.set_path(PathBuf::from("mail.c"));

        reconcile(&mut buf2, &test_config(), &template()).unwrap();
        assert!(buf2.text().contains("<jane@x.com>"));
        assert!(!buf2.text().contains("jane@old.org"));
    }

    #[test]
    fn test_different_author_inserted_above_with_history() {
        let buf = headered_buffer("hist.c");
        let text = buf
            .text()
            .replace("Author   :  Jane Doe <jane@x.com>", "Author   :  Bob Smith <bob@x.com>");
        let mut buf2 = Buffer::new(text);
        buf2.set_path(PathBuf::from("hist.c"));

        reconcile(&mut buf2, &test_config(), &template()).unwrap();

        let text = buf2.text();
        let fresh = text.find("Jane Doe").unwrap();
        let old = text.find("Bob Smith").unwrap();
        assert!(fresh < old, "fresh attribution goes above the old one");
        // The old line keeps its text but loses its label.
        assert!(text.contains("Bob Smith <bob@x.com>"));
        assert!(!text.contains("Author   :  Bob Smith"));
    }

    #[test]
    fn test_authorship_reconciliation_is_idempotent() {
        let buf = headered_buffer("idem.c");
        let text = buf
            .text()
            .replace("Author   :  Jane Doe <jane@x.com>", "Author   :  Bob Smith <bob@x.com>");
        let mut buf2 = Buffer::new(text);
        buf2.set_path(PathBuf::from("idem.c"));

        reconcile(&mut buf2, &test_config(), &template()).unwrap();
        let after_first = buf2.text().replace(
            &buf2
                .text()
                .lines()
                .find(|l| l.contains("Modified"))
                .unwrap()
                .to_string(),
            "",
        );

        reconcile(&mut buf2, &test_config(), &template()).unwrap();
        let after_second = buf2.text().replace(
            &buf2
                .text()
                .lines()
                .find(|l| l.contains("Modified"))
                .unwrap()
                .to_string(),
            "",
        );

        assert_eq!(after_first, after_second);
        assert_eq!(buf2.text().matches("Jane Doe").count(), 1);
    }

    #[test]
    fn test_malformed_author_line_skipped_with_warning() {
        let mut buf = Buffer::new(
            "/*\n * Author   :  ???\n * Copyright \u{a9} 2024 By Acme Corp All rights reserved.\n */\n",
        );
        buf.set_path(PathBuf::from("odd.c"));

        let outcome = reconcile(&mut buf, &test_config(), &template()).unwrap();
        assert!(outcome.applied);
        assert!(buf.text().contains("Author   :  ???"));
        assert!(outcome.warnings.iter().any(|w| w.contains("authorship")));
    }
}
