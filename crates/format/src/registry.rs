//! Static formatter registry.
//!
//! One tool slot per supported formatter, plus the language coverage each
//! one provides. Uncrustify serves the whole C family and takes a `-l`
//! language code; perltidy is a Perl script and runs through `perl`.

use masthead_config::Config;
use masthead_core::Language;

/// How a tool's argument vector is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// `exec [args..]`
    Plain,
    /// `exec -l <code> [args..]` with a per-language code.
    UncrustifyFamily,
    /// `perl exec [args..]`
    PerlScript,
}

/// One formatter tool slot.
#[derive(Debug)]
pub struct ToolSpec {
    /// Key in the settings `[formatters]` table.
    pub tool: &'static str,
    /// Binary name searched on `$PATH` when no path is configured.
    pub default_binary: &'static str,
    /// Languages this tool formats.
    pub languages: &'static [&'static str],
    /// Argument vector shape.
    pub invocation: Invocation,
}

/// All formatter slots.
pub static TOOLS: &[ToolSpec] = &[
    ToolSpec {
        tool: "uncrustify",
        default_binary: "uncrustify",
        languages: &["C", "C++", "C#", "Java", "Objective-C", "Objective-C++"],
        invocation: Invocation::UncrustifyFamily,
    },
    ToolSpec {
        tool: "perltidy",
        default_binary: "perltidy",
        languages: &["Perl"],
        invocation: Invocation::PerlScript,
    },
    ToolSpec {
        tool: "swiftformat",
        default_binary: "swiftformat",
        languages: &["Swift"],
        invocation: Invocation::Plain,
    },
    ToolSpec {
        tool: "gofmt",
        default_binary: "gofmt",
        languages: &["Go"],
        invocation: Invocation::Plain,
    },
    ToolSpec {
        tool: "black",
        default_binary: "black",
        languages: &["Python"],
        invocation: Invocation::Plain,
    },
    ToolSpec {
        tool: "rbprettier",
        default_binary: "rbprettier",
        languages: &["Ruby"],
        invocation: Invocation::Plain,
    },
    ToolSpec {
        tool: "rustfmt",
        default_binary: "rustfmt",
        languages: &["Rust"],
        invocation: Invocation::Plain,
    },
];

/// Uncrustify `-l` codes for the C family.
fn uncrustify_code(language: &str) -> Option<&'static str> {
    match language {
        "C" => Some("C"),
        "C++" => Some("CPP"),
        "C#" => Some("CS"),
        "Java" => Some("JAVA"),
        "Objective-C" => Some("OC"),
        "Objective-C++" => Some("OC++"),
        _ => None,
    }
}

/// Find the tool slot covering a language.
pub fn tool_for(language: &Language) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|t| t.languages.contains(&language.name))
}

/// Whether any formatter slot covers the language at all.
///
/// This is the whitelist gate checked before the command is even offered.
pub fn is_supported(language: &Language) -> bool {
    tool_for(language).is_some()
}

/// Build the argument vector for formatting `language`, if a formatter is
/// configured and resolved. An empty configured exec means unavailable.
pub fn command_for(language: &Language, config: &Config) -> Option<Vec<String>> {
    let spec = tool_for(language)?;
    let settings = config.formatters.get(spec.tool)?;
    if settings.exec.is_empty() {
        return None;
    }

    let mut command = match spec.invocation {
        Invocation::Plain => vec![settings.exec.clone()],
        Invocation::PerlScript => vec!["perl".to_string(), settings.exec.clone()],
        Invocation::UncrustifyFamily => vec![
            settings.exec.clone(),
            "-l".to_string(),
            uncrustify_code(language.name)?.to_string(),
        ],
    };
    command.extend(settings.args.split_whitespace().map(String::from));
    Some(command)
}
