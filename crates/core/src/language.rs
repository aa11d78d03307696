//! Static language registry.
//!
//! Maps a language to the metadata the header and formatter machinery needs:
//! comment delimiters, the interpreter for the shebang line, and whether the
//! language takes an encoding declaration under the shebang.

use std::path::Path;

/// Comment delimiter pair for a language.
///
/// Languages that only have line comments carry an empty `end` token.
/// Where a language has both line and block comments, the block pair is
/// registered, matching how headers are written in that language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    /// Comment opening token.
    pub start: &'static str,
    /// Comment closing token, empty for line-comment languages.
    pub end: &'static str,
}

impl CommentStyle {
    /// Whether this is a block comment pair with a real closing token.
    pub fn is_block(&self) -> bool {
        !self.end.is_empty()
    }
}

/// How the interpreter for the shebang line is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    /// A fixed interpreter name, e.g. `python3`.
    Fixed(&'static str),
    /// The user's login shell from `$SHELL`, falling back to `bash`.
    LoginShell,
}

impl Interpreter {
    /// Resolve the interpreter name at render time.
    pub fn resolve(&self) -> String {
        match self {
            Interpreter::Fixed(name) => (*name).to_string(),
            Interpreter::LoginShell => std::env::var("SHELL")
                .ok()
                .filter(|s| !s.is_empty())
                .and_then(|s| {
                    Path::new(&s)
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                })
                .unwrap_or_else(|| "bash".to_string()),
        }
    }
}

/// Per-language metadata.
#[derive(Debug)]
pub struct Language {
    /// Display name, also the key used in formatter mappings.
    pub name: &'static str,
    /// File extensions (lowercase, without the dot).
    pub extensions: &'static [&'static str],
    /// Comment delimiters used for headers and comment decorations.
    pub comment: CommentStyle,
    /// Interpreter for the `#!/usr/bin/env` line, if the language has one.
    pub interpreter: Option<Interpreter>,
    /// Whether an encoding declaration line follows the shebang.
    pub encoding_line: bool,
}

/// All registered languages.
///
/// The comment delimiters for Python, Ruby and AppleScript come from the
/// override table rather than generic metadata: their generic delimiters are
/// absent or unreliable.
pub static LANGUAGES: &[Language] = &[
    Language {
        name: "C",
        extensions: &["c", "h"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "C++",
        extensions: &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "C#",
        extensions: &["cs"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "Objective-C",
        extensions: &["m"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "Objective-C++",
        extensions: &["mm"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "Java",
        extensions: &["java"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "Go",
        extensions: &["go"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "Rust",
        extensions: &["rs"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "Swift",
        extensions: &["swift"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "PHP",
        extensions: &["php"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "JavaScript",
        extensions: &["js", "mjs"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "TypeScript",
        extensions: &["ts", "tsx"],
        comment: CommentStyle { start: "/*", end: "*/" },
        interpreter: None,
        encoding_line: false,
    },
    Language {
        name: "Perl",
        extensions: &["pl", "pm"],
        comment: CommentStyle { start: "#", end: "" },
        interpreter: Some(Interpreter::Fixed("perl")),
        encoding_line: false,
    },
    Language {
        name: "Python",
        extensions: &["py"],
        comment: CommentStyle { start: "# ", end: "" },
        interpreter: Some(Interpreter::Fixed("python3")),
        encoding_line: true,
    },
    Language {
        name: "Ruby",
        extensions: &["rb"],
        comment: CommentStyle { start: "#", end: "" },
        interpreter: Some(Interpreter::Fixed("ruby")),
        encoding_line: true,
    },
    Language {
        name: "Awk",
        extensions: &["awk"],
        comment: CommentStyle { start: "#", end: "" },
        interpreter: Some(Interpreter::Fixed("awk")),
        encoding_line: false,
    },
    Language {
        name: "Shell",
        extensions: &["sh", "bash", "zsh"],
        comment: CommentStyle { start: "#", end: "" },
        interpreter: Some(Interpreter::LoginShell),
        encoding_line: false,
    },
    Language {
        name: "AppleScript",
        extensions: &["applescript", "scpt"],
        comment: CommentStyle { start: "(*", end: "*)" },
        interpreter: Some(Interpreter::Fixed("osascript")),
        encoding_line: false,
    },
];

impl Language {
    /// Look up a language by display name.
    pub fn by_name(name: &str) -> Option<&'static Language> {
        LANGUAGES.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Detect a language from a file path's extension.
    pub fn detect(path: &Path) -> Option<&'static Language> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        LANGUAGES.iter().find(|l| l.extensions.contains(&ext.as_str()))
    }
}
