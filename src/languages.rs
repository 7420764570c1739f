// ── Mode resolution ───────────────────────────────────────────────────────────
//
// Maps a filename to a syntax-mode bundle for the editor engine.  The table is
// an ordered list of `ModeEntry` values searched first-match; anything that
// does not match falls back to `default_mode()`.  Pure, no I/O.

use std::path::Path;

use crate::editor::{ExtensionConfig, Linter};

// ── Language enum ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    PlainText,
    C,
    Cpp,
    Python,
    Rust,
    JavaScript,
    TypeScript,
    Html,
    Xml,
    Css,
    Json,
    Sql,
    Toml,
    Yaml,
    Markdown,
    Shell,
}

impl Language {
    /// Human-readable name for the host's status display.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::PlainText => "Plain Text",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Html => "HTML",
            Language::Xml => "XML",
            Language::Css => "CSS",
            Language::Json => "JSON",
            Language::Sql => "SQL",
            Language::Toml => "TOML",
            Language::Yaml => "YAML",
            Language::Markdown => "Markdown",
            Language::Shell => "Shell",
        }
    }

    /// The configuration bundle for this mode: syntax, keyword sets, linter.
    pub fn mode_bundle(self) -> Vec<ExtensionConfig> {
        let mut exts = vec![ExtensionConfig::Syntax(self)];
        exts.extend(
            keywords(self)
                .iter()
                .map(|&(index, words)| ExtensionConfig::Keywords { index, words }),
        );
        match self {
            Language::Json => exts.push(ExtensionConfig::Linter(Linter::Json)),
            Language::Yaml => exts.push(ExtensionConfig::Linter(Linter::Yaml)),
            _ => {}
        }
        exts
    }
}

// ── Mode table ────────────────────────────────────────────────────────────────

/// One row of the mode table.
///
/// Extension sets are expected to be disjoint across rows; when they are not,
/// the earlier row wins.
#[derive(Debug)]
pub struct ModeEntry {
    /// Builds the entry's bundle through `Language::mode_bundle`.
    pub language: Language,
    pub extensions: &'static [&'static str],
}

impl ModeEntry {
    fn matches(&self, ext: &str) -> bool {
        self.extensions.iter().any(|&e| e == ext)
    }
}

pub static MODES: &[ModeEntry] = &[
    ModeEntry {
        language: Language::C,
        extensions: &["c", "h"],
    },
    ModeEntry {
        language: Language::Cpp,
        extensions: &["cpp", "cc", "cxx", "hpp", "hh", "hxx", "inl"],
    },
    ModeEntry {
        language: Language::Python,
        extensions: &["py", "pyw", "pyi"],
    },
    ModeEntry {
        language: Language::Rust,
        extensions: &["rs"],
    },
    ModeEntry {
        language: Language::JavaScript,
        extensions: &["js", "mjs", "cjs", "jsx"],
    },
    ModeEntry {
        language: Language::TypeScript,
        extensions: &["ts", "mts", "cts", "tsx"],
    },
    ModeEntry {
        language: Language::Html,
        extensions: &["html", "htm", "xhtml", "vue", "svelte"],
    },
    ModeEntry {
        language: Language::Xml,
        extensions: &["xml", "xsl", "xslt", "svg"],
    },
    ModeEntry {
        language: Language::Css,
        extensions: &["css", "scss", "less"],
    },
    ModeEntry {
        language: Language::Json,
        extensions: &["json", "jsonc"],
    },
    ModeEntry {
        language: Language::Sql,
        extensions: &["sql"],
    },
    ModeEntry {
        language: Language::Toml,
        extensions: &["toml"],
    },
    ModeEntry {
        language: Language::Yaml,
        extensions: &["yaml", "yml"],
    },
    ModeEntry {
        language: Language::Markdown,
        extensions: &["md", "markdown", "mdown", "mkd"],
    },
    ModeEntry {
        language: Language::Shell,
        extensions: &["sh", "bash", "zsh", "ksh"],
    },
];

// ── Resolution ────────────────────────────────────────────────────────────────

/// The lower-cased last dot-separated segment of the file name, if any.
///
/// Directory components are ignored, so `v1.2/README` has no extension.
/// A trailing dot (`notes.`) yields `None`.
pub fn extension_of(filename: &str) -> Option<String> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Detect the language for `filename`.  Returns `Language::PlainText` when no
/// entry matches.
pub fn language_for(filename: &str) -> Language {
    extension_of(filename)
        .and_then(|ext| MODES.iter().find(|entry| entry.matches(&ext)))
        .map_or(Language::PlainText, |entry| entry.language)
}

/// The bundle used when no table entry matches.
pub fn default_mode() -> Vec<ExtensionConfig> {
    Language::PlainText.mode_bundle()
}

/// Resolve `filename` to its configuration bundle.
pub fn resolve(filename: &str) -> Vec<ExtensionConfig> {
    match language_for(filename) {
        Language::PlainText => default_mode(),
        lang => lang.mode_bundle(),
    }
}

// ── Keyword lists ─────────────────────────────────────────────────────────────

/// `(keyword-set-index, space-separated word list)` pairs for `lang`.
/// Languages without keyword sets return an empty slice.
pub fn keywords(lang: Language) -> &'static [(usize, &'static str)] {
    match lang {
        Language::C => C_KEYWORDS,
        Language::Cpp => CPP_KEYWORDS,
        Language::JavaScript => JS_KEYWORDS,
        Language::TypeScript => TS_KEYWORDS,
        Language::Python => PY_KEYWORDS,
        Language::Rust => RUST_KEYWORDS,
        Language::Sql => SQL_KEYWORDS,
        _ => &[],
    }
}

static C_KEYWORDS: &[(usize, &str)] = &[(
    0,
    "auto break case char const continue default do double else enum extern \
float for goto if inline int long register restrict return short signed sizeof \
static struct switch typedef union unsigned void volatile while",
)];

static CPP_KEYWORDS: &[(usize, &str)] = &[
    (
        0,
        "alignas alignof auto bool break case catch char class const constexpr \
continue decltype default delete do double else enum explicit extern false float \
for friend if inline int long mutable namespace new noexcept nullptr operator \
private protected public return short signed sizeof static struct switch \
template this throw true try typedef typename union unsigned using virtual void \
volatile while",
    ),
    (
        1,
        "int8_t int16_t int32_t int64_t uint8_t uint16_t uint32_t uint64_t size_t \
ptrdiff_t",
    ),
];

static JS_KEYWORDS: &[(usize, &str)] = &[(
    0,
    "async await break case catch class const continue default delete do else \
export extends false finally for function if import in instanceof let new null \
of return static super switch this throw true try typeof undefined var void \
while yield",
)];

static TS_KEYWORDS: &[(usize, &str)] = &[(
    0,
    "abstract any as async await boolean break case catch class const continue \
declare default do else enum export extends false finally for from function if \
implements import in interface keyof let namespace never new null number of \
private protected public readonly return string super switch this throw true \
try type typeof undefined unknown var void while",
)];

static PY_KEYWORDS: &[(usize, &str)] = &[(
    0,
    "False None True and as assert async await break class continue def del elif \
else except finally for from global if import in is lambda nonlocal not or pass \
raise return try while with yield",
)];

static RUST_KEYWORDS: &[(usize, &str)] = &[
    (
        0,
        "as async await break const continue crate dyn else enum extern false fn for \
if impl in let loop match mod move mut pub ref return self Self static struct \
super trait true type unsafe use where while",
    ),
    (
        1,
        "bool char f32 f64 i8 i16 i32 i64 i128 isize str u8 u16 u32 u64 u128 usize \
String Vec Option Result Box",
    ),
];

static SQL_KEYWORDS: &[(usize, &str)] = &[(
    0,
    "ALL ALTER AND AS ASC BETWEEN BY CASE CREATE DELETE DESC DISTINCT DROP ELSE \
END EXISTS FROM GROUP HAVING IN INNER INSERT INTO IS JOIN LEFT LIKE LIMIT NOT \
NULL ON OR ORDER PRIMARY SELECT SET TABLE UNION UPDATE VALUES WHERE WITH",
)];

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_table_extension_resolves_to_its_entry() {
        for entry in MODES {
            for ext in entry.extensions {
                let name = format!("file.{ext}");
                assert_eq!(language_for(&name), entry.language, "{name}");
                assert_eq!(resolve(&name), entry.language.mode_bundle(), "{name}");
            }
        }
    }

    #[test]
    fn table_extensions_are_disjoint() {
        let mut seen = HashSet::new();
        for entry in MODES {
            for ext in entry.extensions {
                assert!(seen.insert(*ext), "{ext} appears in two entries");
            }
        }
    }

    #[test]
    fn python_bundle() {
        let bundle = resolve("main.py");
        assert_eq!(bundle[0], ExtensionConfig::Syntax(Language::Python));
        assert!(bundle
            .iter()
            .any(|e| matches!(e, ExtensionConfig::Keywords { index: 0, .. })));
    }

    #[test]
    fn no_extension_falls_back() {
        assert_eq!(resolve("README"), default_mode());
        assert_eq!(language_for("README"), Language::PlainText);
    }

    #[test]
    fn unknown_extension_falls_back() {
        assert_eq!(resolve("file.xyz"), default_mode());
    }

    #[test]
    fn default_mode_is_plain_text() {
        assert_eq!(
            default_mode(),
            vec![ExtensionConfig::Syntax(Language::PlainText)]
        );
    }

    #[test]
    fn extension_case_insensitive() {
        assert_eq!(language_for("main.RS"), Language::Rust);
        assert_eq!(language_for("main.Py"), Language::Python);
        assert_eq!(language_for("index.HTML"), Language::Html);
    }

    #[test]
    fn last_segment_wins() {
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(language_for("config.json.yml"), Language::Yaml);
    }

    #[test]
    fn extension_edge_cases() {
        assert_eq!(extension_of("notes."), None);
        assert_eq!(extension_of(""), None);
        assert_eq!(extension_of(".bashrc").as_deref(), Some("bashrc"));
        assert_eq!(extension_of("v1.2/README"), None);
        assert_eq!(extension_of("src/lib.rs").as_deref(), Some("rs"));
    }

    #[test]
    fn json_and_yaml_carry_linters() {
        assert!(resolve("a.json").contains(&ExtensionConfig::Linter(Linter::Json)));
        assert!(resolve("a.yaml").contains(&ExtensionConfig::Linter(Linter::Yaml)));
        assert!(!resolve("a.rs")
            .iter()
            .any(|e| matches!(e, ExtensionConfig::Linter(_))));
    }

    #[test]
    fn display_names_are_nonempty() {
        for entry in MODES {
            assert!(!entry.language.display_name().is_empty());
        }
        assert_eq!(Language::PlainText.display_name(), "Plain Text");
    }

    #[test]
    fn keyword_lists_are_trimmed() {
        for entry in MODES {
            for (_, words) in keywords(entry.language) {
                assert_eq!(words.trim(), *words, "{:?}", entry.language);
                assert!(!words.is_empty());
            }
        }
    }
}
