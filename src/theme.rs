// ── Dual light/dark colour theme ───────────────────────────────────────────────
//
// Builds the theme unit of the engine configuration for a language, a
// light/dark choice and the current font metrics.  Zoom changes only the
// metrics; colours and highlight rules depend on the language and mode.
//
// Colour conventions:
//   • All palette entries are in 0xRRGGBB form.
//   • `Rgb::css()` renders `#rrggbb` for engines that take CSS colours.

use serde::{Deserialize, Serialize};

use crate::languages::Language;

// ── Colour ────────────────────────────────────────────────────────────────────

/// A 24-bit colour stored as 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn css(self) -> String {
        format!("#{:06x}", self.0 & 0x00FF_FFFF)
    }
}

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Rgb,
    pub fg: Rgb,
    pub gutter_bg: Rgb,
    pub gutter_fg: Rgb,
    pub comment: Rgb,
    pub keyword: Rgb,
    pub keyword2: Rgb,
    pub string: Rgb,
    pub number: Rgb,
    pub preproc: Rgb,
    pub operator: Rgb,
    pub tag: Rgb,
    pub attr: Rgb,
    pub heading: Rgb,
    pub code: Rgb,
}

/// Notepad++-style light palette.
pub const LIGHT: Palette = Palette {
    bg: Rgb(0xFFFFFF),
    fg: Rgb(0x000000),
    gutter_bg: Rgb(0xE4E4E4),
    gutter_fg: Rgb(0x808080),
    comment: Rgb(0x008000),
    keyword: Rgb(0x0000FF),
    keyword2: Rgb(0x000080),
    string: Rgb(0x800000),
    number: Rgb(0xFF8000),
    preproc: Rgb(0x804000),
    operator: Rgb(0x000000),
    tag: Rgb(0x800000),
    attr: Rgb(0xFF0000),
    heading: Rgb(0x000080),
    code: Rgb(0x804000),
};

/// VS Code Dark+-inspired dark palette.
pub const DARK: Palette = Palette {
    bg: Rgb(0x1E1E1E),
    fg: Rgb(0xD4D4D4),
    gutter_bg: Rgb(0x252526),
    gutter_fg: Rgb(0x858585),
    comment: Rgb(0x6A9955),
    keyword: Rgb(0x569CD6),
    keyword2: Rgb(0x4EC9B0),
    string: Rgb(0xCE9178),
    number: Rgb(0xB5CEA8),
    preproc: Rgb(0xC586C0),
    operator: Rgb(0xD4D4D4),
    tag: Rgb(0x4EC9B0),
    attr: Rgb(0x9CDCFE),
    heading: Rgb(0x569CD6),
    code: Rgb(0xCE9178),
};

// ── Highlight rules ───────────────────────────────────────────────────────────

/// Token classes shared by all modes.  The engine maps its own token types
/// onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Comment,
    Keyword,
    Type,
    String,
    Number,
    Operator,
    Preprocessor,
    Tag,
    Attribute,
    PropertyName,
    Heading,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub token: Token,
    pub colour: Rgb,
    pub bold: bool,
}

const fn rule(token: Token, colour: Rgb) -> StyleRule {
    StyleRule {
        token,
        colour,
        bold: false,
    }
}

const fn bold(token: Token, colour: Rgb) -> StyleRule {
    StyleRule {
        token,
        colour,
        bold: true,
    }
}

/// Highlight rules for `language` in palette `p`.  Plain text gets none.
pub fn highlight_rules(language: Language, p: &Palette) -> Vec<StyleRule> {
    match language {
        Language::PlainText => Vec::new(),
        Language::C
        | Language::Cpp
        | Language::JavaScript
        | Language::TypeScript
        | Language::Rust => vec![
            rule(Token::Comment, p.comment),
            bold(Token::Keyword, p.keyword),
            rule(Token::Type, p.keyword2),
            rule(Token::String, p.string),
            rule(Token::Number, p.number),
            rule(Token::Operator, p.operator),
            rule(Token::Preprocessor, p.preproc),
        ],
        Language::Python | Language::Shell => vec![
            rule(Token::Comment, p.comment),
            bold(Token::Keyword, p.keyword),
            rule(Token::String, p.string),
            rule(Token::Number, p.number),
            rule(Token::Operator, p.operator),
        ],
        Language::Html | Language::Xml => vec![
            rule(Token::Comment, p.comment),
            rule(Token::Tag, p.tag),
            rule(Token::Attribute, p.attr),
            rule(Token::String, p.string),
        ],
        Language::Css => vec![
            rule(Token::Comment, p.comment),
            bold(Token::Tag, p.tag),
            rule(Token::PropertyName, p.keyword),
            rule(Token::String, p.string),
            rule(Token::Number, p.number),
        ],
        Language::Json | Language::Toml | Language::Yaml => vec![
            rule(Token::Comment, p.comment),
            bold(Token::PropertyName, p.keyword),
            rule(Token::String, p.string),
            rule(Token::Number, p.number),
            rule(Token::Keyword, p.keyword2),
        ],
        Language::Sql => vec![
            rule(Token::Comment, p.comment),
            bold(Token::Keyword, p.keyword),
            rule(Token::String, p.string),
            rule(Token::Number, p.number),
            rule(Token::Operator, p.operator),
        ],
        Language::Markdown => vec![
            bold(Token::Heading, p.heading),
            rule(Token::Code, p.code),
            rule(Token::Comment, p.comment),
        ],
    }
}

// ── Font metrics ──────────────────────────────────────────────────────────────

/// Font size and line height in whole CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub font_size: u32,
    pub line_height: u32,
}

// ── Theme ─────────────────────────────────────────────────────────────────────

pub const FONT_FAMILY: &str = "monospace";

/// The theme unit handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub dark: bool,
    pub font_family: &'static str,
    pub metrics: FontMetrics,
    pub palette: Palette,
    pub rules: Vec<StyleRule>,
}

impl Theme {
    /// Build the theme for `language`.  `dark` selects the Dark+ palette.
    pub fn new(language: Language, dark: bool, metrics: FontMetrics) -> Self {
        let palette = if dark { DARK } else { LIGHT };
        Self {
            dark,
            font_family: FONT_FAMILY,
            metrics,
            rules: highlight_rules(language, &palette),
            palette,
        }
    }
}
