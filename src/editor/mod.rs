// ── Editor engine abstraction ─────────────────────────────────────────────────
//
// The text-editing engine is an external collaborator.  pinchpad never edits
// text itself; it builds a configuration set, hands it to the engine, and
// replaces that set atomically when the mode, theme or zoom changes.
//
// Engines plug in through `EngineFactory` / `EditorEngine`.  `memory` holds
// an in-process reference engine used by the replay binary and the tests.

pub mod memory;

use crate::{error::Result, languages::Language, theme::Theme};

// ── Configuration units ───────────────────────────────────────────────────────

/// Linter attached by a mode bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linter {
    /// Structural JSON validation.
    Json,
    /// YAML structure validation.
    Yaml,
}

/// One unit of configuration consumed by the editor engine.
///
/// The view treats these as opaque: it only concatenates lists of them and
/// passes the result to `EditorEngine::reconfigure`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionConfig {
    /// Line numbers, history, bracket matching and other default behaviour.
    BaseSetup,
    /// Soft-wrap long lines to the viewport.
    LineWrapping,
    /// Syntax-highlighting mode.
    Syntax(Language),
    /// Keyword set `index` for the active syntax mode.
    Keywords {
        index: usize,
        words: &'static str,
    },
    /// Diagnostics provider.
    Linter(Linter),
    /// Colours, highlight rules and font metrics.
    Theme(Theme),
}

/// The base behaviour every view starts from, before mode and theme.
pub fn base_setup(line_wrapping: bool) -> Vec<ExtensionConfig> {
    let mut exts = vec![ExtensionConfig::BaseSetup];
    if line_wrapping {
        exts.push(ExtensionConfig::LineWrapping);
    }
    exts
}

// ── Engine capability ─────────────────────────────────────────────────────────

/// Receives the full document text after every non-empty edit.
pub type ChangeListener = Box<dyn FnMut(&str)>;

/// A live editor engine instance bound to one surface.
pub trait EditorEngine {
    /// Atomically replace the active configuration set.  Document content and
    /// cursor state are preserved.
    fn reconfigure(&mut self, extensions: Vec<ExtensionConfig>) -> Result<()>;

    /// The full current document.
    fn text(&self) -> String;

    /// Release the engine.  Further calls to `reconfigure` fail.
    fn destroy(&mut self);
}

/// Constructs engines with an initial document and configuration.
pub trait EngineFactory {
    type Engine: EditorEngine;

    fn create(
        &mut self,
        doc: &str,
        extensions: Vec<ExtensionConfig>,
        on_change: ChangeListener,
    ) -> Result<Self::Engine>;
}
