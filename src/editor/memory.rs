// ── In-memory reference engine ────────────────────────────────────────────────
//
// Stores the document and the active configuration set and nothing else: no
// parsing, no layout.  Used by the replay binary and as the engine under test.

use std::ops::Range;

use super::{ChangeListener, EditorEngine, EngineFactory, ExtensionConfig};
use crate::error::{EditorError, Result};

/// A minimal engine that keeps its document in a `String`.
pub struct MemoryEngine {
    text: String,
    extensions: Vec<ExtensionConfig>,
    on_change: ChangeListener,
    reconfigure_count: usize,
    destroyed: bool,
}

impl MemoryEngine {
    pub fn new(doc: &str, extensions: Vec<ExtensionConfig>, on_change: ChangeListener) -> Self {
        Self {
            text: doc.to_owned(),
            extensions,
            on_change,
            reconfigure_count: 0,
            destroyed: false,
        }
    }

    /// Replace the byte range `range` with `insert`.
    ///
    /// The change listener fires only when the document actually changed; an
    /// empty insertion over an empty range is not reported.
    pub fn edit(&mut self, range: Range<usize>, insert: &str) -> Result<()> {
        if self.destroyed {
            return Err(EditorError::engine("edit", "engine destroyed"));
        }
        if range.start > range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return Err(EditorError::engine(
                "edit",
                format!("range {range:?} outside document of {} bytes", self.text.len()),
            ));
        }
        if range.is_empty() && insert.is_empty() {
            return Ok(());
        }
        self.text.replace_range(range, insert);
        (self.on_change)(&self.text);
        Ok(())
    }

    /// The configuration set most recently applied.
    pub fn extensions(&self) -> &[ExtensionConfig] {
        &self.extensions
    }

    /// How many times `reconfigure` has succeeded.
    pub fn reconfigure_count(&self) -> usize {
        self.reconfigure_count
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl EditorEngine for MemoryEngine {
    fn reconfigure(&mut self, extensions: Vec<ExtensionConfig>) -> Result<()> {
        if self.destroyed {
            return Err(EditorError::engine("reconfigure", "engine destroyed"));
        }
        self.extensions = extensions;
        self.reconfigure_count += 1;
        Ok(())
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.extensions.clear();
    }
}

/// Factory for `MemoryEngine`.
#[derive(Debug, Default)]
pub struct MemoryFactory;

impl EngineFactory for MemoryFactory {
    type Engine = MemoryEngine;

    fn create(
        &mut self,
        doc: &str,
        extensions: Vec<ExtensionConfig>,
        on_change: ChangeListener,
    ) -> Result<MemoryEngine> {
        Ok(MemoryEngine::new(doc, extensions, on_change))
    }
}
