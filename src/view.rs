// ── Editor view lifecycle ─────────────────────────────────────────────────────
//
// One `EditorView` is created per rendered editor surface and owns, for its
// lifetime, the engine instance, the surface binding, the gesture state and
// the pending frame.  Nothing here is shared between views.  All calls happen
// on the UI event loop.
//
// Zoom is applied in two steps:
//   1. the pan offset goes straight to the surface on every move (cheap);
//   2. new font metrics reach the engine through a full reconfigure, deferred
//      to the next frame and coalesced so a burst of moves costs one rebuild.

use crate::{
    config::EditorConfig,
    editor::{base_setup, ChangeListener, EditorEngine, EngineFactory, ExtensionConfig},
    error::Result,
    frame::{FrameId, FrameQueue, FrameScheduler},
    gesture::{self, GestureState, Point, Step, TouchEvent},
    languages::{language_for, resolve, Language},
    theme::{FontMetrics, Theme},
};

// ── Host boundary ─────────────────────────────────────────────────────────────

/// Height requested by the host for the editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Height {
    Pixels(u32),
    /// Fill the container.
    Fill,
}

/// Input configuration supplied by the host component.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorProps {
    pub text: String,
    pub height: Height,
    pub filename: String,
}

/// The rendered element the engine draws into.
pub trait Surface {
    fn set_height(&mut self, height: Height);
    /// Visual pan offset in screen pixels.
    fn set_translation(&mut self, offset: Point);
    /// Register touch-start/move/end/cancel listeners.
    fn listen_touch(&mut self);
    fn unlisten_touch(&mut self);
}

/// A surface with no renderer behind it; records what was applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadlessSurface {
    pub height: Option<Height>,
    pub translation: Point,
    pub listening: bool,
    pub translation_updates: usize,
}

impl Surface for HeadlessSurface {
    fn set_height(&mut self, height: Height) {
        self.height = Some(height);
    }

    fn set_translation(&mut self, offset: Point) {
        self.translation = offset;
        self.translation_updates += 1;
    }

    fn listen_touch(&mut self) {
        self.listening = true;
    }

    fn unlisten_touch(&mut self) {
        self.listening = false;
    }
}

// ── EditorView ────────────────────────────────────────────────────────────────

pub struct EditorView<E: EditorEngine, S: Surface, Q: FrameScheduler> {
    config: EditorConfig,
    filename: String,
    language: Language,
    dark: bool,
    gesture: GestureState,
    /// Metrics carried by the last configuration the engine accepted.
    applied_metrics: FontMetrics,
    engine: Option<E>,
    surface: Option<S>,
    scheduler: Q,
    pending_frame: Option<FrameId>,
}

impl<E: EditorEngine, S: Surface, Q: FrameScheduler> EditorView<E, S, Q> {
    /// Mount a view on `surface`.
    ///
    /// Without a surface the view stays inert: a warning is logged, no engine
    /// is created, and every later call is a no-op.  An engine construction
    /// failure is returned to the caller.
    pub fn mount<F>(
        props: EditorProps,
        surface: Option<S>,
        factory: &mut F,
        scheduler: Q,
        config: EditorConfig,
        on_text_changed: ChangeListener,
    ) -> Result<Self>
    where
        F: EngineFactory<Engine = E>,
    {
        config.validate()?;
        let metrics = config.base_metrics();
        let mut view = Self {
            language: language_for(&props.filename),
            filename: props.filename,
            dark: config.dark_mode,
            gesture: GestureState::new(metrics),
            applied_metrics: metrics,
            engine: None,
            surface: None,
            scheduler,
            pending_frame: None,
            config,
        };

        let Some(mut surface) = surface else {
            log::warn!("no mount target for {:?}; editor not initialised", view.filename);
            return Ok(view);
        };

        let engine = factory.create(&props.text, view.extensions(), on_text_changed)?;
        surface.set_height(props.height);
        surface.listen_touch();
        view.engine = Some(engine);
        view.surface = Some(surface);
        log::info!(
            "mounted {:?} as {} ({}px)",
            view.filename,
            view.language.display_name(),
            metrics.font_size
        );
        Ok(view)
    }

    /// The full configuration set for the current mode, theme and zoom.
    pub fn extensions(&self) -> Vec<ExtensionConfig> {
        let mut exts = base_setup(self.config.line_wrapping);
        exts.extend(resolve(&self.filename));
        exts.push(ExtensionConfig::Theme(Theme::new(
            self.language,
            self.dark,
            self.gesture.current_metrics,
        )));
        exts
    }

    // ── Touch input ───────────────────────────────────────────────────────────

    /// Feed one raw touch event through the gesture state machine.
    pub fn handle_touch(&mut self, event: &TouchEvent) {
        if !self.is_mounted() {
            return;
        }
        let Step { state, update } = gesture::step(&self.gesture, event, self.config.bounds());
        self.gesture = state;
        let Some(update) = update else {
            return;
        };
        if let Some(surface) = self.surface.as_mut() {
            surface.set_translation(update.translation);
        }
        if update.metrics != self.applied_metrics {
            self.schedule_reconfigure();
        }
    }

    /// Run the deferred reconfigure if `id` is the frame this view is
    /// waiting on.  Stale or foreign ids are ignored.
    pub fn on_frame(&mut self, id: FrameId) -> Result<()> {
        if self.pending_frame != Some(id) {
            return Ok(());
        }
        self.pending_frame = None;
        log::trace!("frame {id:?}: reconfigure at {}px", self.gesture.current_metrics.font_size);
        self.reconfigure()
    }

    fn schedule_reconfigure(&mut self) {
        self.cancel_pending_frame();
        self.pending_frame = Some(self.scheduler.request_frame());
    }

    fn cancel_pending_frame(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.scheduler.cancel_frame(id);
        }
    }

    fn reconfigure(&mut self) -> Result<()> {
        let exts = self.extensions();
        if let Some(engine) = self.engine.as_mut() {
            engine.reconfigure(exts)?;
            self.applied_metrics = self.gesture.current_metrics;
        }
        Ok(())
    }

    // ── Host-driven changes ───────────────────────────────────────────────────

    /// Switch the syntax mode for a renamed file, keeping the zoom.
    pub fn set_filename(&mut self, filename: &str) -> Result<()> {
        if !self.is_mounted() {
            return Ok(());
        }
        self.filename = filename.to_owned();
        self.language = language_for(filename);
        self.reconfigure()
    }

    pub fn set_dark_mode(&mut self, dark: bool) -> Result<()> {
        if !self.is_mounted() || self.dark == dark {
            return Ok(());
        }
        self.dark = dark;
        self.reconfigure()
    }

    /// Drop back to unit scale, no pan and the device's base metrics.
    pub fn reset_zoom(&mut self) -> Result<()> {
        if !self.is_mounted() {
            return Ok(());
        }
        self.cancel_pending_frame();
        self.gesture = GestureState::new(self.config.base_metrics());
        if let Some(surface) = self.surface.as_mut() {
            surface.set_translation(Point::ORIGIN);
        }
        self.reconfigure()
    }

    // ── Teardown ──────────────────────────────────────────────────────────────

    /// Cancel the pending frame, remove touch listeners and release the
    /// engine.  Safe to call more than once; `Drop` calls it too.
    pub fn unmount(&mut self) {
        self.cancel_pending_frame();
        if let Some(mut surface) = self.surface.take() {
            surface.unlisten_touch();
        }
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
            log::info!("unmounted {:?}", self.filename);
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some() && self.surface.is_some()
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The current document, or `None` when not mounted.
    pub fn text(&self) -> Option<String> {
        self.engine.as_ref().map(EditorEngine::text)
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &Q {
        &self.scheduler
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }
}

impl<E: EditorEngine, S: Surface> EditorView<E, S, FrameQueue> {
    /// Deliver every queued frame.  Returns how many frames fired.
    pub fn pump_frames(&mut self) -> Result<usize> {
        let due = self.scheduler.drain();
        for &id in &due {
            self.on_frame(id)?;
        }
        Ok(due.len())
    }
}

impl<E: EditorEngine, S: Surface, Q: FrameScheduler> Drop for EditorView<E, S, Q> {
    fn drop(&mut self) {
        self.unmount();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
