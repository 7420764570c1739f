// ── Safety policy ────────────────────────────────────────────────────────────
// No FFI lives in this crate: engines and surfaces are supplied by the host
// through traits, so unsafe code is forbidden everywhere.
#![forbid(unsafe_code)]

//! Core of an embedded code-editor view: picks a syntax mode from the
//! filename, builds the engine configuration with a light or dark theme, and
//! turns two-finger touch input into zoom and pan.

pub mod config;
pub mod editor;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod languages;
pub mod theme;
pub mod view;

pub use config::{Device, EditorConfig};
pub use editor::{ChangeListener, EditorEngine, EngineFactory, ExtensionConfig};
pub use error::{EditorError, Result};
pub use frame::{FrameId, FrameQueue, FrameScheduler};
pub use gesture::{GestureState, Point, ScaleBounds, TouchEvent, TouchPhase, TouchPoint};
pub use languages::{resolve, Language};
pub use view::{EditorProps, EditorView, HeadlessSurface, Height, Surface};
