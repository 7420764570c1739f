// ── Pinch-to-zoom state machine ───────────────────────────────────────────────
//
// Pure transitions over `GestureState`.  The view feeds raw touch events in
// through `step` and applies the returned `ZoomUpdate`; nothing here touches
// the surface or the engine.
//
// States:
//   Idle      → no baseline distance recorded
//   Tracking  → exactly two fingers down, baseline captured
//
// A gesture scales relative to the baseline captured at touch-start and pans
// so that the content under the two-finger midpoint stays under it.

use serde::{Deserialize, Serialize};

use crate::theme::FontMetrics;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

// ── Touch input ───────────────────────────────────────────────────────────────

/// One active touch point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    fn position(self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A raw touch event with the list of points still active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, touches: &[(f64, f64)]) -> Self {
        Self {
            phase,
            touches: touches
                .iter()
                .zip(0..)
                .map(|(&(x, y), id)| TouchPoint { id, x, y })
                .collect(),
        }
    }

    /// `(distance, midpoint)` when exactly two points are active.
    fn pinch_geometry(&self) -> Option<(f64, Point)> {
        match self.touches.as_slice() {
            [a, b] => {
                let (a, b) = (a.position(), b.position());
                Some((a.distance(b), a.midpoint(b)))
            }
            _ => None,
        }
    }
}

// ── Scale bounds ──────────────────────────────────────────────────────────────

/// Inclusive zoom range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    pub const DEFAULT: ScaleBounds = ScaleBounds { min: 0.5, max: 3.0 };

    pub fn clamp(self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ── GestureState ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Tracking,
}

/// Zoom and pan state for one editor surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// Finger distance at touch-start; `None` while idle.
    pub initial_distance: Option<f64>,
    /// Scale committed by the previous gesture.
    pub baseline_scale: f64,
    pub current_scale: f64,
    /// Device metrics at unit scale; fixed for the life of the state.
    pub base_metrics: FontMetrics,
    pub current_metrics: FontMetrics,
    /// Two-finger midpoint at touch-start; `None` while idle.
    pub center_point: Option<Point>,
    pub baseline_translation: Point,
    pub translation: Point,
}

impl GestureState {
    /// Unzoomed state with the device's base metrics.
    pub fn new(metrics: FontMetrics) -> Self {
        Self {
            initial_distance: None,
            baseline_scale: 1.0,
            current_scale: 1.0,
            base_metrics: metrics,
            current_metrics: metrics,
            center_point: None,
            baseline_translation: Point::ORIGIN,
            translation: Point::ORIGIN,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.initial_distance.is_some() {
            Phase::Tracking
        } else {
            Phase::Idle
        }
    }
}

/// What the view must apply after a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomUpdate {
    pub scale: f64,
    pub metrics: FontMetrics,
    pub translation: Point,
}

/// Result of feeding one event through the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub state: GestureState,
    pub update: Option<ZoomUpdate>,
}

// ── Transitions ───────────────────────────────────────────────────────────────

/// Dispatch `event` to the matching transition.
pub fn step(state: &GestureState, event: &TouchEvent, bounds: ScaleBounds) -> Step {
    match event.phase {
        TouchPhase::Start => Step {
            state: touch_start(state, event),
            update: None,
        },
        TouchPhase::Move => touch_move(state, event, bounds),
        TouchPhase::End | TouchPhase::Cancel => Step {
            state: touch_end(state),
            update: None,
        },
    }
}

/// Capture a baseline when exactly two fingers are down.
///
/// A start with any other point count ends a gesture in progress and
/// otherwise leaves the state alone.  Coincident fingers (zero distance)
/// cannot define a scale and leave the controller idle.
pub fn touch_start(state: &GestureState, event: &TouchEvent) -> GestureState {
    let committed = touch_end(state);
    let Some((distance, center)) = event.pinch_geometry() else {
        return committed;
    };
    if distance.is_nan() || distance <= 0.0 {
        return committed;
    }
    log::debug!("pinch start: distance {distance:.1}, scale {:.3}", committed.current_scale);
    GestureState {
        initial_distance: Some(distance),
        center_point: Some(center),
        ..committed
    }
}

/// Derive scale, metrics and translation from the current finger positions.
pub fn touch_move(state: &GestureState, event: &TouchEvent, bounds: ScaleBounds) -> Step {
    let (Some(initial), Some(center)) = (state.initial_distance, state.center_point) else {
        // Move without a start: a missed event, not a gesture.
        return Step {
            state: *state,
            update: None,
        };
    };
    let Some((distance, midpoint)) = event.pinch_geometry() else {
        return Step {
            state: touch_end(state),
            update: None,
        };
    };

    let scale = bounds.clamp(state.baseline_scale * (distance / initial));
    let ratio = scale / state.baseline_scale;
    let metrics = scale_metrics(state.base_metrics, scale);
    let anchor = Point::new(
        center.x - state.baseline_translation.x,
        center.y - state.baseline_translation.y,
    );
    let translation = Point::new(midpoint.x - anchor.x * ratio, midpoint.y - anchor.y * ratio);

    let next = GestureState {
        current_scale: scale,
        current_metrics: metrics,
        translation,
        ..*state
    };
    Step {
        state: next,
        update: Some(ZoomUpdate {
            scale,
            metrics,
            translation,
        }),
    }
}

/// Commit the current scale and pan as the baseline for the next gesture.
///
/// Metrics are not committed; they always derive from `base_metrics` and the
/// absolute scale.
pub fn touch_end(state: &GestureState) -> GestureState {
    if state.phase() == Phase::Tracking {
        log::debug!("pinch end: scale {:.3}", state.current_scale);
    }
    GestureState {
        initial_distance: None,
        center_point: None,
        baseline_scale: state.current_scale,
        baseline_translation: state.translation,
        ..*state
    }
}

fn scale_metrics(base: FontMetrics, scale: f64) -> FontMetrics {
    FontMetrics {
        font_size: scale_px(base.font_size, scale),
        line_height: scale_px(base.line_height, scale),
    }
}

fn scale_px(px: u32, scale: f64) -> u32 {
    (f64::from(px) * scale).round().max(1.0) as u32
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: FontMetrics = FontMetrics {
        font_size: 14,
        line_height: 21,
    };

    fn idle() -> GestureState {
        GestureState::new(METRICS)
    }

    fn start(a: (f64, f64), b: (f64, f64)) -> TouchEvent {
        TouchEvent::new(TouchPhase::Start, &[a, b])
    }

    fn mv(a: (f64, f64), b: (f64, f64)) -> TouchEvent {
        TouchEvent::new(TouchPhase::Move, &[a, b])
    }

    fn end() -> TouchEvent {
        TouchEvent::new(TouchPhase::End, &[])
    }

    /// Start at 100 px apart, then move to `d` px apart along the x axis.
    fn pinch_to(state: &GestureState, d: f64, bounds: ScaleBounds) -> Step {
        let tracking = touch_start(state, &start((0.0, 0.0), (100.0, 0.0)));
        touch_move(&tracking, &mv((0.0, 0.0), (d, 0.0)), bounds)
    }

    #[test]
    fn new_state_is_idle_at_unit_scale() {
        let s = idle();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.current_scale, 1.0);
        assert_eq!(s.current_metrics, METRICS);
        assert_eq!(s.translation, Point::ORIGIN);
    }

    #[test]
    fn two_finger_start_tracks() {
        let s = touch_start(&idle(), &start((0.0, 0.0), (30.0, 40.0)));
        assert_eq!(s.phase(), Phase::Tracking);
        assert_eq!(s.initial_distance, Some(50.0));
        assert_eq!(s.center_point, Some(Point::new(15.0, 20.0)));
    }

    #[test]
    fn single_finger_start_stays_idle() {
        let s = touch_start(&idle(), &TouchEvent::new(TouchPhase::Start, &[(5.0, 5.0)]));
        assert_eq!(s, idle());
    }

    #[test]
    fn zero_distance_start_stays_idle() {
        let s = touch_start(&idle(), &start((10.0, 10.0), (10.0, 10.0)));
        assert_eq!(s.phase(), Phase::Idle);
    }

    // Scenario A
    #[test]
    fn pinch_in_clamps_at_min() {
        let bounds = ScaleBounds {
            min: 0.5,
            max: 3.0,
        };
        let step = pinch_to(&idle(), 50.0, bounds);
        let update = step.update.unwrap();
        assert_eq!(update.scale, 0.5);
        assert_eq!(
            update.metrics,
            FontMetrics {
                font_size: 7,
                line_height: 11
            }
        );
    }

    // Scenario B
    #[test]
    fn pinch_out_clamps_at_max() {
        let bounds = ScaleBounds {
            min: 0.4,
            max: 1.25,
        };
        let step = pinch_to(&idle(), 300.0, bounds);
        assert_eq!(step.update.unwrap().scale, 1.25);
        assert_eq!(step.state.current_scale, 1.25);
    }

    #[test]
    fn clamp_stays_in_bounds_and_is_monotonic() {
        let bounds = ScaleBounds::DEFAULT;
        let mut last = 0.0;
        for i in 1..=80 {
            let d = f64::from(i) * 5.0;
            let scale = pinch_to(&idle(), d, bounds).update.unwrap().scale;
            assert!((bounds.min..=bounds.max).contains(&scale), "{scale}");
            assert!(scale >= last, "not monotonic at {d}");
            last = scale;
        }
    }

    // Scenario D
    #[test]
    fn one_finger_move_while_tracking_ends_gesture() {
        let tracking = touch_start(&idle(), &start((0.0, 0.0), (100.0, 0.0)));
        let one_finger = TouchEvent::new(TouchPhase::Move, &[(1.0, 1.0)]);
        let step = touch_move(&tracking, &one_finger, ScaleBounds::DEFAULT);
        assert_eq!(step.state.phase(), Phase::Idle);
        assert!(step.update.is_none());
        assert_eq!(step.state.current_scale, 1.0);
    }

    #[test]
    fn move_before_start_is_ignored() {
        let step = touch_move(&idle(), &mv((0.0, 0.0), (200.0, 0.0)), ScaleBounds::DEFAULT);
        assert_eq!(step.state, idle());
        assert!(step.update.is_none());
    }

    #[test]
    fn scale_round_trips_to_baseline() {
        let bounds = ScaleBounds::DEFAULT;
        let tracking = touch_start(&idle(), &start((0.0, 0.0), (100.0, 0.0)));
        let out = touch_move(&tracking, &mv((0.0, 0.0), (180.0, 0.0)), bounds);
        let back = touch_move(&out.state, &mv((0.0, 0.0), (100.0, 0.0)), bounds);
        let scale = back.update.unwrap().scale;
        assert!((scale - tracking.baseline_scale).abs() < 1e-9);
        assert_eq!(back.state.current_metrics, METRICS);
    }

    #[test]
    fn end_commits_baseline() {
        let step = pinch_to(&idle(), 200.0, ScaleBounds::DEFAULT);
        let done = touch_end(&step.state);
        assert_eq!(done.phase(), Phase::Idle);
        assert_eq!(done.baseline_scale, 2.0);
        assert_eq!(
            done.current_metrics,
            FontMetrics {
                font_size: 28,
                line_height: 42
            }
        );
        assert_eq!(done.base_metrics, METRICS);
        assert_eq!(done.center_point, None);
    }

    #[test]
    fn second_gesture_scales_from_committed_baseline() {
        let bounds = ScaleBounds::DEFAULT;
        let first = touch_end(&pinch_to(&idle(), 200.0, bounds).state);
        let second = pinch_to(&first, 120.0, bounds).update.unwrap();
        assert!((second.scale - 2.4).abs() < 1e-9);
        assert_eq!(second.metrics.font_size, 34);
    }

    #[test]
    fn metrics_follow_absolute_scale_across_gestures() {
        let bounds = ScaleBounds::DEFAULT;
        let gesture = |state: &GestureState, from: f64, to: f64| {
            let tracking = touch_start(state, &start((0.0, 0.0), (from, 0.0)));
            let moved = touch_move(&tracking, &mv((0.0, 0.0), (to, 0.0)), bounds);
            touch_end(&moved.state)
        };
        let expected = |scale: f64| FontMetrics {
            font_size: (14.0 * scale).round() as u32,
            line_height: (21.0 * scale).round() as u32,
        };

        let small = gesture(&idle(), 100.0, 50.0);
        assert_eq!(small.current_scale, 0.5);
        assert_eq!(small.current_metrics, expected(0.5));

        let large = gesture(&small, 100.0, 600.0);
        assert_eq!(large.current_scale, 3.0);
        assert_eq!(
            large.current_metrics,
            FontMetrics {
                font_size: 42,
                line_height: 63
            }
        );

        let unit = gesture(&large, 300.0, 100.0);
        assert!((unit.current_scale - 1.0).abs() < 1e-9);
        assert_eq!(unit.current_metrics, METRICS);

        let back = gesture(&small, 50.0, 100.0);
        assert_eq!(back.current_scale, 1.0);
        assert_eq!(back.current_metrics, METRICS);
    }

    #[test]
    fn touch_end_is_idempotent() {
        let pinched = pinch_to(&idle(), 150.0, ScaleBounds::DEFAULT);
        let once = step(&pinched.state, &end(), ScaleBounds::DEFAULT).state;
        let twice = step(&once, &end(), ScaleBounds::DEFAULT).state;
        assert_eq!(once, twice);
    }

    #[test]
    fn cancel_behaves_like_end() {
        let pinched = pinch_to(&idle(), 150.0, ScaleBounds::DEFAULT);
        let cancel = TouchEvent::new(TouchPhase::Cancel, &[]);
        assert_eq!(
            step(&pinched.state, &cancel, ScaleBounds::DEFAULT).state,
            touch_end(&pinched.state)
        );
    }

    #[test]
    fn midpoint_stays_anchored() {
        // Fingers centred on (100, 100) spread symmetrically: the content
        // point under the midpoint must not move.
        let bounds = ScaleBounds::DEFAULT;
        let tracking = touch_start(&idle(), &start((50.0, 100.0), (150.0, 100.0)));
        let step = touch_move(&tracking, &mv((0.0, 100.0), (200.0, 100.0)), bounds);
        let t = step.update.unwrap().translation;
        // content (100,100) maps to 100 * 2 + t on screen
        assert!((100.0 * 2.0 + t.x - 100.0).abs() < 1e-9);
        assert!((100.0 * 2.0 + t.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn two_finger_drag_pans_without_zoom() {
        let tracking = touch_start(&idle(), &start((0.0, 0.0), (100.0, 0.0)));
        let step = touch_move(&tracking, &mv((30.0, 40.0), (130.0, 40.0)), ScaleBounds::DEFAULT);
        let update = step.update.unwrap();
        assert_eq!(update.scale, 1.0);
        assert_eq!(update.translation, Point::new(30.0, 40.0));
    }

    #[test]
    fn restart_while_tracking_rebaselines() {
        let bounds = ScaleBounds::DEFAULT;
        let zoomed = pinch_to(&idle(), 200.0, bounds).state;
        let restarted = touch_start(&zoomed, &start((0.0, 0.0), (40.0, 0.0)));
        assert_eq!(restarted.phase(), Phase::Tracking);
        assert_eq!(restarted.baseline_scale, 2.0);
        assert_eq!(restarted.initial_distance, Some(40.0));
    }

    #[test]
    fn touch_events_parse_from_json() {
        let json = r#"{"phase":"move","touches":[{"id":0,"x":1.0,"y":2.0}]}"#;
        let ev: TouchEvent = serde_json::from_str(json).unwrap();
        assert_eq!(ev.phase, TouchPhase::Move);
        assert_eq!(ev.touches.len(), 1);
        let ev: TouchEvent = serde_json::from_str(r#"{"phase":"end"}"#).unwrap();
        assert!(ev.touches.is_empty());
    }
}
