//! Replay of recorded viewer input.
//!
//! A trace pairs a static page layout with the ordered input events of one
//! page view. Replaying it drives the same [`ViewportController`] and
//! [`PageNavigator`] the browser build uses, so transforms can be checked
//! without a browser.
//!
//! ```json
//! {
//!   "layout": {
//!     "container": {"left": 0, "top": 0, "width": 800, "height": 600},
//!     "native": {"width": 1600, "height": 1200}
//!   },
//!   "targets": {"right": "img_0043.html"},
//!   "events": [
//!     {"type": "down", "x": 400, "y": 300},
//!     {"type": "up", "x": 400, "y": 300},
//!     {"type": "key", "key": "ArrowRight"}
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::config::ViewerConfig;
use crate::keybindings::{NavIntent, key_label};
use crate::layout::Point;
use crate::navigation::{HistoryNavigator, KeyOutcome, NavigationTargets, PageNavigator};
use crate::state::{PointerUp, ViewportController, ZoomOutcome};
use crate::surface::MemorySurface;
use crate::zoom_math::Transform;

/// Errors that can occur when loading a trace.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse trace: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Recorded page view.
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    pub layout: MemorySurface,
    /// Navigation URLs keyed by intent; absent intents have no target
    #[serde(default)]
    pub targets: HashMap<NavIntent, String>,
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

impl Trace {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// One recorded input event; coordinates are page coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceEvent {
    Wheel { x: f64, y: f64, delta_y: f64 },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Key { key: String },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Wheel { x, y, delta_y } => write!(f, "wheel {delta_y:+} at ({x}, {y})"),
            TraceEvent::Down { x, y } => write!(f, "down at ({x}, {y})"),
            TraceEvent::Move { x, y } => write!(f, "move to ({x}, {y})"),
            TraceEvent::Up { x, y } => write!(f, "up at ({x}, {y})"),
            TraceEvent::Key { key } => write!(f, "key {}", key_label(key)),
        }
    }
}

/// Visible effect of one replayed event.
#[derive(Debug, Clone, PartialEq)]
pub enum StepReport {
    /// Image transform after the event, `None` for the fitted view
    Transform(Option<Transform>),
    /// Zoom step hit the minimum scale
    Rejected,
    Navigated { intent: NavIntent, url: String },
    /// Nothing happened
    NoOp,
    /// Event was dropped because of an error
    Failed(String),
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepReport::Transform(Some(t)) => f.write_str(&t.to_css()),
            StepReport::Transform(None) => f.write_str("none"),
            StepReport::Rejected => f.write_str("rejected (minimum scale)"),
            StepReport::Navigated { intent, url } => write!(f, "navigate {} -> {url}", intent.name()),
            StepReport::NoOp => f.write_str("-"),
            StepReport::Failed(reason) => write!(f, "ignored: {reason}"),
        }
    }
}

/// Replay session over one trace layout.
pub struct Replay {
    viewer: ViewportController<MemorySurface>,
    pages: PageNavigator<HashMap<NavIntent, String>, HistoryNavigator>,
}

impl Replay {
    pub fn new(layout: MemorySurface, targets: HashMap<NavIntent, String>, config: &ViewerConfig) -> Self {
        log::debug!("Navigation targets: {:?}", targets.available());
        Self {
            viewer: ViewportController::new(layout, config.zoom),
            pages: PageNavigator::new(config.keybindings, Some(targets), HistoryNavigator::new()),
        }
    }

    /// Replay a whole trace, one report per event.
    pub fn run(trace: Trace, config: &ViewerConfig) -> Vec<(TraceEvent, StepReport)> {
        let mut replay = Self::new(trace.layout, trace.targets, config);
        trace
            .events
            .into_iter()
            .map(|event| {
                let report = replay.step(&event);
                (event, report)
            })
            .collect()
    }

    pub fn viewer(&self) -> &ViewportController<MemorySurface> {
        &self.viewer
    }

    /// URLs navigated to so far.
    pub fn visited(&self) -> &[String] {
        self.pages.navigator().visited()
    }

    pub fn step(&mut self, event: &TraceEvent) -> StepReport {
        let result = match event {
            TraceEvent::Wheel { x, y, delta_y } => {
                self.viewer
                    .wheel(Point::new(*x, *y), *delta_y)
                    .map(|outcome| match outcome {
                        ZoomOutcome::Applied(t) => StepReport::Transform(Some(t)),
                        ZoomOutcome::Rejected => StepReport::Rejected,
                    })
            }
            TraceEvent::Down { x, y } => {
                self.viewer.pointer_down(Point::new(*x, *y));
                Ok(StepReport::NoOp)
            }
            TraceEvent::Move { x, y } => self
                .viewer
                .pointer_move(Point::new(*x, *y))
                .map(|moved| moved.map_or(StepReport::NoOp, |t| StepReport::Transform(Some(t)))),
            TraceEvent::Up { x, y } => {
                self.viewer
                    .pointer_up(Point::new(*x, *y))
                    .map(|outcome| match outcome {
                        PointerUp::Ignored | PointerUp::Panned => StepReport::NoOp,
                        PointerUp::Clicked(_) => StepReport::Transform(self.viewer.transform()),
                    })
            }
            TraceEvent::Key { key } => self.pages.key_down(key).map(|outcome| match outcome {
                KeyOutcome::Navigated { intent, url } => StepReport::Navigated { intent, url },
                KeyOutcome::Unmapped | KeyOutcome::NoTarget(_) => StepReport::NoOp,
            }),
        };

        result.unwrap_or_else(|e| {
            log::debug!("Replayed {event} ignored: {e}");
            StepReport::Failed(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALBUM_TRACE: &str = r#"{
        "layout": {
            "container": {"left": 0, "top": 0, "width": 800, "height": 600},
            "native": {"width": 1600, "height": 1200}
        },
        "targets": {"up": "../", "right": "img_0043.html"},
        "events": [
            {"type": "down", "x": 400, "y": 300},
            {"type": "up", "x": 400, "y": 300},
            {"type": "down", "x": 400, "y": 300},
            {"type": "move", "x": 410, "y": 305},
            {"type": "up", "x": 410, "y": 305},
            {"type": "down", "x": 0, "y": 0},
            {"type": "up", "x": 0, "y": 0},
            {"type": "wheel", "x": 0, "y": 0, "delta_y": 18},
            {"type": "key", "key": "Home"},
            {"type": "key", "key": " "}
        ]
    }"#;

    #[test]
    fn test_album_trace() {
        let trace = Trace::from_json(ALBUM_TRACE).unwrap();
        let reports: Vec<StepReport> = Replay::run(trace, &ViewerConfig::default())
            .into_iter()
            .map(|(_, report)| report)
            .collect();

        assert_eq!(
            reports,
            [
                StepReport::NoOp,
                StepReport::Transform(Some(Transform::new(-400.0, -300.0, 2.0))),
                StepReport::NoOp,
                StepReport::Transform(Some(Transform::new(-390.0, -295.0, 2.0))),
                StepReport::NoOp,
                StepReport::NoOp,
                StepReport::Transform(None),
                StepReport::Rejected,
                StepReport::NoOp,
                StepReport::Navigated {
                    intent: NavIntent::Right,
                    url: "img_0043.html".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_layout_offsets_and_parent_chain() {
        let json = r#"{
            "layout": {
                "container": {
                    "left": 50, "top": 20, "width": 800, "height": 600,
                    "parent": {"left": 10, "top": 10}
                },
                "image": {"x": 5, "y": 0},
                "native": {"width": 1600, "height": 1200}
            }
        }"#;
        let trace = Trace::from_json(json).unwrap();
        assert!(trace.events.is_empty());
        assert!(trace.targets.is_empty());

        let mut replay = Replay::new(trace.layout, trace.targets, &ViewerConfig::default());
        replay.step(&TraceEvent::Down { x: 465.0, y: 330.0 });
        replay.step(&TraceEvent::Up { x: 465.0, y: 330.0 });

        assert_eq!(
            replay.viewer().transform(),
            Some(Transform::new(-405.0, -300.0, 2.0))
        );
    }

    #[test]
    fn test_failed_click_is_reported() {
        let json = r#"{
            "layout": {
                "container": {"width": 800, "height": 600},
                "native": {"width": 0, "height": 1200}
            },
            "events": [
                {"type": "down", "x": 1, "y": 1},
                {"type": "up", "x": 1, "y": 1}
            ]
        }"#;
        let trace = Trace::from_json(json).unwrap();
        let steps = Replay::run(trace, &ViewerConfig::default());

        assert!(matches!(steps[1].1, StepReport::Failed(_)));
    }

    #[test]
    fn test_unknown_event_type_fails_to_parse() {
        let json = r#"{
            "layout": {
                "container": {"width": 800, "height": 600},
                "native": {"width": 1600, "height": 1200}
            },
            "events": [{"type": "pinch", "scale": 2}]
        }"#;
        assert!(matches!(Trace::from_json(json), Err(ReplayError::Parse(_))));
    }

    #[test]
    fn test_reports_render() {
        assert_eq!(StepReport::Transform(None).to_string(), "none");
        assert_eq!(
            StepReport::Transform(Some(Transform::new(-400.0, -300.0, 2.0))).to_string(),
            "translate(-400px, -300px) scale(2)"
        );
        assert_eq!(
            TraceEvent::Key { key: " ".to_string() }.to_string(),
            "key Space"
        );
        assert_eq!(
            TraceEvent::Wheel {
                x: 1.0,
                y: 2.0,
                delta_y: -3.0
            }
            .to_string(),
            "wheel -3 at (1, 2)"
        );
    }
}
