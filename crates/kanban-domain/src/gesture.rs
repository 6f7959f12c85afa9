//! Drag gesture interpretation.
//!
//! Turns raw pointer input into the three semantic moments the board cares
//! about: a drag starting, the drag hovering a target, and the drag ending.
//! A movement threshold separates a click from a drag.

use serde::{Deserialize, Serialize};

use crate::column::ColumnId;
use crate::task::TaskId;

/// Default pointer travel in pixels before a press becomes a drag
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 5.0;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum DragSubject {
    Task(TaskId),
    Column(ColumnId),
}

/// What the pointer is over: a task card or the empty body of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum DropTarget {
    Task(TaskId),
    Column(ColumnId),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Raw pointer input as delivered by the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed on a draggable element
    Down { subject: DragSubject, at: Point },
    /// Pointer moved; `over` is the droppable element under it, if any
    Move { at: Point, over: Option<DropTarget> },
    /// Button released; `over` is the droppable element under it, if any
    Up { over: Option<DropTarget> },
    /// Gesture aborted by the host (escape key, focus loss)
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureOver {
    pub subject: DragSubject,
    pub target: DropTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureEnd {
    pub subject: DragSubject,
    /// `None` when released outside every droppable element
    pub dropped_on: Option<DropTarget>,
}

/// Semantic drag moments
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    Start(DragSubject),
    Over(GestureOver),
    End(GestureEnd),
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Pending { subject: DragSubject, origin: Point },
    Dragging { subject: DragSubject },
}

/// Pointer state machine: `Idle -> Pending -> Dragging -> Idle`
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    phase: Phase,
    activation_distance: f64,
    allow_column_drag: bool,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DISTANCE)
    }
}

impl GestureInterpreter {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            phase: Phase::Idle,
            activation_distance,
            allow_column_drag: false,
        }
    }

    /// Column dragging is off unless explicitly enabled
    pub fn with_column_drag(mut self, allow: bool) -> Self {
        self.allow_column_drag = allow;
        self
    }

    pub fn activation_distance(&self) -> f64 {
        self.activation_distance
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// The subject of the active drag, if past the threshold
    pub fn active_subject(&self) -> Option<&DragSubject> {
        match &self.phase {
            Phase::Dragging { subject } => Some(subject),
            _ => None,
        }
    }

    /// Feed one pointer event, returning the semantic events it produces in order
    pub fn handle(&mut self, event: PointerEvent) -> Vec<GestureEvent> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let (next, events) = self.step(phase, event);
        self.phase = next;
        events
    }

    fn step(&self, phase: Phase, event: PointerEvent) -> (Phase, Vec<GestureEvent>) {
        match (phase, event) {
            (Phase::Idle, PointerEvent::Down { subject, at }) => {
                if matches!(subject, DragSubject::Column(_)) && !self.allow_column_drag {
                    tracing::debug!("Ignoring column drag: column dragging is disabled");
                    return (Phase::Idle, Vec::new());
                }
                (Phase::Pending { subject, origin: at }, Vec::new())
            }
            (Phase::Pending { subject, origin }, PointerEvent::Move { at, over }) => {
                if origin.distance_to(at) < self.activation_distance {
                    return (Phase::Pending { subject, origin }, Vec::new());
                }
                tracing::debug!("Drag started: {:?}", subject);
                let mut events = vec![GestureEvent::Start(subject.clone())];
                if let Some(target) = over {
                    events.push(GestureEvent::Over(GestureOver {
                        subject: subject.clone(),
                        target,
                    }));
                }
                (Phase::Dragging { subject }, events)
            }
            (Phase::Dragging { subject }, PointerEvent::Move { over, .. }) => {
                let events = match over {
                    Some(target) => vec![GestureEvent::Over(GestureOver {
                        subject: subject.clone(),
                        target,
                    })],
                    None => Vec::new(),
                };
                (Phase::Dragging { subject }, events)
            }
            (Phase::Dragging { subject }, PointerEvent::Up { over }) => {
                tracing::debug!("Drag ended: {:?} on {:?}", subject, over);
                (
                    Phase::Idle,
                    vec![GestureEvent::End(GestureEnd {
                        subject,
                        dropped_on: over,
                    })],
                )
            }
            (Phase::Dragging { subject }, PointerEvent::Cancel) => {
                tracing::debug!("Drag cancelled: {:?}", subject);
                (
                    Phase::Idle,
                    vec![GestureEvent::End(GestureEnd {
                        subject,
                        dropped_on: None,
                    })],
                )
            }
            // A release or cancel below the threshold is a click
            (Phase::Pending { .. }, PointerEvent::Up { .. } | PointerEvent::Cancel) => {
                (Phase::Idle, Vec::new())
            }
            // A second press while a gesture is live restarts nothing
            (phase @ (Phase::Pending { .. } | Phase::Dragging { .. }), PointerEvent::Down { .. }) => {
                (phase, Vec::new())
            }
            (Phase::Idle, _) => (Phase::Idle, Vec::new()),
        }
    }
}
