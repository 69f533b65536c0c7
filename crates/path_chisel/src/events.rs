//! Event types and sinks for observing generator runs.
//!
//! This module defines [`ChiselEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while running a [`crate::chisel::PathChisel`] or a
//! [`crate::carve::RegionCarver`]. Sinks report which [`ChiselEventKind`]s they care about
//! through [`EventSink::wants`], letting the generators skip building unwanted events.
use crate::grid::{Cell, GridSize};

/// Describes events emitted by the generators.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum ChiselEvent {
    /// Emitted once the initial path of a chisel run is known.
    PathStarted {
        /// Grid dimensions.
        size: GridSize,
        /// Start endpoint.
        from: Cell,
        /// Target endpoint.
        to: Cell,
        /// Bias towards blocking path cells.
        wiggliness: f64,
        /// Cells eligible for blocking.
        open_cells: usize,
        /// Length in cells of the initial shortest path.
        initial_length: usize,
    },

    /// Emitted when the endpoints are not connected before any cell is blocked.
    NoPath {
        /// Start endpoint.
        from: Cell,
        /// Target endpoint.
        to: Cell,
    },

    /// Emitted after an open cell was blocked for good.
    CellBlocked {
        /// The blocked cell.
        cell: Cell,
        /// Whether the cell lay on the working path, forcing a repair.
        on_path: bool,
    },

    /// Emitted when blocking a cell would disconnect the endpoints, so it is kept instead.
    CellForced {
        /// The retained cell.
        cell: Cell,
    },

    /// Emitted when the working path was replaced after one of its cells was blocked.
    PathRepaired {
        /// The blocked cell that triggered the repair.
        cell: Cell,
        /// Length in cells of the new path.
        length: usize,
    },

    /// Emitted when a chisel run finishes.
    PathFinished {
        /// Length in cells of the final path.
        length: usize,
        /// Cells forced to stay open during the run (endpoints excluded).
        forced_cells: usize,
        /// Number of successful path repairs.
        repairs: usize,
    },

    /// Emitted when a carve run starts.
    CarveStarted {
        /// Grid dimensions.
        size: GridSize,
        /// Members of the starting region.
        members: usize,
        /// Number of required cells (minimal-path mode), zero otherwise.
        required: usize,
        /// Target member count (target-size mode).
        target: Option<usize>,
    },

    /// Emitted after a cell was removed from the region.
    CellCarved {
        /// The removed cell.
        cell: Cell,
        /// Members left after the removal.
        remaining: usize,
    },

    /// Emitted when a carve run finishes.
    CarveFinished {
        /// Members of the final region.
        members: usize,
    },

    /// Non-fatal warning about degenerate input.
    Warning {
        /// Context string (e.g. generator name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`ChiselEvent`], used for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChiselEventKind {
    PathStarted,
    NoPath,
    CellBlocked,
    CellForced,
    PathRepaired,
    PathFinished,
    CarveStarted,
    CellCarved,
    CarveFinished,
    Warning,
}

impl ChiselEvent {
    pub fn kind(&self) -> ChiselEventKind {
        match self {
            ChiselEvent::PathStarted { .. } => ChiselEventKind::PathStarted,
            ChiselEvent::NoPath { .. } => ChiselEventKind::NoPath,
            ChiselEvent::CellBlocked { .. } => ChiselEventKind::CellBlocked,
            ChiselEvent::CellForced { .. } => ChiselEventKind::CellForced,
            ChiselEvent::PathRepaired { .. } => ChiselEventKind::PathRepaired,
            ChiselEvent::PathFinished { .. } => ChiselEventKind::PathFinished,
            ChiselEvent::CarveStarted { .. } => ChiselEventKind::CarveStarted,
            ChiselEvent::CellCarved { .. } => ChiselEventKind::CellCarved,
            ChiselEvent::CarveFinished { .. } => ChiselEventKind::CarveFinished,
            ChiselEvent::Warning { .. } => ChiselEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ChiselEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ChiselEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: ChiselEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = ChiselEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ChiselEvent) {}

    #[inline]
    fn wants(&self, _kind: ChiselEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ChiselEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ChiselEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ChiselEvent),
{
    #[inline]
    fn send(&mut self, event: ChiselEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ChiselEvent>,
    only: Option<Vec<ChiselEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only events whose kind is listed in `kinds`.
    pub fn only(kinds: impl IntoIterator<Item = ChiselEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<ChiselEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ChiselEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: ChiselEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ChiselEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: ChiselEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks that want it.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: ChiselEvent) {
        let kind = event.kind();
        for sink in &mut self.sinks {
            if sink.wants(kind) {
                sink.send(event.clone());
            }
        }
    }

    fn wants(&self, kind: ChiselEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> ChiselEvent {
        ChiselEvent::Warning {
            context: context.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(ChiselEvent::CellForced {
            cell: Cell::new(1, 1),
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count(ChiselEventKind::Warning), 1);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn filtered_vec_sink_drops_other_kinds() {
        let mut sink = VecSink::only([ChiselEventKind::CellForced]);
        assert!(sink.wants(ChiselEventKind::CellForced));
        assert!(!sink.wants(ChiselEventKind::Warning));
        sink.send(warning("a"));
        sink.send(ChiselEvent::CellForced {
            cell: Cell::new(0, 2),
        });
        assert_eq!(
            sink.into_inner(),
            vec![ChiselEvent::CellForced {
                cell: Cell::new(0, 2)
            }]
        );
    }

    #[test]
    fn unit_sink_wants_nothing() {
        let sink = ();
        assert!(!sink.wants(ChiselEventKind::PathFinished));
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let all = VecSink::new();
        let forced_only = VecSink::only([ChiselEventKind::CellForced]);
        let mut multi = MultiSink::with_sinks(vec![all, forced_only]);
        assert!(multi.wants(ChiselEventKind::Warning));
        multi.send(warning("ctx"));
        let sinks = multi.into_inner();
        assert_eq!(sinks[0].len(), 1);
        assert_eq!(sinks[1].len(), 0);
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        sink.send_many([warning("a"), warning("b")]);
        assert_eq!(count, 3);
    }
}
