//! Event types and sinks for observing sampling and field runs.
//!
//! This module defines [`SamplingEvent`] and a set of sinks to emit, collect, or forward
//! events while executing [`crate::simulation::Simulation::run_with_events`] or
//! [`crate::field::DistanceField::evaluate_with_events`].
use glam::Vec2;

use crate::config::SamplerConfig;
use crate::sampling::poisson_disk::SamplingOutcome;

/// Describes events emitted by the sampler and the distance field.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum SamplingEvent {
    /// Emitted after the origin was validated, before the first grid write.
    RunStarted {
        /// The configuration used.
        config: SamplerConfig,
        /// Seed position of the run.
        origin: Vec2,
    },

    /// Emitted whenever a sample is accepted, including the origin.
    SampleAccepted {
        /// Insertion index of the sample.
        index: usize,
        /// Accepted position.
        position: Vec2,
        /// Index of the frontier sample it was grown from; `None` for the origin.
        source: Option<usize>,
    },

    /// Emitted when the sampler reaches a terminal state.
    RunFinished {
        /// Summary of the run.
        outcome: SamplingOutcome,
    },

    /// Emitted after a full field raster pass.
    FieldEvaluated {
        /// Raster width in query locations.
        width: usize,
        /// Raster height in query locations.
        height: usize,
        /// Number of locations with no sample inside their search window.
        unresolved: usize,
    },
}

/// Discriminant of [`SamplingEvent`] used to filter what a sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplingEventKind {
    RunStarted,
    SampleAccepted,
    RunFinished,
    FieldEvaluated,
}

impl SamplingEvent {
    pub fn kind(&self) -> SamplingEventKind {
        match self {
            SamplingEvent::RunStarted { .. } => SamplingEventKind::RunStarted,
            SamplingEvent::SampleAccepted { .. } => SamplingEventKind::SampleAccepted,
            SamplingEvent::RunFinished { .. } => SamplingEventKind::RunFinished,
            SamplingEvent::FieldEvaluated { .. } => SamplingEventKind::FieldEvaluated,
        }
    }
}

/// A generic event sink that accepts [`SamplingEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: SamplingEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: SamplingEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: SamplingEvent) {}

    #[inline]
    fn wants(&self, _kind: SamplingEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(SamplingEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(SamplingEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(SamplingEvent),
{
    #[inline]
    fn send(&mut self, event: SamplingEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<SamplingEvent>,
    only: Option<Vec<SamplingEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only events whose kind is listed.
    pub fn only(kinds: impl IntoIterator<Item = SamplingEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<SamplingEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[SamplingEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: SamplingEvent) {
        self.events.push(event);
    }

    fn wants(&self, kind: SamplingEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}
