// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scheduling port.
//!
//! Inertia and bounds correction run as chains of small deferred steps instead of blocking
//! loops. The controller hands each step to a [`Scheduler`]; the host runs it on a later tick of
//! its event loop by passing it back to
//! [`ZoomPanController::run_step`](crate::zoom_pan::ZoomPanController::run_step).

use alloc::collections::VecDeque;

use kurbo::Point;

/// Work deferred to a later event loop iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepKind {
    /// Apply one inertial pan step of this velocity.
    Decelerate {
        /// Horizontal delta for this step.
        vx: f64,
        /// Vertical delta for this step.
        vy: f64,
    },
    /// Pull overshooting content back by at most the pan correction velocity.
    CorrectPan {
        /// Steps already taken.
        iteration: usize,
    },
    /// Zoom content back up to its minimum scale.
    CorrectZoom {
        /// Steps already taken.
        iteration: usize,
        /// Zoom anchor, fixed for the whole chain.
        center: Point,
    },
}

/// A deferred step tagged with the gesture generation that scheduled it.
///
/// Steps from an older generation are dropped when run, so a new gesture cancels the chains of
/// the previous one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledStep {
    /// Gesture generation at scheduling time.
    pub generation: u64,
    /// What to do.
    pub kind: StepKind,
}

/// Queues deferred steps.
pub trait Scheduler {
    /// Runs `step` on the next event loop iteration.
    fn schedule(&mut self, step: ScheduledStep);
}

/// A FIFO queue the host drains itself. Tests drain it synchronously.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    queue: VecDeque<ScheduledStep>,
}

impl ManualScheduler {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the oldest pending step.
    pub fn pop(&mut self) -> Option<ScheduledStep> {
        self.queue.pop_front()
    }

    /// Number of pending steps.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops every pending step.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, step: ScheduledStep) {
        self.queue.push_back(step);
    }
}
