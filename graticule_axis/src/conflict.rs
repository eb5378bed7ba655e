// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label overlap resolution for vertical axes.

use core::fmt::Debug;

use kurbo::{Rect, Vec2};

/// Moves label rectangles so neighbours stop overlapping.
pub trait LabelsConflictSolver: Debug {
    /// Adjusts `rects` in place. `rects` holds the first label of each tick, in tick order.
    ///
    /// Returns the number of passes that moved labels.
    fn solve_conflicts(&self, rects: &mut [Rect]) -> usize;
}

/// Pushes overlapping neighbours apart by half of the overlap height each, one up and one down.
///
/// This is a heuristic: resolving one pair can create a new overlap with the next label, so
/// passes repeat until one runs clean or `max_iterations` is reached, at which point residual
/// overlap is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveUpDown {
    max_iterations: usize,
}

impl Default for MoveUpDown {
    fn default() -> Self {
        Self { max_iterations: 20 }
    }
}

impl MoveUpDown {
    /// Creates a solver with the default cap of 20 passes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pass cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// The pass cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

/// Height of the overlap of `a` and `b`, or `None` if they only touch or are apart.
fn overlap_height(a: Rect, b: Rect) -> Option<f64> {
    let width = a.x1.min(b.x1) - a.x0.max(b.x0);
    let height = a.y1.min(b.y1) - a.y0.max(b.y0);
    (width > 0.0 && height > 0.0).then_some(height)
}

impl LabelsConflictSolver for MoveUpDown {
    fn solve_conflicts(&self, rects: &mut [Rect]) -> usize {
        let mut passes = 0;
        for _ in 0..self.max_iterations {
            let mut moved = false;
            for i in 1..rects.len() {
                let Some(height) = overlap_height(rects[i], rects[i - 1]) else {
                    continue;
                };
                moved = true;
                let shift = height / 2.0;
                // The label further up the screen moves up.
                let (up, down) = if rects[i].center().y <= rects[i - 1].center().y {
                    (i, i - 1)
                } else {
                    (i - 1, i)
                };
                rects[up] = rects[up] - Vec2::new(0.0, shift);
                rects[down] = rects[down] + Vec2::new(0.0, shift);
            }
            if !moved {
                return passes;
            }
            passes += 1;
        }
        tracing::warn!(
            max_iterations = self.max_iterations,
            "label conflicts remain after the pass cap"
        );
        passes
    }
}
