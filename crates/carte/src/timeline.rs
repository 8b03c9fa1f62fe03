//! Staggered reveal timing.
//!
//! Pure computation only: given a bucket and the timing constants, produce
//! when each item starts revealing and when the whole sequence settles.
//! Scheduling the actual timers is the driver's job (browser or virtual clock).

use serde::{Deserialize, Serialize};

use crate::category::ItemId;

pub const DEFAULT_STAGGER_MS: u64 = 30;
pub const DEFAULT_SETTLE_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTiming {
    /// Gap between the start times of successive items.
    pub stagger_ms: u64,
    /// Extra wait after the last item starts before the sequence is idle.
    pub settle_ms: u64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        RevealTiming {
            stagger_ms: DEFAULT_STAGGER_MS,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RevealStep {
    pub item: ItemId,
    /// Offset from the accepted request.
    pub start_offset_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RevealPlan {
    pub steps: Vec<RevealStep>,
    /// Offset from the accepted request at which the sequencer goes idle.
    pub settle_at_ms: u64,
}

/// Item `i` starts at `i * stagger`; the plan settles `settle` after the last
/// start. An empty bucket still waits the full settle margin.
pub fn reveal_plan(bucket: &[ItemId], timing: RevealTiming) -> RevealPlan {
    let steps: Vec<RevealStep> = bucket
        .iter()
        .enumerate()
        .map(|(position, &item)| RevealStep {
            item,
            start_offset_ms: (position as u64).saturating_mul(timing.stagger_ms),
        })
        .collect();
    let last_start = steps.last().map_or(0, |step| step.start_offset_ms);
    RevealPlan {
        steps,
        settle_at_ms: last_start.saturating_add(timing.settle_ms),
    }
}
