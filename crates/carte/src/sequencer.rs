//! Category filter with a staggered reveal.
//!
//! # Lifecycle of a request
//!
//! 1. `request_category` checks the guards: while a sequence is in flight, or
//!    when the category is already current, the request is dropped. Nothing is
//!    queued, and a dropped request emits no event.
//! 2. On acceptance every item outside the target bucket is hidden at once,
//!    before any reveal starts.
//! 3. Target items are shown one by one at their planned offsets
//!    (`advance`). Each one switches to [`VisualState::Visible`] on the next
//!    animation frame (`animation_frame`), since an element has to be in the
//!    layout before its opacity/scale transition can run.
//! 4. At the settle offset the sequencer goes idle again.
//!
//! Time is passed in explicitly as milliseconds from any monotonic origin.
//! The sequencer never schedules anything itself; drivers call `advance` at
//! (or after) the offsets returned in the [`RevealPlan`].

use serde::Serialize;

use crate::category::{Category, ItemId, MenuItem};
use crate::index::CategoryIndex;
use crate::surface::{ItemSurface, VisualState};
use crate::telemetry::{TelemetrySink, TrackedEvent};
use crate::timeline::{RevealPlan, RevealTiming, reveal_plan};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterState {
    current_category: Category,
    busy: bool,
}

impl FilterState {
    pub fn current_category(&self) -> &Category {
        &self.current_category
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RequestOutcome {
    Accepted(RevealPlan),
    /// A reveal sequence was still in flight.
    DroppedBusy,
    DroppedSameCategory,
}

impl RequestOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RequestOutcome::Accepted(_))
    }

    pub fn plan(&self) -> Option<&RevealPlan> {
        match self {
            RequestOutcome::Accepted(plan) => Some(plan),
            _ => None,
        }
    }
}

/// The reveal sequence currently running.
#[derive(Debug)]
struct InFlight {
    /// Time spent on this sequence, summed from forward clock steps only.
    elapsed_ms: u64,
    last_seen_ms: u64,
    plan: RevealPlan,
    next_step: usize,
    awaiting_frame: Vec<ItemId>,
}

pub struct Sequencer<S: ItemSurface> {
    index: CategoryIndex,
    timing: RevealTiming,
    state: FilterState,
    in_flight: Option<InFlight>,
    surface: S,
    sink: Option<Box<dyn TelemetrySink>>,
}

impl<S: ItemSurface> Sequencer<S> {
    /// Index `items` and apply `default_category` instantly, without stagger.
    ///
    /// An empty menu or a default with no items is not an error: the page
    /// then simply starts with nothing visible.
    pub fn new(
        items: &[MenuItem],
        default_category: impl Into<Category>,
        timing: RevealTiming,
        surface: S,
        sink: Option<Box<dyn TelemetrySink>>,
    ) -> Self {
        let default_category = default_category.into();
        let index = CategoryIndex::build(items);
        if !index.contains(&default_category) {
            log::debug!(
                "menu filter: default category '{}' has no items",
                default_category
            );
        }
        let mut sequencer = Sequencer {
            index,
            timing,
            state: FilterState {
                current_category: default_category,
                busy: false,
            },
            in_flight: None,
            surface,
            sink,
        };
        sequencer.apply_instantly();
        sequencer
    }

    fn apply_instantly(&mut self) {
        for (category, bucket) in self.index.iter() {
            let visible = *category == self.state.current_category;
            for &item in bucket {
                if visible {
                    self.surface.show(item);
                    self.surface.set_visual_state(item, VisualState::Visible);
                } else {
                    self.surface.hide(item);
                    self.surface.set_visual_state(item, VisualState::Hidden);
                }
            }
        }
    }

    /// Handle one category selection gesture at time `now_ms`.
    pub fn request_category(
        &mut self,
        category: impl Into<Category>,
        now_ms: u64,
    ) -> RequestOutcome {
        let category = category.into();
        self.advance(now_ms);

        if self.state.busy {
            log::debug!("menu filter: dropped '{}', sequence in flight", category);
            return RequestOutcome::DroppedBusy;
        }
        if category == self.state.current_category {
            log::debug!("menu filter: '{}' already active", category);
            return RequestOutcome::DroppedSameCategory;
        }

        self.state.busy = true;
        self.state.current_category = category.clone();

        for (bucket_category, bucket) in self.index.iter() {
            if *bucket_category == category {
                continue;
            }
            for &item in bucket {
                self.surface.hide(item);
                self.surface.set_visual_state(item, VisualState::Hidden);
            }
        }

        let plan = reveal_plan(self.index.bucket(&category), self.timing);
        log::debug!(
            "menu filter: revealing {} item(s) of '{}', settles at +{}ms",
            plan.steps.len(),
            category,
            plan.settle_at_ms
        );

        if let Some(sink) = &self.sink {
            sink.track(&TrackedEvent::menu_filter(&category));
        }

        self.in_flight = Some(InFlight {
            elapsed_ms: 0,
            last_seen_ms: now_ms,
            plan: plan.clone(),
            next_step: 0,
            awaiting_frame: Vec::new(),
        });
        // The first item starts at offset zero.
        self.advance(now_ms);

        RequestOutcome::Accepted(plan)
    }

    /// Run every reveal step that is due by `now_ms` and settle the sequence
    /// once its settle offset has passed. Calling it early or repeatedly is
    /// harmless. A clock that steps backwards costs no progress and does not
    /// push the settle point out.
    pub fn advance(&mut self, now_ms: u64) {
        let Some(flight) = self.in_flight.as_mut() else {
            return;
        };
        flight.elapsed_ms = flight
            .elapsed_ms
            .saturating_add(now_ms.saturating_sub(flight.last_seen_ms));
        flight.last_seen_ms = now_ms;
        let elapsed = flight.elapsed_ms;

        while let Some(step) = flight.plan.steps.get(flight.next_step) {
            if step.start_offset_ms > elapsed {
                break;
            }
            self.surface.show(step.item);
            flight.awaiting_frame.push(step.item);
            flight.next_step += 1;
        }

        if elapsed >= flight.plan.settle_at_ms {
            // Settling never leaves items half shown.
            for item in flight.awaiting_frame.drain(..) {
                self.surface.set_visual_state(item, VisualState::Visible);
            }
            self.in_flight = None;
            self.state.busy = false;
            log::debug!("menu filter: '{}' settled", self.state.current_category);
        }
    }

    /// Second phase of a reveal: items shown since the last frame become visible.
    pub fn animation_frame(&mut self) {
        if let Some(flight) = self.in_flight.as_mut() {
            for item in flight.awaiting_frame.drain(..) {
                self.surface.set_visual_state(item, VisualState::Visible);
            }
        }
    }

    /// Absolute time of the next pending step or of the settle point, on the
    /// clock last passed to `advance` or `request_category`.
    pub fn next_deadline(&self) -> Option<u64> {
        let flight = self.in_flight.as_ref()?;
        let offset = flight
            .plan
            .steps
            .get(flight.next_step)
            .map_or(flight.plan.settle_at_ms, |step| step.start_offset_ms);
        let remaining = offset.saturating_sub(flight.elapsed_ms);
        Some(flight.last_seen_ms.saturating_add(remaining))
    }

    /// Items of the current category that have started their reveal.
    /// Once settled this is the whole bucket.
    pub fn revealed_items(&self) -> &[ItemId] {
        let bucket = self.index.bucket(&self.state.current_category);
        match &self.in_flight {
            Some(flight) => &bucket[..flight.next_step],
            None => bucket,
        }
    }

    pub fn current_category(&self) -> &Category {
        &self.state.current_category
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
