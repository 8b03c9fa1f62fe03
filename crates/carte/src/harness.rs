//! Test harness for running the menu filter without a browser.
//!
//! [`Simulation`] wires a [`Sequencer`] to a [`VirtualClock`] the same way the
//! browser layer wires it to real timers: one timer per reveal step, an
//! animation frame after each shown item, and one timer at the settle point.
//! Every surface call is recorded with its virtual timestamp.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

use crate::category::{Category, ItemId, MenuItem};
use crate::clock::VirtualClock;
use crate::sequencer::{RequestOutcome, Sequencer};
use crate::surface::{ItemSurface, VisualState};
use crate::telemetry::{LogSink, TelemetrySink, TrackedEvent};
use crate::timeline::RevealTiming;

/// Gap between a shown item and its next animation frame (one 60Hz frame).
pub const FRAME_MS: u64 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "state", rename_all = "snake_case")]
pub enum SurfaceCall {
    Show,
    Hide,
    Visual(VisualState),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SurfaceOp {
    pub at_ms: u64,
    pub item: ItemId,
    #[serde(flatten)]
    pub call: SurfaceCall,
}

/// Current display state of one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemView {
    pub displayed: bool,
    pub visual: VisualState,
}

impl ItemView {
    pub fn is_visible(&self) -> bool {
        self.displayed && self.visual == VisualState::Visible
    }
}

#[derive(Default)]
struct SurfaceLog {
    ops: Vec<SurfaceOp>,
    views: BTreeMap<ItemId, ItemView>,
}

/// Surface that records every call. Clones share the same log, so a test can
/// keep a handle after moving one into the sequencer.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    now_ms: Rc<Cell<u64>>,
    log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp applied to subsequent calls.
    pub fn set_now(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.log.borrow().ops.clone()
    }

    pub fn view(&self, item: ItemId) -> Option<ItemView> {
        self.log.borrow().views.get(&item).copied()
    }

    /// Items that are displayed and fully transitioned in.
    pub fn visible_items(&self) -> Vec<ItemId> {
        self.log
            .borrow()
            .views
            .iter()
            .filter(|(_, view)| view.is_visible())
            .map(|(&item, _)| item)
            .collect()
    }

    fn record(&mut self, item: ItemId, call: SurfaceCall) {
        let at_ms = self.now_ms.get();
        let mut log = self.log.borrow_mut();
        log.ops.push(SurfaceOp { at_ms, item, call });
        let view = log.views.entry(item).or_insert(ItemView {
            displayed: false,
            visual: VisualState::Hidden,
        });
        match call {
            SurfaceCall::Show => view.displayed = true,
            SurfaceCall::Hide => view.displayed = false,
            SurfaceCall::Visual(state) => view.visual = state,
        }
    }
}

impl ItemSurface for RecordingSurface {
    fn show(&mut self, item: ItemId) {
        self.record(item, SurfaceCall::Show);
    }

    fn hide(&mut self, item: ItemId) {
        self.record(item, SurfaceCall::Hide);
    }

    fn set_visual_state(&mut self, item: ItemId, state: VisualState) {
        self.record(item, SurfaceCall::Visual(state));
    }
}

/// Sink that keeps every tracked event.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<TrackedEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.borrow().clone()
    }
}

impl TelemetrySink for RecordingSink {
    fn track(&self, event: &TrackedEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wake {
    Step,
    Frame,
    Settle,
}

/// Menu filter driven by virtual time.
pub struct Simulation {
    sequencer: Sequencer<RecordingSurface>,
    clock: VirtualClock<Wake>,
    surface: RecordingSurface,
    sink: RecordingSink,
}

impl Simulation {
    pub fn new(
        items: &[MenuItem],
        default_category: impl Into<Category>,
        timing: RevealTiming,
    ) -> Self {
        let surface = RecordingSurface::new();
        let sink = RecordingSink::new();
        let sequencer = Sequencer::new(
            items,
            default_category,
            timing,
            surface.clone(),
            Some(Box::new((sink.clone(), LogSink))),
        );
        Simulation {
            sequencer,
            clock: VirtualClock::new(),
            surface,
            sink,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Issue a category request at the current virtual time and schedule its
    /// timers when accepted.
    pub fn request(&mut self, category: impl Into<Category>) -> RequestOutcome {
        let now_ms = self.clock.now_ms();
        self.surface.set_now(now_ms);
        let outcome = self.sequencer.request_category(category, now_ms);
        if let RequestOutcome::Accepted(plan) = &outcome {
            // Offset-zero steps already ran inside the request.
            for step in &plan.steps {
                if step.start_offset_ms == 0 {
                    self.clock.schedule(FRAME_MS, Wake::Frame);
                } else {
                    self.clock.schedule(step.start_offset_ms, Wake::Step);
                }
            }
            self.clock.schedule(plan.settle_at_ms, Wake::Settle);
        }
        outcome
    }

    pub fn advance_by(&mut self, ms: u64) {
        let target_ms = self.clock.now_ms().saturating_add(ms);
        self.advance_to(target_ms);
    }

    pub fn advance_to(&mut self, target_ms: u64) {
        while let Some(fired) = self.clock.pop_due(target_ms) {
            self.surface.set_now(fired.at_ms);
            match fired.payload {
                Wake::Step => {
                    self.sequencer.advance(fired.at_ms);
                    self.clock.schedule(FRAME_MS, Wake::Frame);
                }
                Wake::Frame => self.sequencer.animation_frame(),
                Wake::Settle => self.sequencer.advance(fired.at_ms),
            }
        }
        self.clock.advance_to(target_ms);
    }

    /// Run until no timers are pending.
    pub fn run_until_idle(&mut self) {
        while let Some(wait) = self.clock.time_to_next_timer() {
            self.advance_by(wait);
        }
    }

    pub fn is_busy(&self) -> bool {
        self.sequencer.is_busy()
    }

    pub fn current_category(&self) -> &Category {
        self.sequencer.current_category()
    }

    pub fn sequencer(&self) -> &Sequencer<RecordingSurface> {
        &self.sequencer
    }

    pub fn visible_items(&self) -> Vec<ItemId> {
        self.surface.visible_items()
    }

    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.surface.ops()
    }

    pub fn events(&self) -> Vec<TrackedEvent> {
        self.sink.events()
    }
}
