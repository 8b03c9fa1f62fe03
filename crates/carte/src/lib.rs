//! Interaction core for the restaurant site.
//!
//! No browser dependencies live here. Everything that touches the page goes
//! through a capability trait ([`ItemSurface`], [`TelemetrySink`]) or comes
//! back as plain data for the browser layer to apply.
//!
//! # Module Structure
//!
//! - `sequencer`: category filter with staggered reveal (the only stateful core)
//! - `index`, `timeline`: category buckets and pure reveal timing
//! - `surface`, `telemetry`: capabilities the sequencer drives
//! - `nav`, `scroll`, `model`, `order`, `popup`, `gate`: peripheral page state
//! - `config`: timing constants and thresholds
//! - `clock`, `harness`: virtual time for tests and the CLI

pub mod category;
pub mod clock;
pub mod config;
pub mod gate;
pub mod harness;
pub mod index;
pub mod model;
pub mod nav;
pub mod order;
pub mod popup;
pub mod scroll;
pub mod sequencer;
pub mod surface;
pub mod telemetry;
pub mod timeline;

pub use category::{Category, ItemId, MenuItem};
pub use config::SiteConfig;
pub use index::CategoryIndex;
pub use sequencer::{FilterState, RequestOutcome, Sequencer};
pub use surface::{ItemSurface, VisualState};
pub use telemetry::{LogSink, TelemetrySink, TrackedEvent};
pub use timeline::{RevealPlan, RevealStep, RevealTiming, reveal_plan};
