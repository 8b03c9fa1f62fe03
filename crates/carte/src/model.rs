//! 3D model viewer loading indicator.
//!
//! Until the viewer reports real progress the bar creeps forward on a timer
//! so the overlay never looks stuck; simulated progress stops short of 100%.

use crate::config::ModelConfig;

pub const LOAD_ERROR_ICON: &str = "⚠️";
pub const LOAD_ERROR_TITLE: &str = "خطأ في تحميل النموذج";
pub const LOAD_ERROR_MESSAGE: &str = "يرجى تحديث الصفحة والمحاولة مرة أخرى";
pub const RELOAD_LABEL: &str = "تحديث الصفحة";

/// Animation played on the viewer once the overlay goes away.
pub const LOADED_ANIMATION: &str = "modelLoaded 0.8s ease-out";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelPhase {
    Loading,
    Loaded,
    Failed,
}

pub struct ModelLoader {
    config: ModelConfig,
    progress: f64,
    phase: ModelPhase,
    eager_requested: bool,
}

impl ModelLoader {
    pub fn new(config: ModelConfig) -> Self {
        ModelLoader {
            config,
            progress: 0.0,
            phase: ModelPhase::Loading,
            eager_requested: false,
        }
    }

    pub fn phase(&self) -> ModelPhase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Simulated timer tick; `jitter` is a random sample in `[0, 1)`.
    /// Returns the new progress, or `None` once loading has finished.
    pub fn simulate_tick(&mut self, jitter: f64) -> Option<f64> {
        if self.phase != ModelPhase::Loading {
            return None;
        }
        if self.progress < self.config.simulated_cap {
            let step = jitter.clamp(0.0, 1.0) * self.config.max_step;
            self.progress = (self.progress + step).min(self.config.simulated_cap);
        }
        Some(self.progress)
    }

    /// Real progress event from the viewer, `total_progress` in `[0, 1]`.
    pub fn report_progress(&mut self, total_progress: f64) -> f64 {
        if self.phase == ModelPhase::Loading {
            self.progress = (total_progress * 100.0).clamp(0.0, 100.0);
        }
        self.progress
    }

    pub fn finish(&mut self) {
        self.phase = ModelPhase::Loaded;
        self.progress = 100.0;
    }

    pub fn fail(&mut self) {
        self.phase = ModelPhase::Failed;
    }

    /// First intersection with the viewport switches the viewer to eager
    /// loading. Returns `true` only the first time.
    pub fn request_eager(&mut self) -> bool {
        !std::mem::replace(&mut self.eager_requested, true)
    }

    /// Progress bar width, e.g. `"42.5%"`.
    pub fn bar_width(&self) -> String {
        format!("{}%", self.progress)
    }

    /// Rounded label, e.g. `"43%"`.
    pub fn label(&self) -> String {
        format!("{}%", self.progress.round() as u32)
    }
}
