//! Race orchestration: controller, presentation clock and their shared view.

mod clock;
mod controller;
mod decision;
mod report;
mod settings;
mod snapshot;
mod status;

pub use clock::{ClockStop, LogRenderer, PresentationClock, Renderer};
pub use controller::RaceController;
pub use report::{MoveRecord, RaceReport};
pub use settings::RaceSettings;
pub use snapshot::RaceSnapshot;
pub use status::RaceStatus;
