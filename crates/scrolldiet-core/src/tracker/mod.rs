mod clock;

pub use clock::{now_ms, TrackerClock, TrackerState};
