pub mod presentation;
pub mod session;

pub use presentation::{GaugeTone, Verdict, DISPLAY_ORDER, RADAR_FEATURES};
pub use session::SessionState;
