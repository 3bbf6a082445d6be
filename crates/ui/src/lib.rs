pub mod charts;
pub mod theme;

pub use theme::{Theme, ThemeMode, ThemeTokens};
