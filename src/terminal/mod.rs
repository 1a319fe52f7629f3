// ABOUTME: Local terminal windows that mirror remote sessions
// Windows are addressed only by title; no native handle ever leaves this module

pub mod apple;
pub mod window;

pub use apple::AppleTerminal;
pub use window::{TitleMatch, WindowError, WindowManager};
