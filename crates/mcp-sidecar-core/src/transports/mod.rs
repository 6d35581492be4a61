pub mod sse;
pub mod stdio;

pub use sse::{SseState, run_sse_server};
pub use stdio::run_stdio_server;
