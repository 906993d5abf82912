// Photo display: handle registry, per-mount display state, and the handle endpoint.

pub mod display;
pub mod handlers;
pub mod handles;

pub use display::PhotoDisplay;
pub use handles::DisplayHandleRegistry;
