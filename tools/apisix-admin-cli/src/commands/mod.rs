mod context;
mod panel;
mod transfer;

pub use context::*;
pub use panel::*;
pub use transfer::*;
