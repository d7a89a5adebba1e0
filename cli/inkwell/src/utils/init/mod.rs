mod client;
mod logger;
mod theme;

pub use client::*;
pub use logger::*;
pub use theme::*;
