pub use notation_core;

pub mod attacks;
mod box_in;
pub mod catalog;
pub mod config;
pub mod disambiguation;
pub mod enumerate;
pub mod error;
pub mod output;
pub mod overrides;
pub mod stats;
pub mod synthesis;
