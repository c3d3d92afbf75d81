pub mod browser;
pub mod collector;
pub mod extractor;
pub mod navigator;

pub use browser::Session;
