pub mod config;
pub mod models;
pub mod output;
pub mod scrapers;
pub mod text;
