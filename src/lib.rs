pub mod aggregate;
pub mod cli;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod projects;
pub mod scale;
pub mod stats;
pub mod theme;
pub mod tui;
