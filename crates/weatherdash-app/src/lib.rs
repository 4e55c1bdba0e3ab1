//! Weatherdash application: search orchestration and terminal rendering.

pub mod app;
pub mod cli;
pub mod dashboard;
pub mod render;

pub use app::run;
pub use cli::{Action, Cli};
pub use dashboard::Dashboard;
pub use render::{RenderOptions, Theme};
