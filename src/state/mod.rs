//! Application state module

mod app_state;
mod browse;
mod forms;
mod models;
mod navigation;
mod viewer;

pub use app_state::*;
pub use browse::*;
pub use forms::*;
pub use models::*;
pub use navigation::*;
