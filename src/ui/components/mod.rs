//! Reusable UI components

mod dialog;

pub use dialog::{render_delete_dialog, render_error_dialog};
