//! UI module for rendering the TUI

mod builder;
mod components;
mod layout;
mod list;
mod viewer;
mod widgets;

use crate::app::App;
use crate::state::Page;
use components::{render_delete_dialog, render_error_dialog};
use ratatui::Frame;

pub use viewer::detail_line_count;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    // Draw main content based on current page
    match app.state.page() {
        Page::List => list::draw(frame, main_area, app),
        Page::Create => builder::draw(frame, main_area, app),
        Page::View(_) => viewer::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Modal overlays; errors sit on top of everything
    if let Some(pending) = app.state.browse.pending_delete() {
        render_delete_dialog(frame, pending);
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.error_count());
    }
}
