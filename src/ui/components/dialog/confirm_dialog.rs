//! Confirmation dialog for deleting a stored form

use super::base::{hint_spans, render_dialog, DialogConfig};
use crate::state::PendingDelete;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the delete prompt with Cancel / Delete choices
pub fn render_delete_dialog(frame: &mut Frame, pending: &PendingDelete) {
    let message = pending.message();

    // Cancel first, then Delete
    let choices = [(false, "Cancel", Color::White), (true, "Delete", Color::Red)];
    let buttons: Vec<Span> = choices
        .iter()
        .flat_map(|&(is_delete, label, color)| {
            let selected = pending.confirm_selected == is_delete;
            let style = if selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let prefix = if selected { "▸ " } else { "  " };
            [Span::styled(format!("{prefix}{label}"), style), Span::raw("   ")]
        })
        .collect();

    render_dialog(
        frame,
        DialogConfig {
            title: "Confirm Delete",
            accent: Color::Red,
            message: &message,
            body: vec![Line::from(buttons)],
            hint: Some(hint_spans(&[
                ("←→", "select"),
                ("Enter", "confirm"),
                ("y/n", "answer"),
                ("Esc", "cancel"),
            ])),
            max_width: 64,
        },
    );
}
