//! Reusable UI widget helpers

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    widgets::{List, ListState},
    Frame,
};

/// Render a scrollable list that automatically keeps the selected item visible.
///
/// Pass `None` to render without a highlighted row.
///
/// # Example
/// ```ignore
/// let list = List::new(items).block(block);
/// render_scrollable_list(frame, area, list, Some(app.state.browse.selected_index()));
/// ```
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected: Option<usize>) {
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Creation date as shown in the list and detail pages
pub fn format_created_at(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
