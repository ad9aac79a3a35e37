//! Stored form list page

use super::widgets::{format_created_at, render_scrollable_list, truncate_str};
use crate::app::App;
use crate::state::FormSummary;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the form list
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let browse = &app.state.browse;
    let block = Block::default()
        .title(" My Forms ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if browse.is_loading() && browse.forms().is_empty() {
        let loading = Paragraph::new("Loading forms...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if let Some(error) = browse.load_error() {
        let content = vec![
            Line::from(Span::styled(
                "Error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(error, Style::default().fg(Color::Red))),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("r", Style::default().fg(Color::Cyan)),
                Span::raw(" to try again"),
            ]),
        ];
        let paragraph = Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Summary and filter
            Constraint::Min(0),    // Forms
        ])
        .split(inner);

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(browse.summary_line(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Filter by Category: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                browse.filter().label(browse.categories()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ]);
    frame.render_widget(header, chunks[0]);

    let visible = browse.visible_forms();
    if visible.is_empty() {
        let message = if browse.forms().is_empty() {
            "No forms yet. Press c to create one."
        } else {
            "No forms in this category."
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let width = chunks[1].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = visible
        .iter()
        .map(|form| form_item(form, width))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    render_scrollable_list(frame, chunks[1], list, Some(browse.selected_index()));
}

/// Three-line card for one stored form
fn form_item(form: &FormSummary, width: usize) -> ListItem<'static> {
    let category = if form.category_name.is_empty() {
        String::new()
    } else {
        format!("  [{}]", form.category_name)
    };

    let description = if form.description.is_empty() {
        Span::styled("No description", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            truncate_str(&form.description, width),
            Style::default().fg(Color::Gray),
        )
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                form.title.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(category, Style::default().fg(Color::Magenta)),
        ]),
        Line::from(description),
        Line::from(Span::styled(
            format!(
                "{} question(s) · Created {}",
                form.question_count,
                format_created_at(form.created_at)
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}
