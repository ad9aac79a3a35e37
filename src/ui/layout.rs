//! Layout components (navigation header, status bar)

use crate::app::App;
use crate::platform::{COPY_JSON_SHORTCUT, SAVE_SHORTCUT};
use crate::state::{DraftField, Page};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Pages that have a tab of their own
const TAB_PAGES: [Page; 2] = [Page::List, Page::Create];

/// Split the screen into header, content, and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the navigation header
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    // The detail page has no tab of its own
    let selected = match app.state.page() {
        Page::List => 0,
        Page::Create => 1,
        Page::View(_) => usize::MAX,
    };

    let title = format!(" Form Builder | {} ", app.state.page().title());
    let tabs = Tabs::new(TAB_PAGES.iter().map(Page::title))
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

    frame.render_widget(tabs, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    // Page-specific hints
    let hints = get_page_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current page and focus
fn get_page_hints(app: &App) -> String {
    match app.state.page() {
        Page::List => "j/k:nav  Enter:view  c:create  d:delete  f/F:filter  0-9/a:category  \
                       r:refresh  q:quit"
            .to_string(),
        Page::View(_) => "j/k:scroll  r:reload  c:create  Esc:back".to_string(),
        Page::Create => {
            let field_hint = match app.state.draft.active_field() {
                DraftField::Category | DraftField::QuestionType => "←/→:change",
                DraftField::QuestionText => "Enter:add question",
                DraftField::OptionInput => "Enter:add option",
                DraftField::StagedOptions => "j/k:nav  d:remove option",
                DraftField::Questions => "j/k:nav  d:delete question",
                DraftField::Title | DraftField::Description => "type to edit",
            };
            format!(
                "Tab:next  {field_hint}  {SAVE_SHORTCUT}:save  {COPY_JSON_SHORTCUT}:copy JSON  Esc:cancel"
            )
        }
    }
}
