//! Form builder page

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::{DraftField, FormDraft, FormField, Question, QuestionType};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the builder: form details and composer on the left, preview on the right
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_editor(frame, columns[0], app);
    draw_preview(frame, columns[1], &app.state.draft);
}

fn draw_editor(frame: &mut Frame, area: Rect, app: &App) {
    let draft = &app.state.draft;
    let active = draft.active_field();
    let with_options = draft.question_type().takes_options();

    let mut constraints = vec![
        Constraint::Length(3), // Title
        Constraint::Length(5), // Description
        Constraint::Length(3), // Category
        Constraint::Length(3), // Question text
        Constraint::Length(3), // Question type
    ];
    if with_options {
        constraints.push(Constraint::Length(3)); // Option input
        constraints.push(Constraint::Min(3)); // Staged options
    } else {
        constraints.push(Constraint::Min(0));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    draw_field(frame, chunks[0], &draft.title, active == DraftField::Title);
    draw_field(
        frame,
        chunks[1],
        &draft.description,
        active == DraftField::Description,
    );

    let category_name = app
        .state
        .browse
        .categories()
        .iter()
        .find(|c| c.id == draft.category_id())
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("Category {}", draft.category_id()));
    draw_selector(
        frame,
        chunks[2],
        "Category",
        &category_name,
        active == DraftField::Category,
    );

    draw_field(
        frame,
        chunks[3],
        &draft.question_text,
        active == DraftField::QuestionText,
    );
    draw_selector(
        frame,
        chunks[4],
        "Question Type",
        draft.question_type().label(),
        active == DraftField::QuestionType,
    );

    if with_options {
        draw_field(
            frame,
            chunks[5],
            &draft.option_input,
            active == DraftField::OptionInput,
        );
        draw_staged_options(frame, chunks[6], draft, active == DraftField::StagedOptions);
    }
}

/// Draw a single text input field
fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value = field.as_text();
    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };
    let text_style = if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let cursor = if is_active { "▌" } else { "" };

    let mut lines: Vec<Line> = if field.is_multiline {
        display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect()
    } else {
        vec![Line::from(Span::styled(display_value, text_style))]
    };
    if let Some(last) = lines.last_mut() {
        last.spans
            .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

/// Draw a value picked with left/right
fn draw_selector(frame: &mut Frame, area: Rect, label: &str, value: &str, is_active: bool) {
    let (border, arrows) = if is_active {
        (
            Style::default().fg(Color::Cyan),
            Style::default().fg(Color::Cyan),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };

    let line = Line::from(vec![
        Span::styled("◀ ", arrows),
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", arrows),
    ]);

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_staged_options(frame: &mut Frame, area: Rect, draft: &FormDraft, is_active: bool) {
    let border = if is_active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(" Options ({}) ", draft.staged_options().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    if draft.staged_options().is_empty() {
        let empty = Paragraph::new("No options yet. Type one above and press Enter.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let marker = option_marker(draft.question_type());
    let items: Vec<ListItem> = draft
        .staged_options()
        .iter()
        .enumerate()
        .map(|(i, option)| ListItem::new(format!("{}. {marker} {option}", i + 1)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
    let selected = is_active.then(|| draft.selected_option());
    render_scrollable_list(frame, area, list, selected);
}

fn draw_preview(frame: &mut Frame, area: Rect, draft: &FormDraft) {
    let is_active = draft.active_field() == DraftField::Questions;
    let border = if is_active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(
            " Form Preview ({} questions) ",
            draft.questions().len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    if draft.questions().is_empty() {
        let empty = Paragraph::new("No questions yet. Add one on the left!")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = draft
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| question_item(i, q))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");
    let selected = is_active.then(|| draft.selected_question());
    render_scrollable_list(frame, area, list, selected);
}

/// Numbered question with its answer widget underneath
fn question_item(index: usize, question: &Question) -> ListItem<'static> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{}. {}", index + 1, question.text),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({})", question.question_type().label()),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    match question.question_type() {
        QuestionType::Text => lines.push(Line::from(Span::styled(
            "   [ text answer ]",
            Style::default().fg(Color::DarkGray),
        ))),
        ty => {
            let marker = option_marker(ty);
            lines.extend(question.options().iter().map(|option| {
                Line::from(Span::styled(
                    format!("   {marker} {option}"),
                    Style::default().fg(Color::Gray),
                ))
            }));
        }
    }

    ListItem::new(lines)
}

fn option_marker(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::Checkbox => "☐",
        _ => "○",
    }
}
