//! Stored form detail page

use super::widgets::format_created_at;
use crate::app::App;
use crate::state::{FormDetails, QuestionType};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the detail page for the form being viewed
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let viewer = &app.state.viewer;
    let title = match viewer.form_id() {
        Some(id) => format!(" View Form #{id} "),
        None => " View Form ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let content = if viewer.is_loading() {
        vec![Line::from(Span::styled(
            "Loading form...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else if let Some(error) = viewer.error() {
        vec![
            Line::from(Span::styled(
                "Error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from("Press r to retry or Esc to go back."),
        ]
    } else if let Some(form) = viewer.form() {
        detail_lines(form)
    } else {
        vec![Line::from(Span::styled(
            "Form not found",
            Style::default().fg(Color::DarkGray),
        ))]
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(viewer.scroll_offset).unwrap_or(u16::MAX), 0));

    frame.render_widget(paragraph, area);
}

/// Number of unwrapped lines the detail page renders for `form`
pub fn detail_line_count(form: &FormDetails) -> usize {
    detail_lines(form).len()
}

fn detail_lines(form: &FormDetails) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled(
            form.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Category: ", label),
            Span::styled(form.category_name.clone(), Style::default().fg(Color::Magenta)),
        ]),
        Line::from(vec![
            Span::styled("Created:  ", label),
            Span::raw(format_created_at(form.created_at)),
        ]),
    ];

    if !form.description.is_empty() {
        lines.push(Line::from(""));
        lines.extend(
            form.description
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Gray)))),
        );
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Questions ({})", form.questions.len()),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));

    if form.questions.is_empty() {
        lines.push(Line::from(Span::styled(
            "No questions in this form.",
            label,
        )));
        return lines;
    }

    for (i, question) in form.questions.iter().enumerate() {
        // Unknown store types are shown verbatim
        let type_label = question
            .question_type
            .parse::<QuestionType>()
            .map(|t| t.label().to_string())
            .unwrap_or_else(|_| question.question_type.clone());

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{}. {}", i + 1, question.text),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled("   Type: ", label),
            Span::raw(type_label),
        ]));
        for option in &question.options {
            lines.push(Line::from(Span::styled(
                format!("   • {option}"),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    lines
}
