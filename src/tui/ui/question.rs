//! Question screen for a running round.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::tui::app::ClientApp;

/// Render the question screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let Some(question) = &app.question else {
        let waiting = Paragraph::new("Waiting for question...")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(waiting, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5), // Question text
        Constraint::Length(2), // Verdict
        Constraint::Min(3),    // Options
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_question_text(frame, chunks[0], &question.question);
    render_verdict(frame, chunks[1], app.feedback.as_ref().map(|f| f.correct));
    render_options(
        frame,
        chunks[2],
        &question.options,
        app.selected_option,
        app.feedback.as_ref().map(|f| f.correct),
    );
    render_controls(frame, chunks[3], question.options.len());
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_verdict(frame: &mut Frame, area: Rect, verdict: Option<bool>) {
    let line = match verdict {
        Some(true) => Span::styled("Correct!", Style::default().fg(Color::Green).bold()),
        Some(false) => Span::styled("Wrong!", Style::default().fg(Color::Red).bold()),
        None => Span::raw(""),
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Options side by side. While a verdict is shown they are all tinted with it.
fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[i64],
    selected: usize,
    verdict: Option<bool>,
) {
    if options.is_empty() {
        return;
    }

    let columns = Layout::horizontal(vec![Constraint::Fill(1); options.len()]).split(area);

    for (i, option) in options.iter().enumerate() {
        let is_selected = i == selected;
        let style = match verdict {
            Some(true) => Style::default().fg(Color::Green),
            Some(false) => Style::default().fg(Color::Red),
            None if is_selected => Style::default().fg(Color::Yellow).bold(),
            None => Style::default().fg(Color::White),
        };
        let border = if is_selected && verdict.is_none() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let widget = Paragraph::new(option.to_string())
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(format!(" {} ", i + 1))
                    .title_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(widget, columns[i]);
    }
}

/// Number keys that answer directly: one per option, at most 1 through 9.
fn answer_keys(count: usize) -> String {
    match count.min(9) {
        0 | 1 => "1".to_string(),
        n => format!("1-{n}"),
    }
}

fn render_controls(frame: &mut Frame, area: Rect, option_count: usize) {
    let hint = format!(
        "←/→ to select  ·  Enter or {} to answer  ·  q quit",
        answer_keys(option_count)
    );
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_keys_follow_option_count() {
        assert_eq!(answer_keys(1), "1");
        assert_eq!(answer_keys(2), "1-2");
        assert_eq!(answer_keys(4), "1-4");
        assert_eq!(answer_keys(6), "1-6");
        assert_eq!(answer_keys(12), "1-9");
    }
}
