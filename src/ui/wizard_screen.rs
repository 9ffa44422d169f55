//! Full-screen rendering of the onboarding wizard

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use onboard::wizard::{StepKind, WizardSession};

use super::step_input::StepInput;

/// Input widget for the session's current step
pub fn input_for(session: &WizardSession) -> Option<StepInput> {
    let step = session.current_step()?;
    let review = if step.kind == StepKind::Review {
        session.review_entries()
    } else {
        Vec::new()
    };
    Some(StepInput::from_step(step, session.form().get(step.id), review))
}

/// Draw the current step. `submitting` shows the in-flight notice.
pub fn render(frame: &mut Frame, session: &WizardSession, input: &mut StepInput, submitting: bool) {
    let area = centered_rect(80, 90, frame.area());

    let block = Block::default()
        .title(" Brand Onboarding ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(step) = session.current_step() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Step counter
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Title + hint
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Input
            Constraint::Length(2), // Errors
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let total = session.steps().len();
    let counter = Line::from(vec![
        Span::styled(
            format!("Step {} of {}", session.current_index() + 1, total),
            Style::default().fg(Color::DarkGray),
        ),
        if step.optional {
            Span::styled("  (optional)", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw("")
        },
    ]);
    frame.render_widget(Paragraph::new(counter), chunks[0]);

    let percent = session.progress_percent();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{percent:.0}%"));
    frame.render_widget(gauge, chunks[1]);

    let mut title = vec![Line::from(Span::styled(
        step.title,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(hint) = step.hint {
        title.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(title), chunks[3]);

    input.render(frame, input_area(input, chunks[5]), step.hint.unwrap_or(""));

    let mut errors = Vec::new();
    if let Some(error) = session.validation_error() {
        errors.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(error) = session.submission_error() {
        errors.push(Line::from(Span::styled(
            format!("Submission failed: {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    if submitting {
        errors.push(Line::from(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Yellow),
        )));
    }
    frame.render_widget(Paragraph::new(errors).wrap(Wrap { trim: true }), chunks[6]);

    let footer = Paragraph::new(Line::from(Span::styled(
        input.hints(),
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[7]);
}

/// Shown once the submission succeeds
pub fn render_complete(frame: &mut Frame) {
    let area = centered_rect(60, 30, frame.area());
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "You're all set!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your brand profile has been submitted."),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to exit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let para = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(para, area);
}

/// Single-line inputs get a fixed-height box; lists use the full area
fn input_area(input: &StepInput, area: Rect) -> Rect {
    let height = match input {
        StepInput::Text { .. } => 3,
        StepInput::TextArea { .. } => 8,
        _ => area.height,
    };
    Rect {
        height: height.min(area.height),
        ..area
    }
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard::persistence::FormPersistenceGuard;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(80, 90, outer);
        assert_eq!(inner.width, 80);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
    }

    #[test]
    fn test_renders_step_and_error() {
        let mut session = WizardSession::brand_onboarding(FormPersistenceGuard::in_memory(), None);
        session.handle_next();
        let mut input = input_for(&session).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render(f, &session, &mut input, false))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Step 1 of 16"));
        assert!(text.contains("What is your company called?"));
        assert!(text.contains("Company name is required"));
    }

    #[test]
    fn test_review_input_lists_answers() {
        let mut session = WizardSession::brand_onboarding(FormPersistenceGuard::in_memory(), None);
        session.set_field("company_name", "Acme");
        session.go_to_step_id("review").unwrap();

        let input = input_for(&session).unwrap();
        let StepInput::Review { entries, .. } = input else {
            panic!("expected review input");
        };
        assert_eq!(entries[0].display_value, "Acme");
    }
}
