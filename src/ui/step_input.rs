//! Input widgets for a single wizard step

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use onboard::wizard::{FieldValue, ReviewEntry, Step, StepKind};

/// What a key press did to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Not handled; the screen may treat it as navigation
    Ignored,
    /// Handled without changing the answer
    Consumed,
    /// The answer changed and should be stored
    Changed,
    /// Review screen asked to edit the step at this index
    Edit(usize),
}

/// Editing state for the current step's answer
pub enum StepInput {
    /// Single-line text (text, url, email, tel, logo path)
    Text {
        value: String,
        /// Cursor position in chars
        cursor: usize,
        kind: StepKind,
    },
    /// Multi-line text using tui-textarea
    TextArea { textarea: Box<TextArea<'static>> },
    /// Pick one of `options` (select, radio)
    Choice {
        options: &'static [&'static str],
        list_state: ListState,
    },
    /// Pick any of `options`
    MultiSelect {
        options: &'static [&'static str],
        checked: Vec<bool>,
        list_state: ListState,
    },
    /// List of emails with an entry buffer
    EmailList {
        emails: Vec<String>,
        buffer: String,
    },
    /// Read-only summary with a cursor for jumping back
    Review {
        entries: Vec<ReviewEntry>,
        list_state: ListState,
    },
}

impl StepInput {
    /// Build the input for `step`, seeded with its stored answer
    pub fn from_step(step: &Step, value: Option<&FieldValue>, review: Vec<ReviewEntry>) -> Self {
        let text = value.map(FieldValue::as_text).unwrap_or_default();
        let list = value.map(FieldValue::as_list).unwrap_or_default();

        match step.kind {
            StepKind::TextArea => {
                let mut textarea = TextArea::default();
                textarea.insert_str(text);
                StepInput::TextArea {
                    textarea: Box::new(textarea),
                }
            }
            StepKind::Select | StepKind::Radio => {
                // Nothing highlighted until an answer exists
                let mut list_state = ListState::default();
                list_state.select(step.options.iter().position(|o| *o == text));
                StepInput::Choice {
                    options: step.options,
                    list_state,
                }
            }
            StepKind::MultiSelect => {
                let mut list_state = ListState::default();
                list_state.select(Some(0));
                StepInput::MultiSelect {
                    options: step.options,
                    checked: step
                        .options
                        .iter()
                        .map(|o| list.iter().any(|v| v == o))
                        .collect(),
                    list_state,
                }
            }
            StepKind::Composite => StepInput::EmailList {
                emails: list.to_vec(),
                buffer: String::new(),
            },
            StepKind::Review => {
                let mut list_state = ListState::default();
                if !review.is_empty() {
                    list_state.select(Some(0));
                }
                StepInput::Review {
                    entries: review,
                    list_state,
                }
            }
            StepKind::Text | StepKind::Url | StepKind::Email | StepKind::Tel | StepKind::Upload => {
                StepInput::Text {
                    cursor: text.chars().count(),
                    value: text.to_string(),
                    kind: step.kind,
                }
            }
        }
    }

    /// Answer to store, if this input produces one
    pub fn value(&self) -> Option<FieldValue> {
        match self {
            StepInput::Text { value, .. } => Some(FieldValue::Text(value.clone())),
            StepInput::TextArea { textarea } => {
                Some(FieldValue::Text(textarea.lines().join("\n")))
            }
            StepInput::Choice {
                options,
                list_state,
            } => list_state
                .selected()
                .and_then(|i| options.get(i))
                .map(|o| FieldValue::Text((*o).to_string())),
            StepInput::MultiSelect {
                options, checked, ..
            } => Some(FieldValue::List(
                options
                    .iter()
                    .zip(checked)
                    .filter(|(_, on)| **on)
                    .map(|(o, _)| (*o).to_string())
                    .collect(),
            )),
            StepInput::EmailList { emails, .. } => Some(FieldValue::List(emails.clone())),
            StepInput::Review { .. } => None,
        }
    }

    /// Move any half-typed email into the list. Returns true if it changed.
    pub fn commit_pending(&mut self) -> bool {
        if let StepInput::EmailList { emails, buffer } = self {
            let email = buffer.trim().to_string();
            buffer.clear();
            if !email.is_empty() {
                emails.push(email);
                return true;
            }
        }
        false
    }

    /// Whether Enter belongs to the input rather than navigation
    pub fn captures_enter(&self) -> bool {
        match self {
            StepInput::TextArea { .. } => true,
            StepInput::EmailList { buffer, .. } => !buffer.trim().is_empty(),
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        match self {
            StepInput::Text {
                value,
                cursor,
                kind,
            } => edit_line(value, cursor, key.code, |c| accepts_char(*kind, c)),
            StepInput::TextArea { textarea } => {
                if textarea.input(key) {
                    InputEvent::Changed
                } else {
                    InputEvent::Consumed
                }
            }
            StepInput::Choice {
                options,
                list_state,
            } => {
                if options.is_empty() {
                    return InputEvent::Ignored;
                }
                let last = options.len() - 1;
                let next = match (key.code, list_state.selected()) {
                    (KeyCode::Up | KeyCode::Char('k'), Some(i)) => i.saturating_sub(1),
                    (KeyCode::Down | KeyCode::Char('j'), Some(i)) => (i + 1).min(last),
                    (KeyCode::Up | KeyCode::Char('k') | KeyCode::Down | KeyCode::Char('j'), None)
                    | (KeyCode::Char(' '), None) => 0,
                    (KeyCode::Char(' '), Some(i)) => i,
                    _ => return InputEvent::Ignored,
                };
                list_state.select(Some(next));
                InputEvent::Changed
            }
            StepInput::MultiSelect {
                options,
                checked,
                list_state,
            } => {
                let selected = list_state.selected().unwrap_or(0);
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        list_state.select(Some(selected.saturating_sub(1)));
                        InputEvent::Consumed
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        let last = options.len().saturating_sub(1);
                        list_state.select(Some((selected + 1).min(last)));
                        InputEvent::Consumed
                    }
                    KeyCode::Char(' ') => {
                        if let Some(on) = checked.get_mut(selected) {
                            *on = !*on;
                            InputEvent::Changed
                        } else {
                            InputEvent::Consumed
                        }
                    }
                    _ => InputEvent::Ignored,
                }
            }
            StepInput::EmailList { emails, buffer } => match key.code {
                KeyCode::Enter => {
                    let email = buffer.trim().to_string();
                    buffer.clear();
                    if email.is_empty() {
                        InputEvent::Ignored
                    } else {
                        emails.push(email);
                        InputEvent::Changed
                    }
                }
                KeyCode::Backspace if buffer.is_empty() => {
                    if emails.pop().is_some() {
                        InputEvent::Changed
                    } else {
                        InputEvent::Consumed
                    }
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    InputEvent::Consumed
                }
                KeyCode::Char(c) if !c.is_whitespace() => {
                    buffer.push(c);
                    InputEvent::Consumed
                }
                _ => InputEvent::Ignored,
            },
            StepInput::Review {
                entries,
                list_state,
            } => {
                let selected = list_state.selected().unwrap_or(0);
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        list_state.select(Some(selected.saturating_sub(1)));
                        InputEvent::Consumed
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        let last = entries.len().saturating_sub(1);
                        list_state.select(Some((selected + 1).min(last)));
                        InputEvent::Consumed
                    }
                    KeyCode::Char('e') => entries
                        .get(selected)
                        .map_or(InputEvent::Consumed, |e| InputEvent::Edit(e.index)),
                    _ => InputEvent::Ignored,
                }
            }
        }
    }

    /// Key hints for the footer
    pub fn hints(&self) -> &'static str {
        match self {
            StepInput::Text { .. } => "Enter/Tab next · Shift+Tab back · Ctrl+C quit",
            StepInput::TextArea { .. } => "Tab next · Shift+Tab back · Ctrl+C quit",
            StepInput::Choice { .. } => "↑/↓ choose · Enter next · Shift+Tab back",
            StepInput::MultiSelect { .. } => {
                "↑/↓ move · Space toggle · Enter next · Shift+Tab back"
            }
            StepInput::EmailList { .. } => {
                "Enter add · Backspace remove last · Tab next · Shift+Tab back"
            }
            StepInput::Review { .. } => "↑/↓ move · e edit · Enter submit · Shift+Tab back",
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, placeholder: &str) {
        match self {
            StepInput::Text { value, cursor, .. } => {
                let content = if value.is_empty() {
                    Line::from(vec![
                        Span::raw("|"),
                        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
                    ])
                } else {
                    let mut text = value.clone();
                    text.insert(byte_index(value, *cursor), '|');
                    Line::from(text)
                };
                let para = Paragraph::new(content).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                );
                frame.render_widget(para, area);
            }
            StepInput::TextArea { textarea } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                );
                textarea.set_placeholder_text(placeholder.to_string());
                textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
                frame.render_widget(&**textarea, area);
            }
            StepInput::Choice {
                options,
                list_state,
            } => {
                let items: Vec<ListItem> = options.iter().map(|o| ListItem::new(*o)).collect();
                frame.render_stateful_widget(highlighted_list(items), area, list_state);
            }
            StepInput::MultiSelect {
                options,
                checked,
                list_state,
            } => {
                let items: Vec<ListItem> = options
                    .iter()
                    .zip(checked.iter())
                    .map(|(o, on)| {
                        let (mark, style) = if *on {
                            ("[x]", Style::default().fg(Color::Green))
                        } else {
                            ("[ ]", Style::default().fg(Color::Gray))
                        };
                        ListItem::new(Span::styled(format!("{mark} {o}"), style))
                    })
                    .collect();
                frame.render_stateful_widget(highlighted_list(items), area, list_state);
            }
            StepInput::EmailList { emails, buffer } => {
                let mut lines: Vec<Line> = emails
                    .iter()
                    .map(|e| {
                        Line::from(vec![
                            Span::styled("  • ", Style::default().fg(Color::Green)),
                            Span::raw(e.clone()),
                        ])
                    })
                    .collect();
                if emails.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "  No invitations yet",
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Add: ", Style::default().fg(Color::Cyan)),
                    Span::raw(format!("{buffer}|")),
                ]));
                frame.render_widget(Paragraph::new(lines), area);
            }
            StepInput::Review {
                entries,
                list_state,
            } => {
                let items: Vec<ListItem> = entries
                    .iter()
                    .map(|e| {
                        let value = if e.display_value.is_empty() {
                            Span::styled("(not provided)", Style::default().fg(Color::DarkGray))
                        } else {
                            Span::raw(e.display_value.replace('\n', " "))
                        };
                        ListItem::new(Line::from(vec![
                            Span::styled(
                                format!("{:<28}", e.title),
                                Style::default().add_modifier(Modifier::BOLD),
                            ),
                            value,
                        ]))
                    })
                    .collect();
                frame.render_stateful_widget(highlighted_list(items), area, list_state);
            }
        }
    }
}

fn highlighted_list(items: Vec<ListItem<'_>>) -> List<'_> {
    List::new(items)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(Color::Cyan),
        )
        .highlight_symbol("> ")
}

/// Characters a single-line input of `kind` accepts
fn accepts_char(kind: StepKind, c: char) -> bool {
    match kind {
        StepKind::Tel => c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'),
        StepKind::Email | StepKind::Url => !c.is_whitespace(),
        _ => true,
    }
}

/// Byte offset of the `cursor`th char
fn byte_index(value: &str, cursor: usize) -> usize {
    value
        .char_indices()
        .nth(cursor)
        .map_or(value.len(), |(i, _)| i)
}

fn edit_line(
    value: &mut String,
    cursor: &mut usize,
    key: KeyCode,
    accepts: impl Fn(char) -> bool,
) -> InputEvent {
    let len = value.chars().count();
    match key {
        KeyCode::Char(c) => {
            if !accepts(c) {
                return InputEvent::Consumed;
            }
            let at = byte_index(value, *cursor);
            value.insert(at, c);
            *cursor += 1;
            InputEvent::Changed
        }
        KeyCode::Backspace => {
            if *cursor == 0 {
                return InputEvent::Consumed;
            }
            *cursor -= 1;
            let at = byte_index(value, *cursor);
            value.remove(at);
            InputEvent::Changed
        }
        KeyCode::Delete => {
            if *cursor >= len {
                return InputEvent::Consumed;
            }
            let at = byte_index(value, *cursor);
            value.remove(at);
            InputEvent::Changed
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
            InputEvent::Consumed
        }
        KeyCode::Right => {
            *cursor = (*cursor + 1).min(len);
            InputEvent::Consumed
        }
        KeyCode::Home => {
            *cursor = 0;
            InputEvent::Consumed
        }
        KeyCode::End => {
            *cursor = len;
            InputEvent::Consumed
        }
        _ => InputEvent::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use onboard::wizard::catalog::{
        brand_onboarding_steps, COMPANY_NAME, CONTACT_PHONE, INDUSTRY, PREFERRED_NICHES,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn step(id: &str) -> Step {
        brand_onboarding_steps()
            .into_iter()
            .find(|s| s.id == id)
            .unwrap()
    }

    #[test]
    fn test_text_input_handles_chars() {
        let mut input = StepInput::from_step(&step(COMPANY_NAME), None, Vec::new());

        assert_eq!(input.handle_key(key(KeyCode::Char('h'))), InputEvent::Changed);
        assert_eq!(input.handle_key(key(KeyCode::Char('i'))), InputEvent::Changed);
        assert_eq!(input.value(), Some(FieldValue::Text("hi".to_string())));
    }

    #[test]
    fn test_text_input_edits_multibyte() {
        let stored = FieldValue::Text("Café".to_string());
        let mut input = StepInput::from_step(&step(COMPANY_NAME), Some(&stored), Vec::new());

        input.handle_key(key(KeyCode::Backspace));
        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), Some(FieldValue::Text("af".to_string())));
    }

    #[test]
    fn test_phone_rejects_letters() {
        let mut input = StepInput::from_step(&step(CONTACT_PHONE), None, Vec::new());
        assert_eq!(input.handle_key(key(KeyCode::Char('x'))), InputEvent::Consumed);
        input.handle_key(key(KeyCode::Char('+')));
        input.handle_key(key(KeyCode::Char('1')));
        assert_eq!(input.value(), Some(FieldValue::Text("+1".to_string())));
    }

    #[test]
    fn test_enter_is_navigation_for_text() {
        let input = StepInput::from_step(&step(COMPANY_NAME), None, Vec::new());
        assert!(!input.captures_enter());
    }

    #[test]
    fn test_choice_starts_unselected() {
        let industry = step(INDUSTRY);
        let mut input = StepInput::from_step(&industry, None, Vec::new());
        assert_eq!(input.value(), None);

        assert_eq!(input.handle_key(key(KeyCode::Down)), InputEvent::Changed);
        assert_eq!(
            input.value(),
            Some(FieldValue::Text(industry.options[0].to_string()))
        );
        input.handle_key(key(KeyCode::Down));
        assert_eq!(
            input.value(),
            Some(FieldValue::Text(industry.options[1].to_string()))
        );
    }

    #[test]
    fn test_multiselect_toggles() {
        let mut input = StepInput::from_step(&step(PREFERRED_NICHES), None, Vec::new());
        assert_eq!(input.value(), Some(FieldValue::List(Vec::new())));

        input.handle_key(key(KeyCode::Char(' ')));
        let Some(FieldValue::List(chosen)) = input.value() else {
            panic!("expected list");
        };
        assert_eq!(chosen.len(), 1);

        input.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(input.value(), Some(FieldValue::List(Vec::new())));
    }

    #[test]
    fn test_email_list_add_and_remove() {
        let team = Step::new("team", "Team", StepKind::Composite);
        let mut input = StepInput::from_step(&team, None, Vec::new());

        for c in "a@b.co".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        assert!(input.captures_enter());
        assert_eq!(input.handle_key(key(KeyCode::Enter)), InputEvent::Changed);
        assert_eq!(
            input.value(),
            Some(FieldValue::List(vec!["a@b.co".to_string()]))
        );

        // Empty buffer: Enter is navigation, Backspace drops the last email
        assert_eq!(input.handle_key(key(KeyCode::Enter)), InputEvent::Ignored);
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), InputEvent::Changed);
        assert_eq!(input.value(), Some(FieldValue::List(Vec::new())));
    }

    #[test]
    fn test_review_edit_targets_entry_index() {
        let review = Step::new("review", "Review", StepKind::Review);
        let entries = vec![
            ReviewEntry {
                index: 0,
                step_id: "a",
                title: "A",
                display_value: "x".to_string(),
            },
            ReviewEntry {
                index: 3,
                step_id: "b",
                title: "B",
                display_value: String::new(),
            },
        ];
        let mut input = StepInput::from_step(&review, None, entries);

        input.handle_key(key(KeyCode::Down));
        assert_eq!(input.handle_key(key(KeyCode::Char('e'))), InputEvent::Edit(3));
        assert_eq!(input.value(), None);
    }
}
