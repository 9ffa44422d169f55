use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use uuid::Uuid;

use onboard::api::HttpSubmissionClient;
use onboard::config::Config;
use onboard::persistence_guard;
use onboard::wizard::{NextOutcome, StepKind, WizardSession};

use crate::ui::terminal_guard::WizardTerminal;
use crate::ui::{install_panic_hook, wizard_screen, InputEvent, StepInput, TerminalGuard};

pub struct App {
    config: Config,
    session: WizardSession,
    /// Input widget for the current step; rebuilt whenever the step changes
    input: Option<StepInput>,
    client: HttpSubmissionClient,
    /// Correlates log lines from one wizard run
    session_id: Uuid,
    submitting: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, no_persist: bool) -> Result<Self> {
        let session =
            WizardSession::brand_onboarding(persistence_guard(&config, no_persist), config.identity());
        let client = HttpSubmissionClient::new(&config.submission)?;
        let input = wizard_screen::input_for(&session);
        let session_id = Uuid::new_v4();

        tracing::info!(
            session_id = %session_id,
            endpoint = client.endpoint(),
            steps = session.steps().len(),
            "Onboarding wizard started"
        );

        Ok(Self {
            config,
            session,
            input,
            client,
            session_id,
            submitting: false,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let (_guard, mut terminal) = TerminalGuard::enter()?;

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);

        while !self.should_quit {
            self.draw(&mut terminal)?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, &mut terminal).await?;
                    }
                }
            }
        }

        tracing::info!(
            session_id = %self.session_id,
            completed = self.session.is_completed(),
            step = self.session.current_index(),
            "Onboarding wizard closed"
        );
        Ok(())
    }

    fn draw(&mut self, terminal: &mut WizardTerminal) -> Result<()> {
        terminal.draw(|f| {
            if self.session.is_completed() {
                wizard_screen::render_complete(f);
            } else if let Some(input) = self.input.as_mut() {
                wizard_screen::render(f, &self.session, input, self.submitting);
            }
        })?;
        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent, terminal: &mut WizardTerminal) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
            self.should_quit = true;
            return Ok(());
        }

        if self.session.is_completed() {
            self.should_quit = true;
            return Ok(());
        }

        let Some(input) = self.input.as_mut() else {
            self.should_quit = true;
            return Ok(());
        };

        match key.code {
            KeyCode::BackTab | KeyCode::Esc => {
                self.go_back();
                return Ok(());
            }
            KeyCode::Tab => return self.advance(terminal).await,
            KeyCode::Enter if !input.captures_enter() => return self.advance(terminal).await,
            _ => {}
        }

        match input.handle_key(key) {
            InputEvent::Changed => self.store_input(),
            InputEvent::Edit(index) => {
                if self.session.go_to_step(index).is_ok() {
                    self.sync_input();
                }
            }
            InputEvent::Ignored | InputEvent::Consumed => {}
        }
        Ok(())
    }

    /// Copy the widget's answer into the session
    fn store_input(&mut self) {
        let Some(step_id) = self.session.current_step().map(|s| s.id) else {
            return;
        };
        if let Some(value) = self.input.as_ref().and_then(StepInput::value) {
            self.session.set_field(step_id, value);
        }
    }

    fn sync_input(&mut self) {
        self.input = wizard_screen::input_for(&self.session);
    }

    fn go_back(&mut self) {
        if self.session.handle_prev() {
            self.sync_input();
        }
    }

    async fn advance(&mut self, terminal: &mut WizardTerminal) -> Result<()> {
        if self.input.as_mut().is_some_and(StepInput::commit_pending) {
            self.store_input();
        }

        self.normalize_logo();

        match self.session.handle_next() {
            NextOutcome::Advanced(_) => self.sync_input(),
            NextOutcome::Blocked(_) => {}
            NextOutcome::ReadyToSubmit => self.submit(terminal).await?,
        }
        Ok(())
    }

    /// Store the trimmed logo path before the step is checked
    fn normalize_logo(&mut self) {
        let Some(step) = self.session.current_step() else {
            return;
        };
        if step.kind != StepKind::Upload {
            return;
        }
        let step_id = step.id;
        let raw = self.session.form().text(step_id);
        let trimmed = raw.trim();
        if trimmed != raw {
            let trimmed = trimmed.to_string();
            tracing::debug!(path = %trimmed, "Logo path trimmed");
            self.session.set_field(step_id, trimmed);
            self.sync_input();
        }
    }

    async fn submit(&mut self, terminal: &mut WizardTerminal) -> Result<()> {
        if self.submitting {
            return Ok(());
        }

        // Every visited step must still pass; answers may have changed on review
        if let Some(audit) = self.session.first_incomplete() {
            if self.session.go_to_step(audit.index).is_ok() {
                self.sync_input();
            }
            if let Some(error) = audit.outcome.error {
                self.session.set_validation_error(error);
            }
            return Ok(());
        }

        self.submitting = true;
        self.draw(terminal)?;
        let result = self.session.submit(&self.client).await;
        self.submitting = false;

        if result.is_ok() {
            tracing::info!(session_id = %self.session_id, "Brand onboarding submitted");
        }
        Ok(())
    }
}
