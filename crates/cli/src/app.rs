//! # Interactive Session State
//!
//! This module defines the state and input handling for the interactive
//! session: a line-mode loop where each line is either a draft to generate
//! content for, or a slash command that moves between generated versions.

use contentgen::{
    GenerationRequestHandler, GenerationState, Invocation, Notifier, Outcome, RequestPayload,
    SelectError, SkipReason,
};

/// Prints alerts to stderr, where they interrupt the session output.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }
}

/// A single parsed line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Submit the text for generation.
    Generate(String),
    Next,
    Prev,
    Select(usize),
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parses a line. Anything that does not start with `/` is a draft.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Generate(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("next" | "n"), None) => Command::Next,
            (Some("prev" | "p"), None) => Command::Prev,
            (Some("show" | "s"), None) => Command::Show,
            (Some("help" | "h"), None) => Command::Help,
            (Some("quit" | "q" | "exit"), None) => Command::Quit,
            // Versions are shown 1-based.
            (Some("select"), Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Command::Select(n - 1),
                _ => Command::Unknown(trimmed.to_string()),
            },
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

pub const HELP_TEXT: &str = "Type a draft and press <Enter> to generate. \
Commands: /next, /prev, /select N, /show, /help, /quit";

/// The core state for the interactive session.
pub struct App {
    /// `true` while the session is running, `false` to exit.
    pub running: bool,
    /// A message to display in the status line.
    pub status: String,
    /// Set when the result area needs to be redrawn.
    pub needs_render: bool,
    /// Sent along with each request, when set.
    pub user_id: Option<String>,
    handler: GenerationRequestHandler,
}

impl App {
    pub fn new(handler: GenerationRequestHandler, user_id: Option<String>) -> Self {
        Self {
            running: true,
            status: HELP_TEXT.to_string(),
            needs_render: false,
            user_id,
            handler,
        }
    }

    /// The handler's current state.
    pub fn state(&self) -> GenerationState {
        self.handler.snapshot()
    }

    /// Sets the `running` flag to false to exit the main loop.
    pub fn quit(&mut self) {
        self.running = false;
        self.status = "Bye!".to_string();
    }

    /// Handles one line of input.
    pub async fn handle_line(&mut self, line: &str) {
        self.needs_render = false;
        match Command::parse(line) {
            Command::Generate(text) => self.submit(&text).await,
            Command::Next => {
                let moved = self.handler.next_version();
                self.on_selection(moved);
            }
            Command::Prev => {
                let moved = self.handler.previous_version();
                self.on_selection(moved);
            }
            Command::Select(index) => {
                let moved = self.handler.select_version(index);
                self.on_selection(moved);
            }
            Command::Show => {
                self.needs_render = true;
                self.status = if self.state().result.is_some() {
                    String::new()
                } else {
                    "Nothing generated yet.".to_string()
                };
            }
            Command::Help => self.status = HELP_TEXT.to_string(),
            Command::Quit => self.quit(),
            Command::Unknown(cmd) => self.status = format!("Unknown command '{cmd}'. {HELP_TEXT}"),
        }
    }

    /// Submits a draft for generation and updates the status line.
    pub async fn submit(&mut self, text: &str) {
        let mut payload = RequestPayload::new(text);
        if let Some(user_id) = &self.user_id {
            payload = payload.with_user_id(user_id.clone());
        }

        match self.handler.generate_payload(payload).await {
            Invocation::Skipped(SkipReason::EmptyInput) => {
                self.status = "Input is empty; nothing to generate.".to_string();
            }
            Invocation::Skipped(SkipReason::Busy) => {
                self.status = "A generation is already in progress.".to_string();
            }
            Invocation::Completed(Outcome::Success(result)) => {
                self.needs_render = true;
                self.status = format!("Generated {} version(s).", result.versions().len());
            }
            Invocation::Completed(Outcome::Failure(_)) => {
                self.status = "Generation failed. Edit your draft and try again.".to_string();
            }
        }
    }

    fn on_selection(&mut self, moved: Result<usize, SelectError>) {
        match moved {
            Ok(index) => {
                self.needs_render = true;
                self.status = format!(
                    "Showing version {} of {}.",
                    index + 1,
                    self.state().version_count()
                );
            }
            Err(SelectError::OutOfRange { index, len }) => {
                self.status =
                    format!("Version {} is out of range ({len} available).", index + 1);
            }
            Err(e) => self.status = e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentgen_test_utils::{MockBackend, MockReply, RecordingNotifier};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/next"), Command::Next);
        assert_eq!(Command::parse("  /p "), Command::Prev);
        assert_eq!(Command::parse("/select 2"), Command::Select(1));
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(
            Command::parse("/select 0"),
            Command::Unknown("/select 0".to_string())
        );
        assert_eq!(
            Command::parse("/dance"),
            Command::Unknown("/dance".to_string())
        );
    }

    fn app_with(replies: Vec<MockReply>) -> (App, MockBackend) {
        let backend = MockBackend::new(replies);
        let handler = GenerationRequestHandler::new(
            Box::new(backend.clone()),
            Arc::new(RecordingNotifier::new()),
        );
        (App::new(handler, Some("u-1".to_string())), backend)
    }

    #[tokio::test]
    async fn test_handle_line_generates_and_navigates() {
        let (mut app, backend) = app_with(vec![MockReply::Json(
            json!({ "versions": ["a", "b", "c"] }),
        )]);

        app.handle_line("rainy afternoon").await;
        assert!(app.needs_render);
        assert_eq!(app.status, "Generated 3 version(s).");
        assert_eq!(backend.get_calls()[0].user_id.as_deref(), Some("u-1"));

        app.handle_line("/select 3").await;
        assert_eq!(app.state().selected_version, 2);
        assert_eq!(app.status, "Showing version 3 of 3.");

        app.handle_line("/select 4").await;
        assert!(!app.needs_render);
        assert_eq!(app.status, "Version 4 is out of range (3 available).");
        assert_eq!(app.state().selected_version, 2);
    }

    #[tokio::test]
    async fn test_handle_line_failure_and_empty_input() {
        let (mut app, backend) = app_with(vec![MockReply::Status(502)]);

        app.handle_line("   ").await;
        assert_eq!(app.status, "Input is empty; nothing to generate.");
        assert_eq!(backend.call_count(), 0);

        app.handle_line("hello").await;
        assert!(app.status.starts_with("Generation failed"));
        assert!(app.state().result.is_none());

        app.handle_line("/next").await;
        assert_eq!(app.status, "No generation result to select from");

        app.handle_line("/quit").await;
        assert!(!app.running);
    }

    #[test]
    fn test_parse_draft_keeps_text_verbatim() {
        assert_eq!(
            Command::parse("  went hiking today "),
            Command::Generate("  went hiking today ".to_string())
        );
        assert_eq!(Command::parse(""), Command::Generate(String::new()));
    }
}
