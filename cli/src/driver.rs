//! Terminal shell around the session controller.
//!
//! DESIGN
//! ======
//! The driver executes controller effects one at a time: a network effect is
//! awaited and its completion is queued as the next event, so the terminal
//! renders strictly in submission order. New transcript messages are printed
//! after every handled event.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use std::collections::VecDeque;
use std::io::Write;
use std::path::{Path, PathBuf};

use session::{Controller, Effect, Event, HistoryView, MemoryStore, MessageId};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::backend::HttpBackend;
use crate::command::{HELP_TEXT, Input, parse};
use crate::error::CliError;
use crate::render;

/// Whether the input loop should keep reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Driver<W> {
    controller: Controller<MemoryStore>,
    backend: HttpBackend,
    download_dir: PathBuf,
    out: W,
    last_printed: Option<MessageId>,
}

impl<W: Write> Driver<W> {
    pub fn new(backend: HttpBackend, download_dir: PathBuf, out: W) -> Self {
        Self {
            controller: Controller::new(MemoryStore::new()),
            backend,
            download_dir,
            out,
            last_printed: None,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &Controller<MemoryStore> {
        &self.controller
    }

    /// Print the welcome transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn start(&mut self) -> Result<(), CliError> {
        self.flush_transcript()
    }

    /// Read and handle lines from `input` until `/quit` or end of input.
    ///
    /// A line that is not valid UTF-8 is reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written or `input` fails.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<(), CliError> {
        let mut lines = input.lines();
        loop {
            self.prompt()?;
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                    tracing::warn!(error = %err, "skipped unreadable input line");
                    writeln!(self.out, "Could not read that line ({err}); please try again.")?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if self.handle_input(parse(&line)).await? == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn prompt(&mut self) -> Result<(), CliError> {
        let label = if self.controller.session().waiting_for_url() { "url> " } else { "ask> " };
        write!(self.out, "{label}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Act on one parsed input line.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub async fn handle_input(&mut self, input: Input) -> Result<Flow, CliError> {
        match input {
            Input::Message(text) => self.dispatch(Event::Submit(text)).await?,
            Input::History => self.dispatch(Event::OpenHistory).await?,
            Input::Open(number) => self.open_history_entry(number).await?,
            Input::NewChat => self.dispatch(Event::NewChat).await?,
            Input::Content => self.dispatch(Event::ShowContent).await?,
            Input::Download(dir) => {
                if let Some(dir) = dir {
                    self.download_dir = dir;
                }
                self.dispatch(Event::DownloadContent).await?;
            }
            Input::Help => writeln!(self.out, "{HELP_TEXT}")?,
            Input::Invalid(hint) => writeln!(self.out, "{hint}")?,
            Input::Quit => {
                writeln!(self.out, "Chatbot: Goodbye!")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Handle `event` and everything it triggers, completions included.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub async fn dispatch(&mut self, event: Event) -> Result<(), CliError> {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let shows_history = matches!(event, Event::HistoryFinished { .. });
            let shows_content = matches!(event, Event::ContentFinished { .. });

            let effects = self.controller.handle(event);
            self.flush_transcript()?;

            if shows_history {
                self.print_history()?;
            }
            if shows_content && self.controller.content().open {
                let block = render::content_block(&self.controller.content().content);
                writeln!(self.out, "{block}")?;
                queue.push_back(Event::CloseContent);
            }

            for effect in effects {
                if let Some(next) = self.execute(effect).await? {
                    queue.push_back(next);
                }
            }
        }
        Ok(())
    }

    async fn execute(&mut self, effect: Effect) -> Result<Option<Event>, CliError> {
        let next = match effect {
            Effect::Extract { request, body } => {
                let result = self.backend.extract(&body).await;
                warn_on_failure("extract", result.as_ref().err());
                Some(Event::ExtractFinished { request, result })
            }
            Effect::Ask { request, body } => {
                let result = self.backend.ask(&body).await;
                warn_on_failure("ask", result.as_ref().err());
                Some(Event::AnswerFinished { request, result })
            }
            Effect::FetchHistory { request } => {
                let result = self.backend.history().await;
                warn_on_failure("history", result.as_ref().err());
                Some(Event::HistoryFinished { request, result })
            }
            Effect::FetchContent { request } => {
                let result = self.backend.content().await;
                warn_on_failure("content", result.as_ref().err());
                Some(Event::ContentFinished { request, result })
            }
            Effect::Download => {
                self.download().await?;
                None
            }
            Effect::ClearInput | Effect::FocusInput | Effect::ScrollToBottom | Effect::ApplyTheme(_) => {
                None
            }
        };
        Ok(next)
    }

    async fn open_history_entry(&mut self, number: usize) -> Result<(), CliError> {
        let entry = match &self.controller.history().view {
            HistoryView::Entries(entries) => number.checked_sub(1).and_then(|i| entries.get(i)).cloned(),
            _ => None,
        };
        match entry {
            Some(entry) => {
                self.dispatch(Event::SelectHistoryEntry {
                    url: entry.url,
                    conversation: entry.conversation,
                })
                .await
            }
            None => {
                writeln!(self.out, "No history entry {number}; run /history first.")?;
                Ok(())
            }
        }
    }

    async fn download(&mut self) -> Result<(), CliError> {
        let download = match self.backend.download().await {
            Ok(download) => download,
            Err(err) => {
                warn_on_failure("download", Some(&err));
                writeln!(self.out, "Chatbot (error): Error downloading content: {err}")?;
                return Ok(());
            }
        };
        let path = self.download_dir.join(&download.filename);
        match write_file(&path, &download.bytes).await {
            Ok(()) => writeln!(self.out, "Saved content to {}", path.display())?,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "download write failed");
                writeln!(self.out, "Chatbot (error): Could not save {}: {err}", path.display())?;
            }
        }
        Ok(())
    }

    fn print_history(&mut self) -> Result<(), CliError> {
        for line in render::history_lines(&self.controller.history().view) {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    /// Print every message added since the last flush.
    fn flush_transcript(&mut self) -> Result<(), CliError> {
        let last = self.last_printed;
        for message in self
            .controller
            .transcript()
            .messages()
            .iter()
            .filter(|m| last.is_none_or(|id| m.id > id))
        {
            writeln!(self.out, "{}", render::message_line(message))?;
            self.last_printed = Some(message.id);
        }
        self.out.flush()?;
        Ok(())
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}

fn warn_on_failure(operation: &str, err: Option<&session::ApiError>) {
    if let Some(err) = err {
        tracing::warn!(operation, error = %err, "remote call failed");
    }
}
