//! The chat widget controller.
//!
//! Owns the transcript, the input field and the submit control. A submission
//! spawns one turn task that waits the configured delay, reports that the
//! placeholder has expired, then asks the reply service for an answer. The
//! task never touches controller state; it reports back over a channel and
//! [`ChatController::apply`] performs every mutation on the caller's task.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::delay::Delay;
use crate::error::RequestFailed;
use crate::input::{InputEdit, InputField};
use crate::message::Message;
use crate::reply::ReplyService;
use crate::transcript::Transcript;

/// Progress reported by a turn task.
#[derive(Debug)]
pub enum TurnEvent {
    PlaceholderExpired,
    Settled(Result<String, RequestFailed>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Ignored,
    Sent,
}

pub struct ChatController {
    transcript: Transcript,
    input: InputField,
    submit_enabled: bool,
    service: Arc<dyn ReplyService>,
    delay: Arc<dyn Delay>,
    events_tx: mpsc::UnboundedSender<TurnEvent>,
    events_rx: mpsc::UnboundedReceiver<TurnEvent>,
    turn: Option<JoinHandle<()>>,
}

impl ChatController {
    pub fn new(service: Arc<dyn ReplyService>, delay: Arc<dyn Delay>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            transcript: Transcript::new(),
            input: InputField::new(),
            submit_enabled: false,
            service,
            delay,
            events_tx,
            events_rx,
            turn: None,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn interaction_enabled(&self) -> bool {
        self.input.is_enabled()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// True between a submission and its settlement.
    pub fn is_awaiting_reply(&self) -> bool {
        self.turn.is_some()
    }

    pub fn edit_input(&mut self, edit: InputEdit) {
        if self.input.apply(edit) {
            self.update_submit_availability();
        }
    }

    /// The submit control is available only for non-blank input.
    pub fn update_submit_availability(&mut self) {
        self.submit_enabled = self.input.is_enabled() && !self.input.is_blank();
    }

    pub fn render_message(&mut self, message: Message) {
        self.transcript.render_message(message);
    }

    /// Send the current input text. Blank input, or input submitted while a
    /// reply is still pending, is ignored.
    pub fn submit(&mut self) -> Submission {
        if !self.input.is_enabled() || self.turn.is_some() {
            return Submission::Ignored;
        }
        let text = self.input.text().trim().to_string();
        if text.is_empty() {
            return Submission::Ignored;
        }

        info!(chars = text.chars().count(), "submitting message");
        self.render_message(Message::user(text.clone()));
        self.set_controls_enabled(false);
        self.render_message(Message::placeholder());

        let service = Arc::clone(&self.service);
        let delay = Arc::clone(&self.delay);
        let tx = self.events_tx.clone();
        self.turn = Some(tokio::spawn(async move {
            delay.wait().await;
            if tx.send(TurnEvent::PlaceholderExpired).is_err() {
                return;
            }
            // A panicking service still settles the turn
            let result = AssertUnwindSafe(service.reply(&text))
                .catch_unwind()
                .await
                .unwrap_or(Err(RequestFailed::Panicked));
            let _ = tx.send(TurnEvent::Settled(result));
        }));

        self.input.clear();
        Submission::Sent
    }

    /// Wait for the next report from the running turn task.
    pub async fn next_event(&mut self) -> Option<TurnEvent> {
        self.events_rx.recv().await
    }

    pub fn apply(&mut self, event: TurnEvent) {
        match event {
            TurnEvent::PlaceholderExpired => {
                self.transcript.remove_placeholders();
            }
            TurnEvent::Settled(result) => {
                self.transcript.remove_placeholders();
                match result {
                    Ok(reply) => {
                        info!(chars = reply.chars().count(), "reply received");
                        self.render_message(Message::bot(reply));
                    }
                    Err(e) => {
                        warn!(error = %e, "reply request failed");
                        self.render_message(Message::fallback());
                    }
                }
                self.turn = None;
                self.set_controls_enabled(true);
            }
        }
    }

    /// Drive the pending turn, if any, until it has settled.
    pub async fn settle(&mut self) {
        while self.turn.is_some() {
            match self.events_rx.recv().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.input.set_enabled(enabled);
        self.submit_enabled = enabled;
    }
}

impl Drop for ChatController {
    fn drop(&mut self) {
        if let Some(turn) = self.turn.take() {
            turn.abort();
        }
    }
}
