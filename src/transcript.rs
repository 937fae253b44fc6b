use crate::message::Message;

const DEFAULT_WRAP_WIDTH: u16 = 50;
const DEFAULT_VIEW_HEIGHT: u16 = 20;

/// Ordered list of displayed chat messages.
///
/// Append-only, except that placeholder entries are dropped once the reply
/// they stand in for has settled. At most one placeholder is present at a time.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    scroll: u16,
    view_width: u16,
    view_height: u16,
    // Row count measured by the view for the current messages
    rendered_rows: Option<u16>,
    // Cleared when the user scrolls up, set again when they reach the bottom
    follow: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            follow: true,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn has_placeholder(&self) -> bool {
        self.messages.iter().any(Message::is_placeholder)
    }

    /// Append a message and scroll so the newest entry is visible.
    pub fn render_message(&mut self, message: Message) {
        if message.is_placeholder() {
            self.remove_placeholders();
        }
        self.messages.push(message);
        self.rendered_rows = None;
        self.follow = true;
        self.scroll_to_bottom();
    }

    /// Drop every placeholder entry, returning how many were removed.
    pub fn remove_placeholders(&mut self) -> usize {
        let before = self.messages.len();
        self.messages.retain(|message| !message.is_placeholder());
        let removed = before - self.messages.len();
        if removed > 0 {
            self.rendered_rows = None;
            if self.follow {
                self.scroll_to_bottom();
            }
        }
        removed
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Record the inner size of the transcript pane and the number of rows
    /// the messages wrap to at that width (called on every draw).
    pub fn set_viewport(&mut self, width: u16, height: u16, rows: u16) {
        self.view_width = width;
        self.view_height = height;
        self.rendered_rows = Some(rows);
        if self.follow {
            self.scroll_to_bottom();
        } else {
            self.scroll = self.scroll.min(self.max_scroll());
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
        self.follow = self.scroll >= self.max_scroll();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
        self.follow = self.scroll >= self.max_scroll();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Number of rendered rows. Uses the count measured on the last draw
    /// when the messages have not changed since.
    pub fn total_lines(&self) -> u16 {
        self.rendered_rows.unwrap_or_else(|| self.estimated_lines())
    }

    /// Rows counting the sender line, the text broken every `width`
    /// characters and the blank separator of every message.
    fn estimated_lines(&self) -> u16 {
        let wrap_width = if self.view_width > 0 {
            self.view_width as usize
        } else {
            DEFAULT_WRAP_WIDTH as usize
        };

        let mut total: usize = 0;
        for message in &self.messages {
            total += 1;
            for line in message.text().lines() {
                let char_count = line.chars().count();
                total += char_count.div_ceil(wrap_width).max(1);
            }
            if message.text().is_empty() {
                total += 1;
            }
            total += 1;
        }
        total.min(u16::MAX as usize) as u16
    }

    fn max_scroll(&self) -> u16 {
        let visible = if self.view_height > 0 {
            self.view_height
        } else {
            DEFAULT_VIEW_HEIGHT
        };
        self.total_lines().saturating_sub(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Sender, PLACEHOLDER_TEXT};

    #[test]
    fn second_placeholder_replaces_the_first() {
        let mut transcript = Transcript::new();
        transcript.render_message(Message::user("hello"));
        transcript.render_message(Message::placeholder());
        transcript.render_message(Message::placeholder());

        let placeholders = transcript
            .messages()
            .iter()
            .filter(|m| m.is_placeholder())
            .count();
        assert_eq!(placeholders, 1);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn removing_placeholders_keeps_lookalike_replies() {
        let mut transcript = Transcript::new();
        transcript.render_message(Message::bot(PLACEHOLDER_TEXT));
        transcript.render_message(Message::placeholder());

        assert_eq!(transcript.remove_placeholders(), 1);
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].sender(), Sender::Bot);
        assert!(!transcript.has_placeholder());
    }

    #[test]
    fn counts_wrapped_lines() {
        let mut transcript = Transcript::new();
        transcript.set_viewport(10, 5, 0);
        // header + 2 wrapped rows + blank
        transcript.render_message(Message::user("a".repeat(15)));
        assert_eq!(transcript.total_lines(), 4);
        // header + 1 row + blank
        transcript.render_message(Message::bot("exactly 10"));
        assert_eq!(transcript.total_lines(), 7);
    }

    #[test]
    fn follows_newest_message() {
        let mut transcript = Transcript::new();
        transcript.set_viewport(40, 4, 0);
        for i in 0..5 {
            transcript.render_message(Message::user(format!("message {i}")));
        }
        // 5 messages * 3 rows - 4 visible
        assert_eq!(transcript.scroll(), 11);
    }

    #[test]
    fn scrolling_up_stops_following_until_bottom_is_reached() {
        let mut transcript = Transcript::new();
        transcript.set_viewport(40, 4, 0);
        for i in 0..5 {
            transcript.render_message(Message::user(format!("message {i}")));
        }

        transcript.scroll_up(3);
        transcript.set_viewport(40, 4, 15);
        assert_eq!(transcript.scroll(), 8);

        transcript.scroll_down(100);
        assert_eq!(transcript.scroll(), 11);
        transcript.set_viewport(40, 3, 15);
        assert_eq!(transcript.scroll(), 12);
    }

    #[test]
    fn measured_rows_take_precedence_over_estimate() {
        let mut transcript = Transcript::new();
        transcript.set_viewport(28, 10, 0);
        transcript.render_message(Message::user("hi"));
        transcript.render_message(Message::bot("word ".repeat(12)));
        // "hi" takes 3 rows, the 60 character reply 1 + 3 + 1
        let estimate = transcript.total_lines();
        assert_eq!(estimate, 8);

        // Word wrapping pushed the reply onto extra rows
        transcript.set_viewport(28, 10, 14);
        assert_eq!(transcript.total_lines(), 14);
        assert_eq!(transcript.scroll(), 4);

        // A new message invalidates the measurement until the next draw
        transcript.render_message(Message::user("again"));
        assert_eq!(transcript.total_lines(), estimate + 3);
    }

    #[test]
    fn short_transcript_does_not_scroll() {
        let mut transcript = Transcript::new();
        transcript.render_message(Message::user("hi"));
        assert_eq!(transcript.scroll(), 0);
    }
}
