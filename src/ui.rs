use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::message::{Message, Sender, PLACEHOLDER_TEXT};

const SEND_BUTTON_WIDTH: u16 = 10;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, transcript, input row, footer
    let [header_area, transcript_area, input_row, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let [input_area, submit_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(SEND_BUTTON_WIDTH),
    ])
    .areas(input_row);

    // Store areas for mouse hit-testing
    app.transcript_area = Some(transcript_area);
    app.submit_area = Some(submit_area);

    render_header(frame, header_area);
    render_transcript(app, frame, transcript_area);
    render_input(app, frame, input_area);
    render_submit(app, frame, submit_area);
    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Chat ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Sender::Bot | Sender::Placeholder => {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        }
    }
}

/// Rows for one transcript entry: sender label, text, blank separator.
fn message_lines(message: &Message, animation_frame: u8) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(Span::styled(
        message.sender().label(),
        sender_style(message.sender()),
    ))];

    if message.is_placeholder() {
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("{}{}", PLACEHOLDER_TEXT.trim_end_matches('.'), dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    } else if message.text().is_empty() {
        lines.push(Line::default());
    } else {
        lines.extend(message.text().lines().map(Line::from));
    }

    lines.push(Line::default());
    lines
}

/// Transcript messages (or a hint when empty), word-wrapped.
fn transcript_paragraph(app: &App) -> Paragraph<'_> {
    let transcript = app.controller.transcript();
    let text = if transcript.is_empty() {
        Text::from(Span::styled(
            "Type a message and press Enter...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(
            transcript
                .messages()
                .iter()
                .flat_map(|message| message_lines(message, app.animation_frame))
                .collect::<Vec<_>>(),
        )
    };

    Paragraph::new(text).wrap(Wrap { trim: false })
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect) {
    // Inner size minus borders, plus the rows the messages actually wrap to,
    // so scrolling to the bottom reaches the end of the newest message
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    let rows = transcript_paragraph(app).line_count(inner_width);
    app.controller.transcript_mut().set_viewport(
        inner_width,
        inner_height,
        rows.min(u16::MAX as usize) as u16,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", app.endpoint_label));

    let paragraph = transcript_paragraph(app)
        .block(block)
        .scroll((app.controller.transcript().scroll(), 0));

    frame.render_widget(paragraph, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let input = app.controller.input();
    let enabled = input.is_enabled();

    let border_color = if enabled { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(if enabled { " Message " } else { " Waiting for reply " });

    // Horizontal scrolling keeps the cursor visible
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = input.cursor();
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = input
        .text()
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let text_color = if enabled { Color::Cyan } else { Color::DarkGray };
    let paragraph = Paragraph::new(visible_text)
        .style(Style::default().fg(text_color))
        .block(block);

    frame.render_widget(paragraph, area);

    if enabled {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_submit(app: &App, frame: &mut Frame, area: Rect) {
    let style = if app.controller.submit_enabled() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let button = Paragraph::new("Send")
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));

    frame.render_widget(button, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let (mode_text, mode_style) = if app.controller.is_awaiting_reply() {
        (" WAITING ", Style::default().bg(Color::Yellow).fg(Color::Black))
    } else {
        (" READY ", Style::default().bg(Color::Blue).fg(Color::White))
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let footer_content = Line::from(vec![
        Span::styled(mode_text, mode_style),
        Span::styled(" ", label_style),
        Span::styled(" Enter ", key_style),
        Span::styled(" send ", label_style),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" scroll ", label_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", label_style),
    ]);

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}
