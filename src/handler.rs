use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::App;
use crate::input::InputEdit;
use crate::tui::AppEvent;

const PAGE_LINES: u16 = 10;
const WHEEL_LINES: u16 = 3;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Enter => {
            app.controller.submit();
        }
        KeyCode::PageUp => app.controller.transcript_mut().scroll_up(PAGE_LINES),
        KeyCode::PageDown => app.controller.transcript_mut().scroll_down(PAGE_LINES),
        KeyCode::Up => app.controller.transcript_mut().scroll_up(1),
        KeyCode::Down => app.controller.transcript_mut().scroll_down(1),
        KeyCode::Backspace => app.controller.edit_input(InputEdit::Backspace),
        KeyCode::Delete => app.controller.edit_input(InputEdit::Delete),
        KeyCode::Left => app.controller.edit_input(InputEdit::Left),
        KeyCode::Right => app.controller.edit_input(InputEdit::Right),
        KeyCode::Home => app.controller.edit_input(InputEdit::Home),
        KeyCode::End => app.controller.edit_input(InputEdit::End),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.controller.edit_input(InputEdit::Insert(c))
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_transcript = app.transcript_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let on_submit = app.submit_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown if in_transcript => {
            app.controller.transcript_mut().scroll_down(WHEEL_LINES);
        }
        MouseEventKind::ScrollUp if in_transcript => {
            app.controller.transcript_mut().scroll_up(WHEEL_LINES);
        }
        MouseEventKind::Down(MouseButton::Left) if on_submit => {
            if app.controller.submit_enabled() {
                app.controller.submit();
            }
        }
        _ => {}
    }
}
