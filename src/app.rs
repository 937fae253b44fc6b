use ratatui::layout::Rect;

use crate::controller::ChatController;

pub struct App {
    pub should_quit: bool,
    pub controller: ChatController,
    /// Shown in the transcript title
    pub endpoint_label: String,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Panel areas for mouse hit-testing (updated during render)
    pub transcript_area: Option<Rect>,
    pub submit_area: Option<Rect>,
}

impl App {
    pub fn new(controller: ChatController, endpoint_label: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            controller,
            endpoint_label: endpoint_label.into(),
            animation_frame: 0,
            transcript_area: None,
            submit_area: None,
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.controller.transcript().has_placeholder() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        } else {
            self.animation_frame = 0;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
