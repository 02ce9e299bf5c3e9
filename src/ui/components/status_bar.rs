use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::NOTIFICATION_TTL_SECS;
use crate::ui::core::{Action, Component, NotificationKind};

struct Notification {
    message: String,
    kind: NotificationKind,
    shown_at: Instant,
}

/// Bottom bar: shows the current notification when one is live, the key
/// bindings otherwise.
pub struct StatusBarComponent {
    notification: Option<Notification>,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self { notification: None }
    }

    pub fn notify(&mut self, message: String, kind: NotificationKind) {
        self.notification = Some(Notification {
            message,
            kind,
            shown_at: Instant::now(),
        });
    }

    /// Called on every tick; drops the notification once its TTL has passed.
    pub fn tick(&mut self) {
        if let Some(notification) = &self.notification {
            if notification.shown_at.elapsed().as_secs() >= NOTIFICATION_TTL_SECS {
                self.notification = None;
            }
        }
    }
}

impl Default for StatusBarComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBarComponent {
    fn handle_key_events(&mut self, _key: KeyEvent) -> Action {
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let line = match &self.notification {
            Some(notification) => {
                let color = match notification.kind {
                    NotificationKind::Success => Color::Green,
                    NotificationKind::Error => Color::Red,
                    NotificationKind::Info => Color::Cyan,
                };
                Line::from(Span::styled(
                    format!(" {}", notification.message),
                    Style::default().fg(color),
                ))
            }
            None => Line::from(Span::styled(
                " a: add to technique • r: reload • j/k: scroll • q: quit",
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(Paragraph::new(line), rect);
    }
}
