use std::collections::HashMap;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use super::BubbleStatus;
use crate::domain::models::Message;
use crate::domain::models::MessageId;
use crate::domain::models::Role;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

type BubbleCacheKey = (MessageId, BubbleStatus);

/// Rendered transcript, newest message first. Messages never change after
/// they are appended, so bubbles are cached by id and status until the
/// window width changes.
#[derive(Default)]
pub struct BubbleList {
    cache: HashMap<BubbleCacheKey, Vec<Line<'static>>>,
    line_width: usize,
    lines: Vec<Line<'static>>,
}

impl BubbleList {
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize, in_flight: bool) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        let mut previous = std::mem::take(&mut self.cache);
        self.lines = vec![];

        for (idx, message) in messages.iter().rev().enumerate() {
            let mut status = BubbleStatus::Complete;
            if idx == 0 && in_flight {
                status = BubbleStatus::Pending;
            }

            let key = (message.id, status);
            let bubble_lines = previous.remove(&key).unwrap_or_else(|| {
                let mut align = BubbleAlignment::Left;
                if message.role == Role::User {
                    align = BubbleAlignment::Right;
                }

                return Bubble::new(message, align, status, line_width).as_lines();
            });

            self.lines.extend(bubble_lines.iter().cloned());
            self.cache.insert(key, bubble_lines);
        }
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
