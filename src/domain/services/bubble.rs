#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Message;
use crate::domain::models::Role;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

/// Whether the conversation has settled since this bubble was drawn. Only the
/// most recent bubble is ever pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BubbleStatus {
    Complete,
    Pending,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    status: BubbleStatus,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
    pub pending_tag: &'static str,
}

fn char_len(text: &str) -> usize {
    return text.chars().count();
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        status: BubbleStatus,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            status,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // "│ " + " │"
            bubble_padding: 4,
            // left border + left padding + (text, not counted) + right padding + right border.
            border_elements_length: 4,
            outer_padding_percentage: 0.04,
            pending_tag: " sending… ",
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();

        let lines = self
            .message
            .as_string_lines(max_line_length)
            .into_iter()
            .map(|line| return self.text_to_line(line, max_line_length))
            .collect::<Vec<Line<'static>>>();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn text_to_line(&self, text: String, max_line_length: usize) -> Line<'static> {
        let fill = " ".repeat(max_line_length.saturating_sub(char_len(&text)));
        let formatted_line_length =
            char_len(&text) + char_len(&fill) + Bubble::style_config().bubble_padding;
        let outer_bubble_padding =
            " ".repeat(self.window_max_width.saturating_sub(formatted_line_length));

        let wrapped_spans = vec![
            self.highlight_span("│ ".to_string()),
            Span::from(text),
            self.highlight_span(format!("{fill} │")),
        ];

        if self.alignment == BubbleAlignment::Left {
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available_length = self.window_max_width.saturating_sub(line_border_width);

        let mut max_line_length = self
            .message
            .content
            .lines()
            .map(char_len)
            .max()
            .unwrap_or(0)
            .min(available_length);

        max_line_length = max_line_length.max(char_len(&self.message.role.label()));
        if self.status == BubbleStatus::Pending {
            max_line_length = max_line_length.max(char_len(style_config.pending_tag));
        }

        return max_line_length.max(1);
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        let label = self.message.role.label();
        let pending_tag = Bubble::style_config().pending_tag;

        // Add 2 for the padding next to the vertical bars.
        let inner_length = max_line_length + 2;
        let top_bar = format!(
            "╭{label}{}╮",
            "─".repeat(inner_length.saturating_sub(char_len(&label)))
        );
        let bottom_bar = if self.status == BubbleStatus::Pending {
            format!(
                "╰{}{pending_tag}╯",
                "─".repeat(inner_length.saturating_sub(char_len(pending_tag)))
            )
        } else {
            format!("╰{}╯", "─".repeat(inner_length))
        };

        let bar_bubble_padding = " ".repeat(
            self.window_max_width
                .saturating_sub(max_line_length + Bubble::style_config().bubble_padding),
        );

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(top_bar));
            res.extend(lines);
            res.push(self.highlight_line(bottom_bar));
        } else {
            res.push(self.highlight_line(format!("{bar_bubble_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        }

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if self.status == BubbleStatus::Pending {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::DarkGray),
                    ..Style::default()
                },
            );
        } else if self.message.role == Role::Assistant {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::LightBlue),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
