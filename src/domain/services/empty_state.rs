use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "How do I use a RecursiveUrlLoader to load content from a page?",
    "How can I define the state schema for my LangGraph graph?",
    "How can I run a model locally on my laptop with Ollama?",
    "Explain RAG techniques and how LangGraph can implement them.",
];

/// Shown in place of the transcript until the first question is asked.
pub struct EmptyState {}

impl EmptyState {
    pub fn suggestion(idx: usize) -> Option<&'static str> {
        return SUGGESTED_QUESTIONS.get(idx).copied();
    }

    pub fn render<B: Backend>(frame: &mut Frame<B>, rect: Rect) {
        let mut lines = vec![Line::from("")];
        for (idx, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[Alt+{}] ", idx + 1),
                    Style::default().fg(Color::LightBlue),
                ),
                Span::from(question.to_string()),
            ]));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("View Source: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::from(env!("CARGO_PKG_REPOSITORY")),
        ]));

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            rect,
        );
    }
}
