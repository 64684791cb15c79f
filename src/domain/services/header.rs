use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const TITLE: &str = "Chat LangChain";
pub const DOCS_URL: &str = "https://python.langchain.com/";

/// Title block above the transcript. It is taller while the transcript is
/// empty and shrinks to a single subtitle line once the chat starts.
pub struct Header {}

impl Header {
    pub fn height(is_empty: bool) -> u16 {
        if is_empty {
            return 6;
        }
        return 3;
    }

    pub fn lines(is_empty: bool, selector_label: Span<'static>) -> Vec<Line<'static>> {
        let title = Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        let powered_by = Line::from(vec![Span::from("Powered by "), selector_label]);

        if !is_empty {
            return vec![title, Line::from("We appreciate feedback!"), powered_by];
        }

        return vec![
            Line::from(""),
            title,
            Line::from(""),
            Line::from(vec![
                Span::from("Ask me anything about LangChain's "),
                Span::styled("Python documentation!", Style::default().fg(Color::LightBlue)),
            ]),
            Line::from(Span::styled(DOCS_URL, Style::default().fg(Color::DarkGray))),
            powered_by,
        ];
    }

    pub fn render<B: Backend>(
        frame: &mut Frame<B>,
        rect: Rect,
        is_empty: bool,
        selector_label: Span<'static>,
    ) {
        frame.render_widget(
            Paragraph::new(Header::lines(is_empty, selector_label)).alignment(Alignment::Center),
            rect,
        );
    }
}
