use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

const MAX_ROWS: usize = 5;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title("What does RunnablePassthrough.assign() do?")
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }

    pub fn text(textarea: &tui_textarea::TextArea) -> String {
        return textarea.lines().join("\n");
    }

    /// Rows needed to draw the text box, borders included. Grows with the
    /// input up to five lines of text, then scrolls.
    pub fn height(textarea: &tui_textarea::TextArea) -> u16 {
        let rows = textarea.lines().len().clamp(1, MAX_ROWS);
        return rows as u16 + 2;
    }
}
