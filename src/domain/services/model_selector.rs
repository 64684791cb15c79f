#[cfg(test)]
#[path = "model_selector_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::Frame;

use crate::domain::models::Loading;
use crate::domain::models::ModelDescriptor;
use crate::domain::models::ModelSelection;
use crate::domain::models::MODEL_CATALOG;

/// Dropdown over the model catalog. It shows a spinner until the selection
/// has been resolved at mount.
pub struct ModelSelector {
    pub is_loading: bool,
    pub is_open: bool,
    highlighted: usize,
}

impl Default for ModelSelector {
    fn default() -> ModelSelector {
        return ModelSelector {
            is_loading: true,
            is_open: false,
            highlighted: 0,
        };
    }
}

impl ModelSelector {
    pub fn toggle(&mut self, current: Option<&ModelSelection>) {
        if self.is_open {
            self.close();
            return;
        }
        if self.is_loading {
            return;
        }

        self.highlighted = current
            .and_then(|selection| return selection.catalog_index())
            .unwrap_or(0);
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn up(&mut self) {
        if self.highlighted == 0 {
            self.highlighted = MODEL_CATALOG.len() - 1;
        } else {
            self.highlighted -= 1;
        }
    }

    pub fn down(&mut self) {
        self.highlighted = (self.highlighted + 1) % MODEL_CATALOG.len();
    }

    pub fn highlighted(&self) -> &'static ModelDescriptor {
        return &MODEL_CATALOG[self.highlighted];
    }

    /// Closes the dropdown and returns the chosen entry.
    pub fn choose(&mut self) -> &'static ModelDescriptor {
        self.close();
        return self.highlighted();
    }

    pub fn label(&self, spinner: &Loading, current: Option<&ModelSelection>) -> Span<'static> {
        if self.is_loading {
            return Span::styled(
                spinner.symbol().to_string(),
                Style::default().fg(Color::LightBlue),
            );
        }

        let name = current
            .map(|selection| return selection.display_name())
            .unwrap_or_default();
        let arrow = if self.is_open { "▴" } else { "▾" };

        return Span::styled(
            format!("[ {name} {arrow} ] (Tab)"),
            Style::default().add_modifier(Modifier::BOLD),
        );
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        if !self.is_open {
            return;
        }

        let height = (MODEL_CATALOG.len() as u16 + 2).min(area.height);
        let width = 64.min(area.width);
        let rect = Rect::new(
            area.x + (area.width - width) / 2,
            area.y,
            width,
            height,
        );

        let items = MODEL_CATALOG
            .iter()
            .map(|descriptor| {
                return ListItem::new(Line::from(vec![
                    Span::styled(
                        descriptor.display_name.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", descriptor.description),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            })
            .collect::<Vec<ListItem>>();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Powered by"),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(Color::LightBlue))
            .highlight_symbol("› ");

        let mut state = ListState::default();
        state.select(Some(self.highlighted));

        frame.render_widget(Clear, rect);
        frame.render_stateful_widget(list, rect, &mut state);
    }
}
