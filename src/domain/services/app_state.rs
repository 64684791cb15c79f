#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use rand::Rng;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::EmptyState;
use super::ModelSelector;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::ChatHistoryEntry;
use crate::domain::models::ChatOutcome;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Location;
use crate::domain::models::Message;
use crate::domain::models::ModelSelection;
use crate::domain::models::RequestTracker;
use crate::domain::models::Role;
use crate::domain::models::TextArea;
use crate::domain::models::LLM_PARAM;

pub struct AppState<'a> {
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub location: Location,
    pub request: RequestTracker,
    pub scroll: Scroll,
    pub selection: Option<ModelSelection>,
    pub selector: ModelSelector,
    pub spinner: Loading,
    pub textarea: tui_textarea::TextArea<'a>,
    pub transcript: Vec<Message>,
}

impl<'a> AppState<'a> {
    pub fn new(location: Location) -> AppState<'a> {
        return AppState {
            bubble_list: BubbleList::default(),
            last_known_height: 0,
            last_known_width: 0,
            location,
            request: RequestTracker::default(),
            scroll: Scroll::default(),
            selection: None,
            selector: ModelSelector::default(),
            spinner: Loading::default(),
            textarea: TextArea::default(),
            transcript: vec![],
        };
    }

    /// Resolves the model selection once the first frame is on screen. The
    /// location is only ever read here.
    pub fn mount<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.selector.is_loading {
            return;
        }

        let selection = ModelSelection::from_location(&self.location, rng);
        tracing::debug!(llm = selection.id(), "mounted");

        self.selection = Some(selection);
        self.selector.is_loading = false;
    }

    pub fn input_text(&self) -> String {
        return TextArea::text(&self.textarea);
    }

    pub fn is_in_flight(&self) -> bool {
        return self.request.is_in_flight();
    }

    /// Sends `text`, or the input box when `text` is empty or missing. Does
    /// nothing when both are empty.
    pub fn submit(
        &mut self,
        text: Option<&str>,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let question = match text {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.input_text(),
        };
        if question.is_empty() {
            return Ok(());
        }

        let chat_history = ChatHistoryEntry::from_transcript(&self.transcript);
        self.add_message(Message::new(Role::User, &question));
        self.textarea = TextArea::default();

        let generation = self.request.begin();
        self.sync_dependants();

        tx.send(Action::ChatRequest(ChatRequest {
            generation,
            question,
            chat_history,
            llm: self
                .selection
                .as_ref()
                .map(|selection| return selection.id().to_string()),
        }))?;

        return Ok(());
    }

    pub fn abort_request(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if let Some(generation) = self.request.abandon() {
            tracing::debug!(generation, "request abandoned");
            tx.send(Action::ChatAbort())?;
            self.sync_dependants();
        }

        return Ok(());
    }

    pub fn select_model(&mut self, id: &str) {
        self.selection = Some(ModelSelection::new(id));
        self.location.set_param(LLM_PARAM, id);
        tracing::debug!(llm = id, location = self.location.as_str(), "model selected");
    }

    pub fn handle_chat_response(&mut self, response: ChatResponse) {
        if !self.request.finish(response.generation) {
            tracing::debug!(
                generation = response.generation,
                "discarding response for a stale request"
            );
            return;
        }

        match response.outcome {
            ChatOutcome::Succeeded(text) => {
                self.add_message(Message::new(Role::Assistant, &text));
            }
            ChatOutcome::Failed(err) => {
                tracing::debug!(
                    generation = response.generation,
                    err = %err,
                    "no reply to show"
                );
                self.sync_dependants();
            }
        }
    }

    /// Applies one event. Returns true when the app should exit.
    pub fn handle_event(
        &mut self,
        event: Event,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        match event {
            Event::ChatResponse(response) => {
                self.handle_chat_response(response);
            }
            Event::KeyboardCharInput(input) => {
                self.textarea.input(input);
            }
            Event::KeyboardCTRLC() => {
                if !self.is_in_flight() {
                    return Ok(true);
                }
                self.abort_request(tx)?;
            }
            Event::KeyboardEnter() => {
                if self.selector.is_open {
                    let chosen = self.selector.choose();
                    self.select_model(chosen.id);
                } else {
                    self.submit(None, tx)?;
                }
            }
            Event::KeyboardEsc() => {
                self.selector.close();
            }
            Event::KeyboardNewline() => {
                self.textarea.insert_newline();
            }
            Event::KeyboardPaste(text) => {
                for ch in text.chars() {
                    match ch {
                        '\n' => self.textarea.insert_newline(),
                        '\r' => (),
                        _ => self.textarea.insert_char(ch),
                    }
                }
            }
            Event::KeyboardSuggestion(idx) => {
                if self.transcript.is_empty() {
                    if let Some(question) = EmptyState::suggestion(idx) {
                        self.submit(Some(question), tx)?;
                    }
                }
            }
            Event::KeyboardTab() => {
                self.selector.toggle(self.selection.as_ref());
            }
            Event::UIScrollDown() => {
                if self.selector.is_open {
                    self.selector.down();
                } else {
                    self.scroll.down();
                }
            }
            Event::UIScrollUp() => {
                if self.selector.is_open {
                    self.selector.up();
                } else {
                    self.scroll.up();
                }
            }
            Event::UIScrollPageDown() => {
                self.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                self.scroll.up_page();
            }
            Event::UITick() => {
                self.spinner.tick();
            }
        }

        return Ok(false);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn add_message(&mut self, message: Message) {
        self.transcript.push(message);
        self.sync_dependants();
        self.scroll.first();
    }

    fn sync_dependants(&mut self) {
        // One column is left for the scrollbar.
        let line_width = self.last_known_width.saturating_sub(1) as usize;
        self.bubble_list
            .set_messages(&self.transcript, line_width, self.is_in_flight());

        let list_length = u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX);
        self.scroll.set_state(list_length, self.last_known_height);
    }
}
