use tui_textarea::Input;

use super::ChatResponse;

#[derive(Debug)]
pub enum Event {
    ChatResponse(ChatResponse),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardNewline(),
    KeyboardPaste(String),
    KeyboardSuggestion(usize),
    KeyboardTab(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
