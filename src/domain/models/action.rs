use super::ChatRequest;

pub enum Action {
    ChatAbort(),
    ChatRequest(ChatRequest),
}
