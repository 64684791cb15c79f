#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatOutcome;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::Event;

async fn complete(
    backend: BackendBox,
    request: ChatRequest,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let generation = request.generation;
    tracing::debug!(generation, llm = ?request.llm, "sending question");

    let outcome = match backend.get_completion(&request).await {
        Ok(text) => ChatOutcome::Succeeded(text),
        Err(err) => {
            tracing::error!(generation, error = ?err, "chat request failed");
            ChatOutcome::Failed(err.to_string())
        }
    };

    tx.send(Event::ChatResponse(ChatResponse {
        generation,
        outcome,
    }))?;

    return Ok(());
}

/// Background worker owning the backend. At most one request task is alive at
/// a time: a new question or an abort cancels whatever is still running.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let action = match rx.recv().await {
                Some(action) => action,
                None => {
                    worker.abort();
                    return Ok(());
                }
            };

            match action {
                Action::ChatAbort() => {
                    tracing::debug!("aborting in-flight request");
                    worker.abort();
                }
                Action::ChatRequest(request) => {
                    worker.abort();
                    worker = tokio::spawn(complete(backend.clone(), request, tx.clone()));
                }
            }
        }
    }
}
