use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::ChatOutcome;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::Event;
use crate::domain::models::Location;
use crate::domain::models::Role;
use crate::domain::models::MODEL_CATALOG;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::SUGGESTED_QUESTIONS;
use crate::infrastructure::backends::ChatApi;

fn app_state(location: &str) -> AppState<'static> {
    let mut app_state = AppState::new(Location::parse(location).unwrap());
    app_state.set_rect(Rect::new(0, 0, 100, 30));
    return app_state;
}

fn mounted_app_state(location: &str) -> AppState<'static> {
    let mut app_state = app_state(location);
    app_state.mount(&mut StdRng::seed_from_u64(1));
    return app_state;
}

fn type_text(
    app_state: &mut AppState,
    text: &str,
    tx: &mpsc::UnboundedSender<Action>,
) -> Result<()> {
    for ch in text.chars() {
        app_state.handle_event(
            Event::KeyboardCharInput(Input {
                key: Key::Char(ch),
                ctrl: false,
                alt: false,
            }),
            tx,
        )?;
    }

    return Ok(());
}

fn to_request(action: Option<Action>) -> Result<ChatRequest> {
    match action {
        Some(Action::ChatRequest(req)) => return Ok(req),
        _ => bail!("Wrong type from recv"),
    }
}

fn succeeded(generation: u64, text: &str) -> Event {
    return Event::ChatResponse(ChatResponse {
        generation,
        outcome: ChatOutcome::Succeeded(text.to_string()),
    });
}

fn failed(generation: u64) -> Event {
    return Event::ChatResponse(ChatResponse {
        generation,
        outcome: ChatOutcome::Failed("connection refused".to_string()),
    });
}

mod mount {
    use super::*;

    #[test]
    fn it_starts_with_a_loading_selector() {
        let app_state = app_state("http://localhost:3000/?llm=cohere_command");
        assert!(app_state.selector.is_loading);
        assert!(app_state.selection.is_none());
    }

    #[test]
    fn it_reads_llm_from_location() {
        let app_state = mounted_app_state("http://localhost:3000/?llm=cohere_command");
        assert!(!app_state.selector.is_loading);
        assert_eq!(app_state.selection.unwrap().id(), "cohere_command");
    }

    #[test]
    fn it_picks_a_catalog_label_without_param() {
        let app_state = mounted_app_state("http://localhost:3000/");
        let id = app_state.selection.unwrap().id().to_string();
        assert!(MODEL_CATALOG.iter().any(|e| return e.id == id));
    }

    #[test]
    fn it_mounts_only_once() -> Result<()> {
        let mut app_state = mounted_app_state("http://localhost:3000/?llm=cohere_command");
        app_state.location = Location::parse("http://localhost:3000/?llm=google_gemini_pro")?;
        app_state.mount(&mut StdRng::seed_from_u64(2));

        assert_eq!(app_state.selection.unwrap().id(), "cohere_command");

        return Ok(());
    }
}

mod submit {
    use super::*;

    #[test]
    fn it_appends_user_message_before_sending() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/?llm=cohere_command");
        type_text(&mut app_state, "What is LCEL?", &tx)?;

        app_state.submit(None, &tx)?;

        assert_eq!(app_state.transcript.len(), 1);
        assert_eq!(app_state.transcript[0].role, Role::User);
        assert_eq!(app_state.transcript[0].content, "What is LCEL?");
        assert_eq!(app_state.input_text(), "");
        assert!(app_state.is_in_flight());

        let req = to_request(rx.blocking_recv())?;
        assert_eq!(req.question, "What is LCEL?");
        assert_eq!(req.llm, Some("cohere_command".to_string()));
        assert!(req.chat_history.is_empty());
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_ignores_empty_submissions() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");

        app_state.submit(None, &tx)?;
        app_state.submit(Some(""), &tx)?;

        assert!(app_state.transcript.is_empty());
        assert!(!app_state.is_in_flight());
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_prefers_explicit_text_and_clears_input() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");
        type_text(&mut app_state, "typed", &tx)?;

        app_state.submit(Some("chosen"), &tx)?;

        assert_eq!(app_state.transcript[0].content, "chosen");
        assert_eq!(app_state.input_text(), "");
        assert_eq!(to_request(rx.blocking_recv())?.question, "chosen");

        return Ok(());
    }

    #[test]
    fn it_sends_whitespace_only_text() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");

        app_state.submit(Some(" "), &tx)?;

        assert_eq!(app_state.transcript.len(), 1);
        assert_eq!(to_request(rx.blocking_recv())?.question, " ");

        return Ok(());
    }

    #[test]
    fn it_omits_llm_before_mount() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state("http://localhost:3000/?llm=cohere_command");

        app_state.submit(Some("hi"), &tx)?;

        assert_eq!(to_request(rx.blocking_recv())?.llm, None);

        return Ok(());
    }

    #[test]
    fn it_sends_previous_exchanges_as_history() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");

        app_state.submit(Some("What is LangChain?"), &tx)?;
        let first = to_request(rx.blocking_recv())?;
        app_state.handle_event(succeeded(first.generation, "A framework."), &tx)?;

        app_state.submit(Some("And LangGraph?"), &tx)?;
        let second = to_request(rx.blocking_recv())?;

        assert_eq!(second.chat_history.len(), 1);
        assert_eq!(second.chat_history[0].human, "What is LangChain?");
        assert_eq!(second.chat_history[0].ai, "A framework.");

        return Ok(());
    }
}

mod responses {
    use super::*;

    #[test]
    fn it_appends_assistant_reply() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");
        app_state.submit(Some("hi"), &tx)?;
        let req = to_request(rx.blocking_recv())?;

        app_state.handle_event(succeeded(req.generation, "X"), &tx)?;

        assert_eq!(app_state.transcript.len(), 2);
        assert_eq!(app_state.transcript[1].role, Role::Assistant);
        assert_eq!(app_state.transcript[1].content, "X");
        assert!(!app_state.is_in_flight());

        return Ok(());
    }

    #[test]
    fn it_appends_nothing_on_failure() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");
        app_state.submit(Some("hi"), &tx)?;
        let req = to_request(rx.blocking_recv())?;

        app_state.handle_event(failed(req.generation), &tx)?;

        assert_eq!(app_state.transcript.len(), 1);
        assert!(!app_state.is_in_flight());

        return Ok(());
    }

    #[test]
    fn it_discards_stale_replies() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");
        app_state.submit(Some("first"), &tx)?;
        let first = to_request(rx.blocking_recv())?;
        app_state.submit(Some("second"), &tx)?;
        let second = to_request(rx.blocking_recv())?;

        app_state.handle_event(succeeded(first.generation, "late"), &tx)?;
        assert_eq!(app_state.transcript.len(), 2);
        assert!(app_state.is_in_flight());

        app_state.handle_event(succeeded(second.generation, "fresh"), &tx)?;
        assert_eq!(app_state.transcript.len(), 3);
        assert_eq!(app_state.transcript[2].content, "fresh");
        assert!(!app_state.is_in_flight());

        return Ok(());
    }

    #[test]
    fn it_aborts_on_ctrl_c_while_in_flight() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");
        app_state.submit(Some("hi"), &tx)?;
        let req = to_request(rx.blocking_recv())?;

        let should_break = app_state.handle_event(Event::KeyboardCTRLC(), &tx)?;
        assert!(!should_break);
        assert!(!app_state.is_in_flight());
        assert!(matches!(rx.blocking_recv(), Some(Action::ChatAbort())));

        app_state.handle_event(succeeded(req.generation, "too late"), &tx)?;
        assert_eq!(app_state.transcript.len(), 1);

        return Ok(());
    }

    #[test]
    fn it_exits_on_ctrl_c_when_idle() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");

        assert!(app_state.handle_event(Event::KeyboardCTRLC(), &tx)?);

        return Ok(());
    }
}

mod scrolling {
    use super::*;

    #[test]
    fn it_scrolls_past_u16_line_counts() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");
        app_state.submit(Some("Dump everything"), &tx)?;
        let req = to_request(rx.blocking_recv())?;

        let reply = "a\n".repeat(70_000);
        app_state.handle_event(succeeded(req.generation, &reply), &tx)?;
        assert!(app_state.bubble_list.len() > u16::MAX as usize);

        for _ in 0..500 {
            app_state.handle_event(Event::UIScrollPageDown(), &tx)?;
        }
        assert_eq!(app_state.scroll.position, 5000);

        return Ok(());
    }
}

mod keyboard {
    use super::*;

    #[test]
    fn it_submits_on_enter() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");
        type_text(&mut app_state, "hello", &tx)?;

        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(app_state.input_text(), "");
        assert_eq!(to_request(rx.blocking_recv())?.question, "hello");

        return Ok(());
    }

    #[test]
    fn it_inserts_newline_without_submitting() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");
        type_text(&mut app_state, "abc", &tx)?;

        app_state.handle_event(Event::KeyboardNewline(), &tx)?;

        assert_eq!(app_state.input_text(), "abc\n");
        assert!(app_state.transcript.is_empty());
        assert!(rx.try_recv().is_err());

        type_text(&mut app_state, "def", &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        assert_eq!(to_request(rx.blocking_recv())?.question, "abc\ndef");

        return Ok(());
    }

    #[test]
    fn it_pastes_multiline_text() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");

        app_state.handle_event(Event::KeyboardPaste("one\r\ntwo".to_string()), &tx)?;

        assert_eq!(app_state.input_text(), "one\ntwo");

        return Ok(());
    }

    #[test]
    fn it_submits_suggestions_on_empty_transcript() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");

        app_state.handle_event(Event::KeyboardSuggestion(1), &tx)?;

        assert_eq!(app_state.transcript[0].content, SUGGESTED_QUESTIONS[1]);
        assert_eq!(
            to_request(rx.blocking_recv())?.question,
            SUGGESTED_QUESTIONS[1]
        );

        app_state.handle_event(Event::KeyboardSuggestion(0), &tx)?;
        assert_eq!(app_state.transcript.len(), 1);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_ignores_unknown_suggestions() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/");

        app_state.handle_event(Event::KeyboardSuggestion(8), &tx)?;

        assert!(app_state.transcript.is_empty());
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_selects_a_model_from_the_dropdown() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/?llm=openai_gpt_3_5_turbo");

        app_state.handle_event(Event::KeyboardTab(), &tx)?;
        assert!(app_state.selector.is_open);

        app_state.handle_event(Event::UIScrollDown(), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert!(!app_state.selector.is_open);
        assert!(app_state.transcript.is_empty());
        assert_eq!(
            app_state.selection.as_ref().unwrap().id(),
            "anthropic_claude_3_haiku"
        );
        assert_eq!(
            app_state.location.as_str(),
            "http://localhost:3000/?llm=anthropic_claude_3_haiku"
        );

        app_state.submit(Some("hi"), &tx)?;
        assert_eq!(
            to_request(rx.blocking_recv())?.llm,
            Some("anthropic_claude_3_haiku".to_string())
        );

        return Ok(());
    }

    #[test]
    fn it_closes_the_dropdown_on_esc() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = mounted_app_state("http://localhost:3000/?llm=cohere_command");

        app_state.handle_event(Event::KeyboardTab(), &tx)?;
        app_state.handle_event(Event::KeyboardEsc(), &tx)?;

        assert!(!app_state.selector.is_open);
        assert_eq!(app_state.selection.unwrap().id(), "cohere_command");
        assert_eq!(
            app_state.location.as_str(),
            "http://localhost:3000/?llm=cohere_command"
        );

        return Ok(());
    }
}

mod end_to_end {
    use super::*;

    async fn round_trip(status: usize, body: &str) -> Result<AppState<'static>> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(status)
            .with_body(body)
            .create();

        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let backend = Arc::new(ChatApi::with_url(server.url()));
        tokio::spawn(async move {
            return ActionsService::start(backend, event_tx, &mut action_rx).await;
        });

        let mut app_state = mounted_app_state("http://localhost:3000/?llm=cohere_command");
        app_state.submit(Some("What is LCEL?"), &action_tx)?;
        assert!(app_state.is_in_flight());

        let event = time::timeout(Duration::from_secs(5), event_rx.recv()).await?;
        match event {
            Some(event) => {
                app_state.handle_event(event, &action_tx)?;
            }
            None => bail!("Event channel closed"),
        }

        mock.assert();
        return Ok(app_state);
    }

    #[tokio::test]
    async fn it_shows_the_reply_on_success() -> Result<()> {
        let app_state = round_trip(200, r#"{"response": "X"}"#).await?;

        assert_eq!(app_state.transcript.len(), 2);
        assert_eq!(app_state.transcript[1].content, "X");
        assert!(!app_state.is_in_flight());

        return Ok(());
    }

    #[tokio::test]
    async fn it_shows_nothing_on_server_error() -> Result<()> {
        let app_state = round_trip(500, "Internal Server Error").await?;

        assert_eq!(app_state.transcript.len(), 1);
        assert!(!app_state.is_in_flight());

        return Ok(());
    }
}
