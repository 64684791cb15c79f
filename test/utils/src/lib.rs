use serde_json::json;
use serde_json::Value;

pub fn answer_fixture() -> &'static str {
    return r#"
RunnablePassthrough.assign() adds extra keys to the input of a chain.

It takes keyword arguments whose values are runnables or functions, runs them against the input dictionary, and merges the results back in. This is a really long line that pushes past fifty characters so that bubbles need to wrap it.

The original keys are passed through untouched.
"#
    .trim();
}

pub fn chat_history_fixture() -> Value {
    return json!([
        {
            "human": "What is LangChain?",
            "ai": "A framework for building applications with language models."
        }
    ]);
}
