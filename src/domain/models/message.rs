#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use super::Role;

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique within the process. Handed out from a monotonic counter, so two
/// messages created in the same instant still get distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    pub fn next() -> MessageId {
        return MessageId(NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed));
    }
}

#[derive(Clone, Debug)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            id: MessageId::next(),
            role,
            content: content.to_string().replace('\t', "  "),
        };
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.content.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_len = word.chars().count();
                if char_count + word_len > line_max_width && !current_lines.is_empty() {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word_len + 1;
                } else {
                    current_lines.push(word);
                    char_count += word_len + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
