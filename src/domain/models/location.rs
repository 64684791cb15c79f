#[cfg(test)]
#[path = "location_test.rs"]
mod tests;

use anyhow::Result;
use url::Url;

/// Shareable address of the chat window. Only the query string is ever
/// rewritten, and rewriting it never triggers a reload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn parse(text: &str) -> Result<Location> {
        let url = Url::parse(text)?;
        return Ok(Location { url });
    }

    pub fn get_param(&self, key: &str) -> Option<String> {
        return self
            .url
            .query_pairs()
            .find(|(k, _)| return k == key)
            .map(|(_, v)| return v.to_string());
    }

    /// Sets `key=value` in the query string with replace semantics: the first
    /// occurrence keeps its position, later duplicates are dropped, and a
    /// missing key is appended.
    pub fn set_param(&mut self, key: &str, value: &str) {
        let mut pairs: Vec<(String, String)> = vec![];
        let mut replaced = false;

        for (k, v) in self.url.query_pairs() {
            if k != key {
                pairs.push((k.to_string(), v.to_string()));
                continue;
            }
            if !replaced {
                pairs.push((key.to_string(), value.to_string()));
                replaced = true;
            }
        }

        if !replaced {
            pairs.push((key.to_string(), value.to_string()));
        }

        self.url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    pub fn as_str(&self) -> &str {
        return self.url.as_str();
    }
}
