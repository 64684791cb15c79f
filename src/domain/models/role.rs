use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label drawn on top of a chat bubble.
    pub fn label(&self) -> String {
        match self {
            Role::User => {
                let username = Config::get(ConfigKey::Username);
                if username.is_empty() {
                    return "You".to_string();
                }
                return username;
            }
            Role::Assistant => return "Assistant".to_string(),
        }
    }
}
