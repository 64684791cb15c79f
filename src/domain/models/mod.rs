mod action;
mod backend;
mod catalog;
mod chat;
mod event;
mod loading;
mod location;
mod message;
mod request;
mod role;
mod textarea;

pub use action::*;
pub use backend::*;
pub use catalog::*;
pub use chat::*;
pub use event::*;
pub use loading::*;
pub use location::*;
pub use message::*;
pub use request::*;
pub use role::*;
pub use textarea::*;
