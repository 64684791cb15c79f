pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod empty_state;
pub mod events;
mod header;
mod model_selector;
mod scroll;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use empty_state::*;
pub use header::*;
pub use model_selector::*;
pub use scroll::*;
