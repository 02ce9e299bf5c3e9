pub mod actions;
pub mod component;
pub mod event_handler;

pub use actions::{Action, NotificationKind};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
