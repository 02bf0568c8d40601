//! Notifications about accounts, sessions and posts.
//!
//! Actions and the façade call [`dispatch`] once their write is stored.
//! Listeners are installed once at startup; until then dispatch does nothing.
//!
//! ```rust,ignore
//! use quill::events::Topic;
//! use quill::events::listeners::LoggingListener;
//!
//! quill::register_event_listeners(|registry| {
//!     registry
//!         .listen(LoggingListener::new())
//!         .listen(LoggingListener::with_level(log::Level::Warn).only(&[Topic::Session]));
//! });
//! ```

mod event;
mod registry;

pub mod listeners;

pub use event::{BlogEvent, Topic};
pub use registry::{EventRegistry, Listener, dispatch, register_event_listeners};
