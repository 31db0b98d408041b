//! Conversation view
//!
//! Elm-style core: `transition` maps (state, event) to (state, effects) with
//! no I/O. `ChatRuntime` executes the effects against a `ProxyClient`.

mod client;
mod effect;
mod event;
mod runtime;
mod state;
mod transition;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpProxyClient, ProxyClient, ProxyError};
pub use effect::Effect;
pub use event::{Event, Key, KeyPress};
pub use runtime::{ChatHandle, ChatRuntime, RuntimeStopped, ViewUpdate};
pub use state::{ChatState, Conversation, Role, Turn, FALLBACK_REPLY, GREETING};
pub use transition::{transition, TransitionError, TransitionResult};
