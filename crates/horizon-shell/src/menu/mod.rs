//! Menu registry and command dispatch.
//!
//! - [`MenuRegistry`]: the live top-level menu sequence
//! - [`CommandDispatcher`]: resolves a node or id and runs its command

mod dispatcher;
mod registry;

pub use dispatcher::{CommandDispatcher, CommandTarget, DispatchOutcome};
pub use registry::{MenuItems, MenuRegistry};
