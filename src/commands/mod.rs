//! Command handlers. Each handler validates its arguments, performs the
//! store operation, and hands a reply effect back to the event handler,
//! which owns all Discord I/O. Commands are all-or-nothing: a validation
//! failure mutates nothing.

pub mod registration;
pub mod send;

/// What the router sends back for a handled command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Sent as `"{invoker_mention} {text}"`.
    Text(String),
    /// Pre-rendered chunks sent verbatim, in order.
    Chunks(Vec<String>),
}
