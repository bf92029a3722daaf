//! Conversational response composition.
//!
//! Two responders share one contract: user message + product record in,
//! Portuguese reply text out. The remote responder grounds a generative
//! model in the record; the fallback composer is the deterministic floor
//! guarantee that fires when the remote call fails for any reason.

pub mod fallback;
pub mod remote;

pub use remote::{RemoteResponder, Reply, ReplySource};
