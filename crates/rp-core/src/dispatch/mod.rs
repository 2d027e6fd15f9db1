//! Remote command dispatch
//!
//! The flow for one invocation:
//!
//! 1. [`TargetResolver`] turns ids, names or a search into concrete client ids
//! 2. [`build_request`] assembles the [`ExecutionRequest`](rp_protocol::ExecutionRequest)
//! 3. [`Dispatcher::execute`] writes it to a [`Connection`](crate::traits::Connection)
//!    and streams job records to a [`JobRenderer`](crate::traits::JobRenderer)
//!    until the stream ends, fails, or the user interrupts

mod builder;
mod engine;
mod resolver;

pub use builder::{build_request, split_ids};
pub use engine::{DispatchOutcome, Dispatcher};
pub use resolver::TargetResolver;
