//! Core trait definitions
//!
//! The seams between the dispatch engine and its collaborators: the command
//! channel, the credential source, the client listing API and the job
//! renderer.

mod connection;
mod listing;
mod render;

pub use connection::{Connection, FrameReader, FrameWriter, TokenProvider};
pub use listing::ListingClient;
pub use render::JobRenderer;
