//! Core types and traits for the spacebridge workspace.
//!
//! This crate defines the shared abstractions used by the credential manager
//! and the operation dispatcher: the error taxonomy, the bearer token, the
//! domain models returned by the remote API, and the [`TokenSource`] seam.

pub mod error;
pub mod model;
pub mod token;
pub mod traits;

pub use error::SpaceError;
pub use model::{
    Actor, Annotation, AppMessageStyle, Conversation, ConversationSummary, Member, Message,
    OutboundMessage, Page, Space, SpaceDetail,
};
pub use token::AccessToken;
pub use traits::TokenSource;
