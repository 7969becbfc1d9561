//! Conversation state owned by one chat session.

pub mod entities;
