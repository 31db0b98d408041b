//! Hailey - a supportive chat assistant
//!
//! A single-endpoint chat proxy that wraps one upstream text-completion
//! model behind a fixed persona, and a conversation view that talks to it.

pub mod api;
pub mod chat;
pub mod config;
pub mod llm;
pub mod persona;
