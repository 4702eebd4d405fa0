//! docdesk — a chat-style pipeline that documents submitted code.
//!
//! Submitted code goes to an external completion endpoint as a fixed prompt
//! pair; the markdown analysis is reconciled into an append-only transcript
//! and rendered in the terminal. In extended mode a rendered response can be
//! republished as a wiki page through a second thin client.

pub mod app;
pub mod commands;
pub mod config;
pub mod render;
pub mod runtime;
pub mod transcript;
