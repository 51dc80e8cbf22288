//! `Codemate`: a terminal chat widget that simulates a coding assistant.

pub mod action;
pub mod app;
pub mod attach;
pub mod chat;
pub mod chrome;
pub mod clipboard;
pub mod config;
pub mod input;
pub mod io;
pub mod ui;
