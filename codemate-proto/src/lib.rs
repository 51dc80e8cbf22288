//! Data model for the Codemate assistant widget.
//!
//! Types here carry no behavior beyond validation and parsing, so both the
//! widget and its tests can share them.

pub mod category;
pub mod format;
pub mod message;
pub mod quick_action;
