//! Integration test harness; scenarios live in the sibling modules.

mod env;
mod file_layer;
mod layered;
mod typed;
