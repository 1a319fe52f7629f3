// ABOUTME: Library crate for resume exposing session lifecycle orchestration for the CLI and tests

pub mod cli;
pub mod config;
pub mod models;
pub mod relay;
pub mod remote;
pub mod session;
pub mod terminal;
pub mod tmux;
