//! Taskbot — chat-platform to-do bot library.

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod gateway;
pub mod render;
pub mod service;
