//! IDE 機能を提供するモジュール

pub mod backend;
pub mod editor;
mod handlers;
pub mod prompt;
pub mod state;
