pub mod animation;
pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod gesture;
pub mod sys;
