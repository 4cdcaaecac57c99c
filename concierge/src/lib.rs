//! Elyx health concierge: routes member chat to a team of specialist
//! personas, screens for emergencies and keeps short-term conversation
//! memory over a generative-language API.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod intelligence;
pub mod llm;
pub mod models;
pub mod services;
