pub mod editor;
pub mod ids;
pub mod models;
pub mod ports;
pub mod services;
pub mod summarizer;
