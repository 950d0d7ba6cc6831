pub mod app;
pub mod catalog_view;
pub mod chat;
pub mod config;
pub mod message;
pub mod route;
pub mod text_wrapping;
pub mod transport;
