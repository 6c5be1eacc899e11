pub mod adapter;
pub mod config;
pub mod error;
pub mod frontend;
pub mod markup;
pub mod models;
pub mod render;
pub mod suggest;
