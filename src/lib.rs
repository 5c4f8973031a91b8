pub mod config;
pub mod document;
pub mod editor;
pub mod gateway;
pub mod shared;
