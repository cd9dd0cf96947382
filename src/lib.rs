pub mod anchor;
pub mod config;
pub mod dom;
pub mod engine;
pub mod net;
pub mod social;
pub mod ui;
