pub mod ai;
pub mod api;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod delivery;
pub mod openai;
pub mod orders;
pub mod restaurant;
pub mod transport;
