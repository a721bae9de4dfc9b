pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fantasy;
pub mod forecast;
pub mod interactive;
pub mod keyed;
pub mod logger;
pub mod merch;
pub mod predictions;
pub mod profile;
pub mod seed;
pub mod state;
pub mod toast;
