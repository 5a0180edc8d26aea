//! Exclusive-channel ambient sound controller shared by the weather-sounds
//! front-end and its tests.

pub mod assets;
pub mod channel;
pub mod config;
pub mod controller;
pub mod error;
pub mod loader;
pub mod output;
pub mod platform;
