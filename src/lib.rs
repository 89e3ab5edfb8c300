//! `showcase_rs`: the car showcase behind a luxury dealership site.
//!
//! The core is [`controller::ShowcaseController`], a tokio task that drives the
//! full-screen carousel: manual navigation, autoplay, pause on hover, a
//! transition lockout, and a one-way "every car viewed" flag. Around it sit
//! the static catalog and the inventory filter.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod errors;
pub mod inventory;
pub mod model;
pub mod showcase;
pub mod state_manager;
