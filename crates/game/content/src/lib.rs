//! Data-driven content definitions and loaders.
//!
//! This crate ships the game's static content and provides loaders for RON/TOML data files:
//! - Item catalog (data-driven via RON)
//! - Player template, rank presets and stage order (data-driven via RON)
//! - Combat tuning (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ContentSet, ItemCatalog, ItemLoader, RosterCatalog,
    RosterLoader,
};
