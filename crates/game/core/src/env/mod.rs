//! Traits describing read-only game data.
//!
//! Oracles expose the item catalog, the enemy roster and stage order, combat
//! tuning, and randomness. The [`Env`] aggregate bundles them so the engine
//! can reach everything it needs without coupling to concrete loaders.
mod config;
mod error;
mod items;
mod rng;
mod roster;

pub use config::ConfigOracle;
pub use error::OracleError;
pub use items::ItemOracle;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use roster::RosterOracle;

/// Aggregates the read-only oracles required by the combat engine.
pub struct Env<'a, I, S, C, R>
where
    I: ItemOracle + ?Sized,
    S: RosterOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    items: Option<&'a I>,
    roster: Option<&'a S>,
    config: Option<&'a C>,
    rng: Option<&'a R>,
}

pub type CombatEnv<'a> =
    Env<'a, dyn ItemOracle + 'a, dyn RosterOracle + 'a, dyn ConfigOracle + 'a, dyn RngOracle + 'a>;

// Manual impls: deriving would demand `Clone` on the (unsized) oracle types.
impl<I, S, C, R> Clone for Env<'_, I, S, C, R>
where
    I: ItemOracle + ?Sized,
    S: RosterOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, S, C, R> Copy for Env<'_, I, S, C, R>
where
    I: ItemOracle + ?Sized,
    S: RosterOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<'a, I, S, C, R> Env<'a, I, S, C, R>
where
    I: ItemOracle + ?Sized,
    S: RosterOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        items: Option<&'a I>,
        roster: Option<&'a S>,
        config: Option<&'a C>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            items,
            roster,
            config,
            rng,
        }
    }

    pub fn with_all(items: &'a I, roster: &'a S, config: &'a C, rng: &'a R) -> Self {
        Self::new(Some(items), Some(roster), Some(config), Some(rng))
    }

    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::RosterNotAvailable` if no roster oracle was provided.
    pub fn roster(&self) -> Result<&'a S, OracleError> {
        self.roster.ok_or(OracleError::RosterNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, I, S, C, R> Env<'a, I, S, C, R>
where
    I: ItemOracle + 'a,
    S: RosterOracle + 'a,
    C: ConfigOracle + 'a,
    R: RngOracle + 'a,
{
    /// Erases the concrete oracle types (borrows self).
    pub fn as_combat_env(&self) -> CombatEnv<'a> {
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let roster: Option<&'a dyn RosterOracle> = self.roster.map(|roster| roster as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(items, roster, config, rng)
    }
}
