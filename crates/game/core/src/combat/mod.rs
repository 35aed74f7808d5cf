//! Combat resolution formulas.
//!
//! Pure functions only. The engine gathers stats, timing tiers and rolls,
//! then calls into here to decide damage and defense outcomes.
//!
//! # Core Functions
//!
//! - `raw_damage`: base damage times coefficient, timing and item multipliers
//! - `mitigate`: divide by the defender's guarded defense coefficient
//! - `effective_defense_chance`: base chance after status and timing bonus
//! - `defense_succeeds`: roll against that chance, or auto-success

pub mod damage;
pub mod defense;
pub mod result;

pub use damage::{guarded_divisor, mitigate, raw_damage};
pub use defense::{defense_succeeds, effective_defense_chance};
pub use result::{AttackReport, DefenseReport, HitOutcome, HitReport};
