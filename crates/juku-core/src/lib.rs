//! Campus model, monthly tick, and campaign controller for the Juku
//! franchise simulation.
//!
//! A campaign runs month by month from year 1 April to year 6 March. Each
//! month, every owned campus gains and loses students, pays its teachers,
//! rent, advertising and royalty, and drifts in satisfaction. The player
//! opens campuses, hires teachers and picks ad plans between months.
//!
//! # Modules
//!
//! - [`calendar`] -- Campaign calendar with month wrap and end-date ordering.
//! - [`config`] -- Configuration loading from `juku-config.yaml`.
//! - [`catalog`] -- Campus and teacher template catalogs.
//! - [`model`] -- Player and campus state.
//! - [`staffing`] -- Round-robin teacher issuing.
//! - [`capacity`] -- Classroom allocation and teacher deficits.
//! - [`flow`] -- Monthly student inflow and attrition.
//! - [`satisfaction`] -- Monthly satisfaction update.
//! - [`advertising`] -- Ad plan scheduling with a one-month delay.
//! - [`campaign`] -- The [`Simulation`] controller and monthly tick.
//! - [`snapshot`] -- Snapshot capture, restore, and legacy migration.
//! - [`saves`] -- File-backed save slots.
//!
//! [`Simulation`]: campaign::Simulation

pub mod advertising;
pub mod calendar;
pub mod campaign;
pub mod capacity;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod model;
pub mod satisfaction;
pub mod saves;
pub mod snapshot;
pub mod staffing;

pub use campaign::{OpenOptions, Simulation};
pub use catalog::Catalog;
pub use config::SimulationConfig;
pub use error::SimError;
pub use saves::SlotStore;
