//! World Kernel: the world contract, the scene container, and the driver that runs a
//! fixed-interval simulation loop alongside a free-running presentation loop.
//!
//! # Invariants
//! - Exactly two worker threads: simulation and presentation. The caller only joins.
//! - Presentation draws a published snapshot and never waits on the world lock. Input
//!   arriving during a tick is queued and applied by that tick.
//! - Simulation steps are neither skipped nor duplicated; none starts after stop.
//! - Consecutive steps are at least one tick interval apart.
//! - Scene shapes are drawn in spawn order.
//! - Shutdown: presentation exits, the run flag clears, simulation is joined.

pub mod driver;
pub mod shared;
pub mod world;

pub use driver::{
    Driver, DriverConfig, DriverError, RunSummary, run_presentation, run_simulation,
};
pub use shared::{RunFlag, SharedWorld};
pub use world::{Scene, World};
