//! Scattering engine: density subsampling, randomized placement planning and materialization
//! of instances through the host scene.
pub mod events;
pub mod params;
pub mod placement;
pub mod runner;
pub mod sampling;

/// Step applied by the density +/- controls, in percent.
pub const DENSITY_STEP: u8 = 10;
