//! Target points and the per-instance placement plan derived from them.
use glam::Vec3;
use mint::Vector3;
use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::scatter::params::ScatterParameters;
use crate::scatter::sampling::{sample_indices, subsample_count, uniform_in};
use crate::scene::NodeId;

/// World-space snapshot of a selected vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPoint {
    /// Component id the position was read from.
    pub vertex: NodeId,
    /// World-space position at selection time.
    pub position: Vec3,
}

impl TargetPoint {
    pub fn new(vertex: impl Into<NodeId>, position: impl Into<Vec3>) -> Self {
        Self {
            vertex: vertex.into(),
            position: position.into(),
        }
    }

    /// Builds a target from a position reported by the host.
    pub fn from_host(vertex: impl Into<NodeId>, position: Vector3<f32>) -> Self {
        Self::new(vertex, Vec3::from(position))
    }
}

/// Randomized transform for one instance at one target.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementInstruction {
    pub target: TargetPoint,
    /// Uniform scale factor applied to X, Y and Z.
    pub scale: f32,
    /// Rotation in degrees, applied identically to X, Y and Z.
    pub rotation: f32,
}

impl PlacementInstruction {
    pub fn scale_xyz(&self) -> Vec3 {
        Vec3::splat(self.scale)
    }

    pub fn rotation_xyz(&self) -> Vec3 {
        Vec3::splat(self.rotation)
    }

    pub fn position(&self) -> Vec3 {
        self.target.position
    }
}

/// Picks the density subsample of `targets` and draws a scale and rotation for each pick.
///
/// Returns exactly `floor(targets.len() * density / 100)` instructions, each referring to a
/// distinct target. Fails with [`crate::error::Error::InvalidParameter`] before drawing
/// anything when `params` is invalid.
pub fn plan_placements<R: Rng + ?Sized>(
    targets: &[TargetPoint],
    params: &ScatterParameters,
    rng: &mut R,
) -> Result<Vec<PlacementInstruction>> {
    params.validate()?;
    Ok(plan_validated(targets, params, rng))
}

pub(crate) fn plan_validated<R: Rng + ?Sized>(
    targets: &[TargetPoint],
    params: &ScatterParameters,
    rng: &mut R,
) -> Vec<PlacementInstruction> {
    let amount = subsample_count(targets.len(), params.density);
    debug!(
        "Sampling {} of {} targets at {}% density.",
        amount,
        targets.len(),
        params.density
    );

    sample_indices(targets.len(), amount, rng)
        .into_iter()
        .map(|index| {
            let scale = uniform_in(rng, params.min_scale, params.max_scale);
            let rotation = uniform_in(rng, params.min_rotation, params.max_rotation);
            PlacementInstruction {
                target: targets[index].clone(),
                scale,
                rotation,
            }
        })
        .collect()
}
