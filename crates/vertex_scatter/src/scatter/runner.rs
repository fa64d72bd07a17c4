//! Materializes a placement plan as instances in the host scene.
use rand::Rng;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};
use crate::scatter::params::ScatterParameters;
use crate::scatter::placement::{plan_validated, PlacementInstruction, TargetPoint};
use crate::scene::{NodeId, SceneApi, SceneObjectRef};

/// An instruction that has been applied to a freshly created instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Host id of the created instance.
    pub instance: NodeId,
    pub instruction: PlacementInstruction,
}

/// Result of a scatter run.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterResult {
    /// Instances created by the run, in creation order.
    pub placements: Vec<Placement>,
    /// Targets offered to the run.
    pub targets_available: usize,
    /// Targets left empty by the density subsample.
    pub targets_skipped: usize,
}

impl ScatterResult {
    /// Creates a new empty [`ScatterResult`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instance_count(&self) -> usize {
        self.placements.len()
    }

    pub fn instructions(&self) -> impl Iterator<Item = &PlacementInstruction> {
        self.placements.iter().map(|p| &p.instruction)
    }
}

/// Scatters instances of `source` over a density subsample of `targets`.
///
/// Parameters are validated and `source` is checked to be a transform before anything is
/// sampled or created. Each instance is created, scaled, rotated and finally moved to its
/// target in world space.
pub fn scatter<S, R>(
    scene: &mut S,
    source: &SceneObjectRef,
    targets: &[TargetPoint],
    params: &ScatterParameters,
    rng: &mut R,
) -> Result<ScatterResult>
where
    S: SceneApi + ?Sized,
    R: Rng + ?Sized,
{
    scatter_with_events(scene, source, targets, params, rng, &mut ())
}

/// Same as [`scatter`], drawing from a fresh thread-local generator.
pub fn scatter_unseeded<S>(
    scene: &mut S,
    source: &SceneObjectRef,
    targets: &[TargetPoint],
    params: &ScatterParameters,
) -> Result<ScatterResult>
where
    S: SceneApi + ?Sized,
{
    let mut rng = rand::rng();
    scatter(scene, source, targets, params, &mut rng)
}

/// Same as [`scatter`], reporting progress to `sink`.
///
/// A host failure part-way through stops the run. Instances created before the failure stay
/// in the scene and the returned [`Error::Interrupted`] says how many.
pub fn scatter_with_events<S, R>(
    scene: &mut S,
    source: &SceneObjectRef,
    targets: &[TargetPoint],
    params: &ScatterParameters,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<ScatterResult>
where
    S: SceneApi + ?Sized,
    R: Rng + ?Sized,
{
    params.validate()?;
    if !scene.is_transform(source.id()) {
        warn!("Scatter source '{}' is not a transform; aborting.", source);
        return Err(Error::InvalidSource {
            node: source.id().to_owned(),
        });
    }

    let plan = plan_validated(targets, params, rng);

    if sink.wants(ScatterEventKind::ScatterStarted) {
        sink.send(ScatterEvent::ScatterStarted {
            source: source.clone(),
            target_count: targets.len(),
            sample_count: plan.len(),
        });
    }
    if plan.is_empty() && !targets.is_empty() {
        warn!(
            "Density {}% of {} targets rounds down to zero instances.",
            params.density,
            targets.len()
        );
        if sink.wants(ScatterEventKind::Warning) {
            sink.send(ScatterEvent::Warning {
                context: format!("source:{source}"),
                message: format!(
                    "density {}% leaves no instances for {} targets",
                    params.density,
                    targets.len()
                ),
            });
        }
    }

    let planned = plan.len();
    let mut placements = Vec::with_capacity(planned);
    let mut created = 0;
    for (index, instruction) in plan.into_iter().enumerate() {
        let instance = match scene.create_instance(source.id()) {
            Ok(instance) => instance,
            Err(e) => return Err(interrupted(e, created, planned, source)),
        };
        created += 1;
        transform_instance(scene, &instance, &instruction)
            .map_err(|e| interrupted(e, created, planned, source))?;
        let placement = Placement {
            instance,
            instruction,
        };
        if sink.wants(ScatterEventKind::InstancePlaced) {
            sink.send(ScatterEvent::InstancePlaced {
                index,
                placement: placement.clone(),
            });
        }
        placements.push(placement);
    }

    let result = ScatterResult {
        targets_skipped: targets.len() - placements.len(),
        targets_available: targets.len(),
        placements,
    };
    info!(
        "Scattered {} instances of '{}' over {} targets.",
        result.instance_count(),
        source,
        result.targets_available
    );

    if sink.wants(ScatterEventKind::ScatterFinished) {
        sink.send(ScatterEvent::ScatterFinished {
            result: result.clone(),
        });
    }

    Ok(result)
}

fn transform_instance<S>(
    scene: &mut S,
    instance: &str,
    instruction: &PlacementInstruction,
) -> Result<()>
where
    S: SceneApi + ?Sized,
{
    scene.scale_node(instance, instruction.scale_xyz().into())?;
    scene.rotate_node(instance, instruction.rotation_xyz().into())?;
    // Move last so scale and rotation pivots cannot shift the final position.
    scene.move_node_absolute_world(instance, instruction.position().into())
}

/// Wraps a host failure so callers learn how many instances it left behind.
fn interrupted(cause: Error, created: usize, planned: usize, source: &SceneObjectRef) -> Error {
    warn!(
        "Stopped after creating {} of {} instances of '{}': {}.",
        created, planned, source, cause
    );
    if created == 0 {
        return cause;
    }
    Error::Interrupted {
        created,
        planned,
        source: Box::new(cause),
    }
}
