//! Selection adapter: classifies the host's active selection into the object to instance and
//! the vertices to scatter onto.
//!
//! The first selected element is the source object and must be a transform. Everything after
//! it is expanded to mesh vertices and resolved to world-space [`TargetPoint`]s.
use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::scatter::placement::TargetPoint;
use crate::scene::{parse_vertex_component, ComponentMask, NodeId, SceneApi, SceneObjectRef};

/// A validated selection, ready to hand to [`crate::scatter::runner::scatter`].
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub source: SceneObjectRef,
    pub targets: Vec<TargetPoint>,
}

impl Selection {
    /// Name of the mesh owning the first target vertex.
    pub fn base_name(&self) -> Option<&str> {
        self.targets.first().map(|t| component_owner(&t.vertex))
    }

    pub fn into_parts(self) -> (SceneObjectRef, Vec<TargetPoint>) {
        (self.source, self.targets)
    }
}

/// Node part of a component id: `"pPlane1.vtx[3]"` becomes `"pPlane1"`.
///
/// Ids without a component suffix are returned unchanged.
pub fn component_owner(id: &str) -> &str {
    parse_vertex_component(id)
        .map(|(owner, _)| owner)
        .or_else(|| id.split_once('.').map(|(owner, _)| owner))
        .unwrap_or(id)
}

/// Reads the source object and target vertices from the current selection.
///
/// Fails with [`Error::EmptySelection`] when nothing is selected or no vertices follow the
/// source, and with [`Error::InvalidSource`] when the first element is not a transform.
pub fn read_selection<S: SceneApi + ?Sized>(scene: &S) -> Result<Selection> {
    let selection = scene.query_selection();
    let (first, rest) = selection.split_first().ok_or(Error::EmptySelection)?;
    let source = validate_source(scene, first)?;

    let targets = resolve_targets(scene, rest)?;
    if targets.is_empty() {
        return Err(Error::EmptySelection);
    }
    debug!(
        "Selection: source '{}' with {} target vertices.",
        source,
        targets.len()
    );

    Ok(Selection { source, targets })
}

/// Reads only the source object: the first selected element, which must be a transform.
pub fn read_source<S: SceneApi + ?Sized>(scene: &S) -> Result<SceneObjectRef> {
    let selection = scene.query_selection();
    let first = selection.first().ok_or(Error::EmptySelection)?;
    validate_source(scene, first)
}

/// Reads every selected vertex, whatever else is selected alongside.
pub fn read_targets<S: SceneApi + ?Sized>(scene: &S) -> Result<Vec<TargetPoint>> {
    let selection = scene.query_selection();
    let targets = resolve_targets(scene, &selection)?;
    if targets.is_empty() {
        return Err(Error::EmptySelection);
    }
    Ok(targets)
}

fn validate_source<S: SceneApi + ?Sized>(scene: &S, id: &str) -> Result<SceneObjectRef> {
    if scene.is_transform(id) {
        Ok(SceneObjectRef::new(id))
    } else {
        Err(Error::InvalidSource {
            node: id.to_owned(),
        })
    }
}

/// Expands `ids` to vertices and resolves each one once, in first-seen order.
fn resolve_targets<S: SceneApi + ?Sized>(scene: &S, ids: &[NodeId]) -> Result<Vec<TargetPoint>> {
    let mut seen = HashSet::new();
    scene
        .expand_to_vertices(ids, ComponentMask::MeshVertex)
        .into_iter()
        .filter(|vertex| seen.insert(vertex.clone()))
        .map(|vertex| {
            let position = scene.world_position(&vertex)?;
            Ok(TargetPoint::from_host(vertex, position))
        })
        .collect()
}
