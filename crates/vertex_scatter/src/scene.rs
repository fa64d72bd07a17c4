//! Host scene boundary.
//!
//! The scatter engine never talks to a concrete 3D application. Everything it needs from the
//! host (reading the selection, resolving vertex positions, creating instances and transforming
//! them) goes through [`SceneApi`]. [`MemoryScene`] is a small in-memory host that implements
//! the trait for tests, benches and demos.
use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

use glam::Vec3;
use mint::Vector3;

use crate::error::{Error, Result};

/// Identifier of a host node or component, e.g. `"pCube1"` or `"pPlane1.vtx[12]"`.
pub type NodeId = String;

/// Opaque reference to the scene node that gets instanced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneObjectRef {
    id: NodeId,
}

impl SceneObjectRef {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for SceneObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Component filter applied when expanding a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentMask {
    MeshVertex,
}

impl ComponentMask {
    /// Numeric selection mask understood by hosts that filter components by code.
    pub fn code(self) -> u32 {
        match self {
            ComponentMask::MeshVertex => 31,
        }
    }
}

/// Primitives the scatter tool consumes from the host application.
///
/// Read-only queries take `&self`; anything that mutates the scene takes `&mut self`.
pub trait SceneApi {
    /// The active selection, in selection order, with components flattened.
    fn query_selection(&self) -> Vec<NodeId>;

    /// Expands `ids` to the individual components matching `mask`, dropping everything else.
    fn expand_to_vertices(&self, ids: &[NodeId], mask: ComponentMask) -> Vec<NodeId>;

    /// World-space position of a single vertex component.
    fn world_position(&self, vertex: &str) -> Result<Vector3<f32>>;

    fn is_transform(&self, node: &str) -> bool;

    /// Creates an instance of `node` and returns the new transform's id.
    fn create_instance(&mut self, node: &str) -> Result<NodeId>;

    fn scale_node(&mut self, node: &str, scale: Vector3<f32>) -> Result<()>;

    /// Sets the rotation of `node`, in degrees per axis.
    fn rotate_node(&mut self, node: &str, rotation: Vector3<f32>) -> Result<()>;

    fn move_node_absolute_world(&mut self, node: &str, position: Vector3<f32>) -> Result<()>;
}

/// Builds the component id of vertex `index` on `mesh`.
pub fn vertex_component(mesh: &str, index: usize) -> NodeId {
    format!("{mesh}.vtx[{index}]")
}

/// Splits `mesh.vtx[i]` or `mesh.vtx[a:b]` into the owning mesh and the index range.
pub(crate) fn parse_vertex_component(id: &str) -> Option<(&str, RangeInclusive<usize>)> {
    let (owner, rest) = id.split_once(".vtx[")?;
    let inner = rest.strip_suffix(']')?;
    match inner.split_once(':') {
        Some((start, end)) => {
            let start: usize = start.trim().parse().ok()?;
            let end: usize = end.trim().parse().ok()?;
            (start <= end).then_some((owner, start..=end))
        }
        None => {
            let index: usize = inner.trim().parse().ok()?;
            Some((owner, index..=index))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Transform,
    /// Any non-transform node (shapes, materials, ...).
    Other,
}

/// A node held by [`MemoryScene`].
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: NodeId,
    pub kind: NodeKind,
    pub translation: Vec3,
    /// Euler rotation in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Node this one instances, if it was created by [`SceneApi::create_instance`].
    pub instance_of: Option<NodeId>,
}

impl SceneNode {
    fn new(name: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            instance_of: None,
        }
    }
}

/// A mutation recorded by [`MemoryScene`], in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneOp {
    CreateInstance { source: NodeId, instance: NodeId },
    Scale { node: NodeId, scale: Vec3 },
    Rotate { node: NodeId, rotation: Vec3 },
    Move { node: NodeId, position: Vec3 },
}

/// In-memory host scene.
///
/// Meshes are transforms with a list of object-space vertices; a vertex's world position is
/// its object-space position offset by the mesh translation.
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: HashMap<NodeId, SceneNode>,
    vertices: HashMap<NodeId, Vec<Vec3>>,
    selection: Vec<NodeId>,
    ops: Vec<SceneOp>,
    instance_counter: usize,
    instance_limit: Option<usize>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty transform node.
    pub fn with_transform(mut self, name: impl Into<NodeId>) -> Self {
        let node = SceneNode::new(name, NodeKind::Transform);
        self.nodes.insert(node.name.clone(), node);
        self
    }

    /// Adds a non-transform node, such as a shape.
    pub fn with_shape(mut self, name: impl Into<NodeId>) -> Self {
        let node = SceneNode::new(name, NodeKind::Other);
        self.nodes.insert(node.name.clone(), node);
        self
    }

    /// Adds a mesh transform at `translation` carrying `vertices` in object space.
    pub fn with_mesh(
        mut self,
        name: impl Into<NodeId>,
        translation: impl Into<Vec3>,
        vertices: Vec<Vec3>,
    ) -> Self {
        let mut node = SceneNode::new(name, NodeKind::Transform);
        node.translation = translation.into();
        self.vertices.insert(node.name.clone(), vertices);
        self.nodes.insert(node.name.clone(), node);
        self
    }

    /// Makes `create_instance` fail once `limit` instances exist.
    pub fn with_instance_limit(mut self, limit: usize) -> Self {
        self.instance_limit = Some(limit);
        self
    }

    /// Replaces the active selection.
    pub fn select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.selection = ids.into_iter().map(Into::into).collect();
    }

    /// Selects `source` followed by every vertex of `mesh`, as a user would in the viewport.
    pub fn select_source_and_mesh_vertices(&mut self, source: &str, mesh: &str) {
        let count = self.vertices.get(mesh).map_or(0, Vec::len);
        let mut ids = vec![source.to_owned()];
        if count > 0 {
            ids.push(format!("{mesh}.vtx[0:{}]", count - 1));
        }
        self.selection = ids;
    }

    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn vertex_count(&self, mesh: &str) -> usize {
        self.vertices.get(mesh).map_or(0, Vec::len)
    }

    /// All nodes created as instances of `source`, in no particular order.
    pub fn instances_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a SceneNode> + 'a {
        self.nodes
            .values()
            .filter(move |n| n.instance_of.as_deref() == Some(source))
    }

    pub fn instance_count(&self) -> usize {
        self.instance_counter
    }

    pub fn ops(&self) -> &[SceneOp] {
        &self.ops
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut SceneNode> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::host(id, "no such node"))
    }
}

impl SceneApi for MemoryScene {
    fn query_selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn expand_to_vertices(&self, ids: &[NodeId], mask: ComponentMask) -> Vec<NodeId> {
        match mask {
            ComponentMask::MeshVertex => ids
                .iter()
                .filter_map(|id| parse_vertex_component(id))
                .filter_map(|(mesh, range)| {
                    let count = self.vertices.get(mesh)?.len();
                    Some(
                        range
                            .take_while(move |&i| i < count)
                            .map(move |i| vertex_component(mesh, i)),
                    )
                })
                .flatten()
                .collect(),
        }
    }

    fn world_position(&self, vertex: &str) -> Result<Vector3<f32>> {
        let (mesh, range) = parse_vertex_component(vertex)
            .ok_or_else(|| Error::host(vertex, "not a vertex component"))?;
        if range.start() != range.end() {
            return Err(Error::host(vertex, "expected a single vertex"));
        }
        let local = self
            .vertices
            .get(mesh)
            .and_then(|v| v.get(*range.start()))
            .ok_or_else(|| Error::host(vertex, "vertex index out of range"))?;
        let offset = self.nodes.get(mesh).map_or(Vec3::ZERO, |n| n.translation);
        Ok((*local + offset).into())
    }

    fn is_transform(&self, node: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.kind == NodeKind::Transform)
    }

    fn create_instance(&mut self, node: &str) -> Result<NodeId> {
        if let Some(limit) = self.instance_limit {
            if self.instance_counter >= limit {
                return Err(Error::host(node, "instance limit reached"));
            }
        }
        let source = self
            .nodes
            .get(node)
            .ok_or_else(|| Error::host(node, "no such node"))?;
        let root = source.instance_of.clone().unwrap_or_else(|| node.to_owned());

        self.instance_counter += 1;
        let name = format!("{root}_instance{}", self.instance_counter);
        let mut instance = SceneNode::new(name.clone(), NodeKind::Transform);
        instance.instance_of = Some(root);
        self.nodes.insert(name.clone(), instance);
        self.ops.push(SceneOp::CreateInstance {
            source: node.to_owned(),
            instance: name.clone(),
        });
        Ok(name)
    }

    fn scale_node(&mut self, node: &str, scale: Vector3<f32>) -> Result<()> {
        let scale = Vec3::from(scale);
        self.node_mut(node)?.scale = scale;
        self.ops.push(SceneOp::Scale {
            node: node.to_owned(),
            scale,
        });
        Ok(())
    }

    fn rotate_node(&mut self, node: &str, rotation: Vector3<f32>) -> Result<()> {
        let rotation = Vec3::from(rotation);
        self.node_mut(node)?.rotation = rotation;
        self.ops.push(SceneOp::Rotate {
            node: node.to_owned(),
            rotation,
        });
        Ok(())
    }

    fn move_node_absolute_world(&mut self, node: &str, position: Vector3<f32>) -> Result<()> {
        let position = Vec3::from(position);
        self.node_mut(node)?.translation = position;
        self.ops.push(SceneOp::Move {
            node: node.to_owned(),
            position,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane() -> MemoryScene {
        MemoryScene::new().with_mesh(
            "pPlane1",
            Vec3::new(0.0, 1.0, 0.0),
            vec![
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
        )
    }

    #[test]
    fn parses_single_and_range_components() {
        assert_eq!(
            parse_vertex_component("pPlane1.vtx[3]"),
            Some(("pPlane1", 3..=3))
        );
        assert_eq!(
            parse_vertex_component("pPlane1.vtx[2:5]"),
            Some(("pPlane1", 2..=5))
        );
        assert!(parse_vertex_component("pPlane1").is_none());
        assert!(parse_vertex_component("pPlane1.vtx[5:2]").is_none());
        assert!(parse_vertex_component("pPlane1.e[3]").is_none());
    }

    #[test]
    fn expand_flattens_ranges_and_drops_nodes() {
        let scene = plane().with_transform("pCube1");
        let ids = vec!["pCube1".to_owned(), "pPlane1.vtx[1:2]".to_owned()];
        let expanded = scene.expand_to_vertices(&ids, ComponentMask::MeshVertex);
        assert_eq!(expanded, vec!["pPlane1.vtx[1]", "pPlane1.vtx[2]"]);
    }

    #[test]
    fn expand_clips_ranges_past_the_last_vertex() {
        let scene = plane();
        let ids = vec!["pPlane1.vtx[2:10]".to_owned()];
        assert_eq!(
            scene.expand_to_vertices(&ids, ComponentMask::MeshVertex).len(),
            2
        );
    }

    #[test]
    fn world_position_includes_mesh_translation() {
        let scene = plane();
        let p = Vec3::from(scene.world_position("pPlane1.vtx[3]").unwrap());
        assert_eq!(p, Vec3::new(1.0, 1.0, 1.0));
        assert!(scene.world_position("pPlane1.vtx[9]").is_err());
        assert!(scene.world_position("pPlane1").is_err());
    }

    #[test]
    fn instances_record_their_root_source() {
        let mut scene = MemoryScene::new().with_transform("pCube1");
        let first = scene.create_instance("pCube1").unwrap();
        let second = scene.create_instance(&first).unwrap();
        assert_eq!(
            scene.node(&second).unwrap().instance_of.as_deref(),
            Some("pCube1")
        );
        assert_eq!(scene.instances_of("pCube1").count(), 2);
        assert!(scene.create_instance("missing").is_err());
    }

    #[test]
    fn instance_limit_rejects_further_instances() {
        let mut scene = MemoryScene::new()
            .with_transform("pCube1")
            .with_instance_limit(1);
        assert!(scene.create_instance("pCube1").is_ok());
        assert!(matches!(
            scene.create_instance("pCube1"),
            Err(Error::Host { .. })
        ));
    }

    #[test]
    fn shapes_are_not_transforms() {
        let scene = MemoryScene::new()
            .with_transform("pCube1")
            .with_shape("pCubeShape1");
        assert!(scene.is_transform("pCube1"));
        assert!(!scene.is_transform("pCubeShape1"));
        assert!(!scene.is_transform("missing"));
    }

    #[test]
    fn mask_code_matches_polygon_vertex_filter() {
        assert_eq!(ComponentMask::MeshVertex.code(), 31);
    }
}
