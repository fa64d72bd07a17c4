#![forbid(unsafe_code)]
//! vertex_scatter: scatter randomized instances of a scene object across mesh vertices.
//!
//! Modules:
//! - scene: the host scene-API boundary and an in-memory host
//! - selection: turn the host's selection into a source object and target points
//! - scatter: parameters, density subsampling, placement planning, events, runner
//! - tool: session state behind the scatter form (cached names, density stepping)
//!
//! For examples, see the `vertex_scatter_demos` crate.
pub mod error;
pub mod scatter;
pub mod scene;
pub mod selection;
pub mod tool;

/// Convenient re-exports for common types. Import with `use vertex_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::scatter::events::{EventSink, FnSink, ScatterEvent, ScatterEventKind, VecSink};
    pub use crate::scatter::params::ScatterParameters;
    pub use crate::scatter::placement::{plan_placements, PlacementInstruction, TargetPoint};
    pub use crate::scatter::runner::{
        scatter, scatter_unseeded, scatter_with_events, Placement, ScatterResult,
    };
    pub use crate::scatter::sampling::{sample_without_replacement, subsample_count};
    pub use crate::scene::{ComponentMask, MemoryScene, NodeId, SceneApi, SceneObjectRef};
    pub use crate::selection::{
        component_owner, read_selection, read_source, read_targets, Selection,
    };
    pub use crate::tool::ScatterTool;
}
