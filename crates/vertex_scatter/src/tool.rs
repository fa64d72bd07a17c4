//! Session state behind the scatter form.
//!
//! [`ScatterTool`] owns what the dialog displays between clicks: the names of the last chosen
//! source and base objects, the parameter fields, and the status line. It is a thin layer over
//! [`crate::selection`] and [`crate::scatter::runner`].
use rand::Rng;
use tracing::{info, warn};

use crate::error::Result;
use crate::scatter::params::{ScatterParameters, MAX_DENSITY, MIN_DENSITY};
use crate::scatter::runner::{scatter, ScatterResult};
use crate::scatter::DENSITY_STEP;
use crate::scene::SceneApi;
use crate::selection::{component_owner, read_selection, read_source, read_targets};

pub const DEFAULT_OBJECT_NAME: &str = "Scatter Object";
pub const DEFAULT_BASE_NAME: &str = "Scatter Base";

#[derive(Debug, Clone)]
pub struct ScatterTool {
    /// Display name of the object to scatter.
    pub scatter_object_name: String,
    /// Display name of the object scattered on.
    pub scatter_base_name: String,
    pub params: ScatterParameters,
    last_message: Option<String>,
}

impl Default for ScatterTool {
    fn default() -> Self {
        Self {
            scatter_object_name: DEFAULT_OBJECT_NAME.to_owned(),
            scatter_base_name: DEFAULT_BASE_NAME.to_owned(),
            params: ScatterParameters::default(),
            last_message: None,
        }
    }
}

impl ScatterTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: ScatterParameters) -> Self {
        self.params = params;
        self
    }

    /// Status line from the last triggered run, if any.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Caches the first selected transform as the object to scatter and returns its name.
    pub fn select_scatter_object<S: SceneApi + ?Sized>(&mut self, scene: &S) -> Result<&str> {
        let source = read_source(scene)?;
        self.scatter_object_name = source.id().to_owned();
        Ok(&self.scatter_object_name)
    }

    /// Caches the mesh owning the selected vertices as the base and returns its name.
    pub fn select_scatter_base<S: SceneApi + ?Sized>(&mut self, scene: &S) -> Result<&str> {
        let targets = read_targets(scene)?;
        if let Some(first) = targets.first() {
            self.scatter_base_name = component_owner(&first.vertex).to_owned();
        }
        Ok(&self.scatter_base_name)
    }

    /// Raises density by one step, capped at 100.
    pub fn increase_density(&mut self) -> u8 {
        self.params.density = self
            .params
            .density
            .saturating_add(DENSITY_STEP)
            .clamp(MIN_DENSITY, MAX_DENSITY);
        self.params.density
    }

    /// Lowers density by one step, floored at 1.
    pub fn decrease_density(&mut self) -> u8 {
        self.params.density = self
            .params
            .density
            .saturating_sub(DENSITY_STEP)
            .clamp(MIN_DENSITY, MAX_DENSITY);
        self.params.density
    }

    /// Reads the current selection and scatters with an unseeded generator.
    pub fn scatter<S: SceneApi + ?Sized>(&mut self, scene: &mut S) -> Result<ScatterResult> {
        let mut rng = rand::rng();
        self.scatter_with_rng(scene, &mut rng)
    }

    pub fn scatter_with_rng<S, R>(&mut self, scene: &mut S, rng: &mut R) -> Result<ScatterResult>
    where
        S: SceneApi + ?Sized,
        R: Rng + ?Sized,
    {
        self.params.validate()?;
        let selection = read_selection(&*scene)?;
        if let Some(base) = selection.base_name() {
            self.scatter_base_name = base.to_owned();
        }
        self.scatter_object_name = selection.source.id().to_owned();

        scatter(
            scene,
            &selection.source,
            &selection.targets,
            &self.params,
            rng,
        )
    }

    /// Entry point for the trigger button.
    ///
    /// Errors never escape: they become the status line. Selection and parameter errors leave
    /// the scene untouched. A host failure part-way through a run leaves the instances created
    /// so far in place, and the status line says how many.
    pub fn trigger<S: SceneApi + ?Sized>(&mut self, scene: &mut S) -> Option<ScatterResult> {
        let mut rng = rand::rng();
        self.trigger_with_rng(scene, &mut rng)
    }

    pub fn trigger_with_rng<S, R>(&mut self, scene: &mut S, rng: &mut R) -> Option<ScatterResult>
    where
        S: SceneApi + ?Sized,
        R: Rng + ?Sized,
    {
        match self.scatter_with_rng(scene, rng) {
            Ok(result) => {
                let message = format!(
                    "Placed {} instances of {} on {}.",
                    result.instance_count(),
                    self.scatter_object_name,
                    self.scatter_base_name
                );
                info!("{message}");
                self.last_message = Some(message);
                Some(result)
            }
            Err(e) => {
                warn!("Scatter aborted: {e}.");
                let message = match e.instances_left() {
                    0 => e.to_string(),
                    left => format!(
                        "{e}. {left} instances of {} remain in the scene.",
                        self.scatter_object_name
                    ),
                };
                self.last_message = Some(message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::Error;
    use crate::scene::MemoryScene;

    fn scene() -> MemoryScene {
        let vertices = (0..10).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let mut scene = MemoryScene::new()
            .with_transform("pTorus1")
            .with_shape("pTorusShape1")
            .with_mesh("pPlane1", Vec3::ZERO, vertices);
        scene.select_source_and_mesh_vertices("pTorus1", "pPlane1");
        scene
    }

    #[test]
    fn starts_with_placeholder_names() {
        let tool = ScatterTool::new();
        assert_eq!(tool.scatter_object_name, DEFAULT_OBJECT_NAME);
        assert_eq!(tool.scatter_base_name, DEFAULT_BASE_NAME);
        assert!(tool.last_message().is_none());
    }

    #[test]
    fn choosing_selection_updates_display_names() {
        let scene = scene();
        let mut tool = ScatterTool::new();
        assert_eq!(tool.select_scatter_object(&scene).unwrap(), "pTorus1");
        assert_eq!(tool.select_scatter_base(&scene).unwrap(), "pPlane1");
    }

    #[test]
    fn density_steps_by_ten_within_bounds() {
        let mut tool = ScatterTool::new();
        assert_eq!(tool.params.density, 100);
        assert_eq!(tool.increase_density(), 100);
        assert_eq!(tool.decrease_density(), 90);
        for _ in 0..20 {
            tool.decrease_density();
        }
        assert_eq!(tool.params.density, 1);
        assert_eq!(tool.increase_density(), 11);
    }

    #[test]
    fn trigger_reports_success() {
        let mut scene = scene();
        let mut tool =
            ScatterTool::new().with_params(ScatterParameters::new().with_density(40));
        let mut rng = StdRng::seed_from_u64(3);
        let result = tool.trigger_with_rng(&mut scene, &mut rng).unwrap();
        assert_eq!(result.instance_count(), 4);
        assert_eq!(tool.scatter_object_name, "pTorus1");
        assert_eq!(tool.scatter_base_name, "pPlane1");
        assert_eq!(
            tool.last_message(),
            Some("Placed 4 instances of pTorus1 on pPlane1.")
        );
    }

    #[test]
    fn trigger_turns_errors_into_messages() {
        let mut scene = scene();
        scene.select(["pTorusShape1", "pPlane1.vtx[0]"]);
        let mut tool = ScatterTool::new();
        assert!(tool.trigger(&mut scene).is_none());
        assert!(tool.last_message().unwrap().contains("transform"));
        assert_eq!(scene.instance_count(), 0);
        assert_eq!(tool.scatter_object_name, DEFAULT_OBJECT_NAME);
    }

    #[test]
    fn trigger_reports_instances_left_by_a_host_failure() {
        let mut scene = MemoryScene::new()
            .with_transform("pCone1")
            .with_mesh(
                "pPlane1",
                Vec3::ZERO,
                vec![Vec3::ZERO, Vec3::X, Vec3::Z],
            )
            .with_instance_limit(2);
        scene.select_source_and_mesh_vertices("pCone1", "pPlane1");
        let mut tool = ScatterTool::new();
        let mut rng = StdRng::seed_from_u64(5);

        assert!(tool.trigger_with_rng(&mut scene, &mut rng).is_none());
        assert_eq!(scene.instance_count(), 2);
        let message = tool.last_message().unwrap();
        assert!(message.contains("2 of 3"), "{message}");
        assert!(message.contains("instance limit reached"), "{message}");
        assert!(message.ends_with("2 instances of pCone1 remain in the scene."));
    }

    #[test]
    fn invalid_form_values_are_rejected_before_reading_selection() {
        let mut scene = scene();
        let mut tool =
            ScatterTool::new().with_params(ScatterParameters::new().with_scale_range(2.0, 1.0));
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            tool.scatter_with_rng(&mut scene, &mut rng),
            Err(Error::InvalidParameter(_))
        ));
        assert!(scene.ops().is_empty());
    }

    #[test]
    fn unseeded_scatter_places_full_density() {
        let mut scene = scene();
        let mut tool = ScatterTool::new();
        assert_eq!(tool.scatter(&mut scene).unwrap().instance_count(), 10);
    }
}
