//! 3D product viewer.
//!
//! The viewer owns the lifecycle around a retained-mode scene graph:
//!
//! ```text
//! Uninitialized --begin_load--> Loading --finish_load(Ok)--> Ready(Model)
//!                                       --finish_load(Err)-> Ready(Fallback)
//! ```
//!
//! While `Ready`, the camera auto-rotates unless the user is dragging (see
//! [`rotation`]). The scene graph itself sits behind [`SceneBackend`]; the
//! wasm crate implements it with three.js.

pub mod geometry;
pub mod rotation;

use crate::types::Color;

pub use geometry::{
    BoundingBox, Light, MeshSpec, Placement, Primitive, StageSetup, SurfaceSize, TARGET_SIZE,
    fallback_bag,
};
pub use rotation::{IDLE_RESUME, ResumeTicket, RotationController, RotationMode};

/// Why the model could not be shown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The asset could not be fetched.
    #[error("failed to fetch model: {0}")]
    Fetch(String),
    /// The asset was fetched but could not be parsed.
    #[error("failed to parse model: {0}")]
    Parse(String),
}

/// Which shape is on stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeSource {
    Model,
    Fallback,
}

/// Lifecycle state of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerPhase {
    Uninitialized,
    Loading,
    Ready(ShapeSource),
}

/// One-line status shown under the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusHint {
    Loading,
    DragToRotate,
    FallbackShown,
}

impl StatusHint {
    /// Text for the hint element.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Loading => "Loading 3D model…",
            Self::DragToRotate => "Drag to rotate",
            Self::FallbackShown => "Showing the default 3D model",
        }
    }
}

/// A successfully loaded model and its bounds before placement.
#[derive(Debug)]
pub struct LoadedModel<S> {
    pub shape: S,
    pub bounds: BoundingBox,
}

/// The scene graph, camera, renderer and orbit controls.
pub trait SceneBackend {
    /// Root object of a shape on stage.
    type Shape;

    /// Resize the render surface and update the camera aspect to match.
    fn resize(&mut self, size: SurfaceSize);

    /// Position `shape` and add it to the scene.
    fn add_shape(&mut self, shape: &Self::Shape, placement: Placement);

    /// Build a group from primitive meshes.
    fn build_fallback(&mut self, parts: &[MeshSpec]) -> Self::Shape;

    /// Set the material color of every mesh under `shape`.
    fn tint(&mut self, shape: &Self::Shape, color: &Color);

    /// Turn orbit-control auto-rotation on or off.
    fn set_auto_rotate(&mut self, enabled: bool);

    /// Advance control damping and draw one frame.
    fn render_frame(&mut self);

    /// Show a status line to the user.
    fn show_hint(&mut self, hint: StatusHint);
}

/// The viewer state machine over a [`SceneBackend`].
#[derive(Debug)]
pub struct Viewer<B: SceneBackend> {
    backend: B,
    phase: ViewerPhase,
    shape: Option<B::Shape>,
    color: Color,
    retint_on_load: bool,
    rotation: RotationController,
    size: SurfaceSize,
}

impl<B: SceneBackend> Viewer<B> {
    /// Wrap a freshly built stage and size it to its container.
    pub fn new(mut backend: B, size: SurfaceSize) -> Self {
        backend.resize(size);
        backend.set_auto_rotate(true);
        Self {
            backend,
            phase: ViewerPhase::Uninitialized,
            shape: None,
            color: Color::default(),
            retint_on_load: false,
            rotation: RotationController::new(),
            size,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> ViewerPhase {
        self.phase
    }

    /// Currently selected color.
    #[must_use]
    pub const fn color(&self) -> &Color {
        &self.color
    }

    /// Current rotation mode.
    #[must_use]
    pub const fn rotation_mode(&self) -> RotationMode {
        self.rotation.mode()
    }

    /// Current surface size.
    #[must_use]
    pub const fn size(&self) -> SurfaceSize {
        self.size
    }

    /// The backend, for inspection.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Enter `Loading`. Returns `false` if a load already started.
    pub fn begin_load(&mut self) -> bool {
        if self.phase != ViewerPhase::Uninitialized {
            return false;
        }
        self.phase = ViewerPhase::Loading;
        self.backend.show_hint(StatusHint::Loading);
        true
    }

    /// Complete the load with the model, or with the fallback on failure.
    ///
    /// Results arriving outside `Loading` are ignored and `false` is returned.
    pub fn finish_load(&mut self, result: Result<LoadedModel<B::Shape>, LoadError>) -> bool {
        if self.phase != ViewerPhase::Loading {
            tracing::debug!(phase = ?self.phase, "ignoring late model load result");
            return false;
        }

        let (shape, placement, source) = match result {
            Ok(LoadedModel { shape, bounds }) => {
                tracing::info!(?bounds, "3d model loaded");
                (shape, Placement::fit(&bounds, TARGET_SIZE), ShapeSource::Model)
            }
            Err(e) => {
                tracing::error!(error = %e, "3d model failed to load, using fallback");
                let shape = self.backend.build_fallback(&fallback_bag(&self.color));
                (shape, Placement::IDENTITY, ShapeSource::Fallback)
            }
        };

        self.backend.add_shape(&shape, placement);
        if self.retint_on_load && source == ShapeSource::Model {
            self.backend.tint(&shape, &self.color);
        }
        self.retint_on_load = false;
        self.shape = Some(shape);
        self.phase = ViewerPhase::Ready(source);
        self.backend.show_hint(match source {
            ShapeSource::Model => StatusHint::DragToRotate,
            ShapeSource::Fallback => StatusHint::FallbackShown,
        });
        true
    }

    /// Select a swatch color.
    ///
    /// Applied immediately when a shape is on stage, otherwise when the load
    /// completes.
    pub fn select_color(&mut self, color: Color) {
        self.color = color;
        match &self.shape {
            Some(shape) => self.backend.tint(shape, &self.color),
            None => self.retint_on_load = true,
        }
    }

    /// Pointer pressed on the stage.
    pub fn pointer_down(&mut self) {
        if self.rotation.pointer_down() {
            self.backend.set_auto_rotate(false);
        }
    }

    /// Pointer released; schedule the returned ticket after [`IDLE_RESUME`].
    pub fn pointer_up(&mut self) -> Option<ResumeTicket> {
        self.rotation.pointer_up()
    }

    /// Idle timer fired for `ticket`.
    pub fn resume_auto_rotate(&mut self, ticket: ResumeTicket) -> bool {
        let resumed = self.rotation.resume(ticket);
        if resumed {
            self.backend.set_auto_rotate(true);
        }
        resumed
    }

    /// Container resized.
    pub fn resize(&mut self, size: SurfaceSize) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.backend.resize(size);
    }

    /// Draw one frame.
    pub fn frame(&mut self) {
        self.backend.render_frame();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Shapes are indices into `FakeStage::shapes`.
    #[derive(Debug, Default)]
    struct FakeStage {
        shapes: Vec<FakeShape>,
        on_stage: Vec<usize>,
        surface: SurfaceSize,
        camera_aspect: f64,
        auto_rotate: bool,
        frames: u32,
        hints: Vec<StatusHint>,
    }

    #[derive(Debug)]
    struct FakeShape {
        mesh_colors: Vec<Color>,
        placement: Option<Placement>,
    }

    impl FakeStage {
        fn model(&mut self, meshes: usize) -> usize {
            self.shapes.push(FakeShape {
                mesh_colors: vec![Color::parse("#ff0000").unwrap(); meshes],
                placement: None,
            });
            self.shapes.len() - 1
        }
    }

    impl SceneBackend for FakeStage {
        type Shape = usize;

        fn resize(&mut self, size: SurfaceSize) {
            self.surface = size;
            self.camera_aspect = size.aspect();
        }

        fn add_shape(&mut self, shape: &usize, placement: Placement) {
            self.shapes[*shape].placement = Some(placement);
            self.on_stage.push(*shape);
        }

        fn build_fallback(&mut self, parts: &[MeshSpec]) -> usize {
            self.shapes.push(FakeShape {
                mesh_colors: parts.iter().map(|p| p.color.clone()).collect(),
                placement: None,
            });
            self.shapes.len() - 1
        }

        fn tint(&mut self, shape: &usize, color: &Color) {
            for mesh in &mut self.shapes[*shape].mesh_colors {
                *mesh = color.clone();
            }
        }

        fn set_auto_rotate(&mut self, enabled: bool) {
            self.auto_rotate = enabled;
        }

        fn render_frame(&mut self) {
            self.frames += 1;
        }

        fn show_hint(&mut self, hint: StatusHint) {
            self.hints.push(hint);
        }
    }

    fn viewer() -> Viewer<FakeStage> {
        Viewer::new(FakeStage::default(), SurfaceSize::new(600, 400))
    }

    fn on_stage_colors(viewer: &Viewer<FakeStage>) -> Vec<Color> {
        let stage = viewer.backend();
        let index = *stage.on_stage.last().unwrap();
        stage.shapes[index].mesh_colors.clone()
    }

    #[test]
    fn test_new_sizes_surface_and_rotates() {
        let viewer = viewer();
        assert_eq!(viewer.phase(), ViewerPhase::Uninitialized);
        assert_eq!(viewer.backend().surface, SurfaceSize::new(600, 400));
        assert!(viewer.backend().auto_rotate);
    }

    #[test]
    fn test_failed_load_shows_fallback_in_active_color() {
        let mut viewer = viewer();
        let swatch = Color::parse("#b91c1c").unwrap();
        viewer.select_color(swatch.clone());
        assert!(viewer.begin_load());
        assert!(viewer.finish_load(Err(LoadError::Fetch("404".to_string()))));

        assert_eq!(viewer.phase(), ViewerPhase::Ready(ShapeSource::Fallback));
        assert_eq!(on_stage_colors(&viewer), vec![swatch; 3]);
        assert_eq!(
            viewer.backend().hints,
            vec![StatusHint::Loading, StatusHint::FallbackShown]
        );
    }

    #[test]
    fn test_model_is_fitted_and_hint_updated() {
        let mut viewer = viewer();
        viewer.begin_load();
        let shape = viewer.backend.model(2);
        let bounds = BoundingBox::new([-1.0, 0.0, -1.0], [1.0, 5.0, 1.0]);
        viewer.finish_load(Ok(LoadedModel { shape, bounds }));

        let placement = viewer.backend().shapes[shape].placement.unwrap();
        assert!((placement.scale - 0.5).abs() < 1e-6);
        assert!((placement.translation[1] + 1.25).abs() < 1e-6);
        assert_eq!(viewer.phase(), ViewerPhase::Ready(ShapeSource::Model));
        assert_eq!(viewer.backend().hints.last(), Some(&StatusHint::DragToRotate));
    }

    #[test]
    fn test_color_chosen_during_load_applies_to_model() {
        let mut viewer = viewer();
        viewer.begin_load();
        let beige = Color::parse("#d6b48c").unwrap();
        viewer.select_color(beige.clone());
        let shape = viewer.backend.model(4);
        let bounds = BoundingBox::new([0.0; 3], [1.0; 3]);
        viewer.finish_load(Ok(LoadedModel { shape, bounds }));
        assert_eq!(on_stage_colors(&viewer), vec![beige; 4]);
    }

    #[test]
    fn test_model_keeps_its_materials_without_selection() {
        let mut viewer = viewer();
        viewer.begin_load();
        let shape = viewer.backend.model(1);
        let bounds = BoundingBox::new([0.0; 3], [1.0; 3]);
        viewer.finish_load(Ok(LoadedModel { shape, bounds }));
        assert_eq!(on_stage_colors(&viewer), vec![Color::parse("#ff0000").unwrap()]);
    }

    #[test]
    fn test_color_after_load_tints_every_mesh() {
        let mut viewer = viewer();
        viewer.begin_load();
        viewer.finish_load(Err(LoadError::Parse("bad glb".to_string())));
        let stone = Color::parse("#f5f5f4").unwrap();
        viewer.select_color(stone.clone());
        assert_eq!(on_stage_colors(&viewer), vec![stone; 3]);
    }

    #[test]
    fn test_late_result_is_ignored() {
        let mut viewer = viewer();
        assert!(!viewer.finish_load(Err(LoadError::Fetch("early".to_string()))));
        viewer.begin_load();
        viewer.finish_load(Err(LoadError::Fetch("first".to_string())));
        assert!(!viewer.finish_load(Err(LoadError::Fetch("second".to_string()))));
        assert_eq!(viewer.backend().on_stage.len(), 1);
        assert!(!viewer.begin_load());
    }

    #[test]
    fn test_resize_keeps_model() {
        let mut viewer = viewer();
        viewer.begin_load();
        let shape = viewer.backend.model(1);
        let bounds = BoundingBox::new([0.0; 3], [2.0; 3]);
        viewer.finish_load(Ok(LoadedModel { shape, bounds }));

        viewer.resize(SurfaceSize::new(1200, 300));
        assert_eq!(viewer.backend().surface, SurfaceSize::new(1200, 300));
        assert!((viewer.backend().camera_aspect - 4.0).abs() < f64::EPSILON);
        assert_eq!(viewer.backend().on_stage, vec![shape]);
        assert_eq!(viewer.backend().shapes.len(), 1);
        assert_eq!(viewer.phase(), ViewerPhase::Ready(ShapeSource::Model));
    }

    #[test]
    fn test_drag_stops_rotation_until_idle_ticket() {
        let mut viewer = viewer();
        viewer.pointer_down();
        assert!(!viewer.backend().auto_rotate);
        let stale = viewer.pointer_up().unwrap();
        viewer.pointer_down();
        let fresh = viewer.pointer_up().unwrap();

        assert!(!viewer.resume_auto_rotate(stale));
        assert!(!viewer.backend().auto_rotate);
        assert!(viewer.resume_auto_rotate(fresh));
        assert!(viewer.backend().auto_rotate);
        assert_eq!(viewer.rotation_mode(), RotationMode::AutoRotating);
    }

    #[test]
    fn test_frame_renders() {
        let mut viewer = viewer();
        viewer.frame();
        viewer.frame();
        assert_eq!(viewer.backend().frames, 2);
    }
}
