//! three.js stage for the 3D viewer.
//!
//! [`ThreeStage`] implements [`SceneBackend`] over the three.js bindings; the
//! rest of this module wires the [`Viewer`] to the canvas: model loading,
//! the animation frame loop, resizing, drag detection and the color swatches.

use std::cell::RefCell;
use std::rc::Rc;

use vibe_bagshop_core::features::{classes, ids};
use vibe_bagshop_core::viewer::{
    BoundingBox, IDLE_RESUME, LoadError, LoadedModel, MeshSpec, Placement, Primitive,
    StageSetup, StatusHint, SurfaceSize,
};
use vibe_bagshop_core::{Color, SceneBackend, Viewer};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlCanvasElement};

use crate::dom;
use crate::three::{
    self, AmbientLight, Box3, BoxGeometry, BufferGeometry, DirectionalLight, GLTFLoader, Group,
    Material, Mesh, MeshStandardMaterial, Object3D, OrbitControls, PerspectiveCamera, Scene,
    TorusGeometry, Vector3, WebGLRenderer,
};
use crate::timer::Deferred;

/// Canvas attribute naming the model to load.
const MODEL_SRC_ATTR: &str = "data-model-src";

// =============================================================================
// Scene backend
// =============================================================================

/// Scene, camera, renderer and orbit controls bound to one canvas.
#[derive(Debug)]
pub struct ThreeStage {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: WebGLRenderer,
    controls: OrbitControls,
    hint: Option<Element>,
}

impl ThreeStage {
    /// Build the stage on `canvas` with `setup`.
    pub fn new(
        canvas: &HtmlCanvasElement,
        setup: &StageSetup,
        hint: Option<Element>,
    ) -> Result<Self, JsValue> {
        let scene = Scene::new();

        let camera = PerspectiveCamera::new(setup.fov_deg, 1.0, setup.near, setup.far);
        camera.position().set(0.0, 0.0, setup.camera_z);

        let renderer = WebGLRenderer::new(&three::params(&[
            ("canvas", JsValue::from(canvas.clone())),
            ("antialias", JsValue::TRUE),
            ("alpha", JsValue::TRUE),
        ]))?;
        let device_ratio = dom::window()?.device_pixel_ratio();
        renderer.set_pixel_ratio(device_ratio.min(setup.max_pixel_ratio));

        scene.add(&AmbientLight::new(setup.ambient.color, setup.ambient.intensity));
        let sun = DirectionalLight::new(setup.directional.color, setup.directional.intensity);
        let [x, y, z] = setup.directional_position;
        sun.position().set(x, y, z);
        scene.add(&sun);

        let controls = OrbitControls::new(&camera, canvas);
        controls.set_enable_damping(true);
        controls.set_damping_factor(setup.damping_factor);
        controls.set_enable_zoom(setup.enable_zoom);
        controls.set_auto_rotate_speed(setup.auto_rotate_speed);

        Ok(Self {
            scene,
            camera,
            renderer,
            controls,
            hint,
        })
    }
}

impl SceneBackend for ThreeStage {
    type Shape = Object3D;

    fn resize(&mut self, size: SurfaceSize) {
        self.camera.set_aspect(size.aspect());
        self.camera.update_projection_matrix();
        self.renderer
            .set_size(f64::from(size.width), f64::from(size.height), true);
    }

    fn add_shape(&mut self, shape: &Object3D, placement: Placement) {
        let [x, y, z] = placement.translation;
        shape.scale().set_scalar(f64::from(placement.scale));
        shape
            .position()
            .set(f64::from(x), f64::from(y), f64::from(z));
        self.scene.add(shape);
    }

    fn build_fallback(&mut self, parts: &[MeshSpec]) -> Object3D {
        let group = Group::new();
        for part in parts {
            group.add(&mesh_for(part));
        }
        group.into()
    }

    fn tint(&mut self, shape: &Object3D, color: &Color) {
        let hex = color.as_str().to_owned();
        let visit = Closure::<dyn FnMut(Object3D)>::new(move |child: Object3D| {
            if child.is_mesh() == Some(true) {
                tint_materials(&child.unchecked_into::<Mesh>().material(), &hex);
            }
        });
        // `traverse` is synchronous; the closure may drop afterwards.
        shape.traverse(visit.as_ref().unchecked_ref());
    }

    fn set_auto_rotate(&mut self, enabled: bool) {
        self.controls.set_auto_rotate(enabled);
    }

    fn render_frame(&mut self) {
        self.controls.update();
        self.renderer.render(&self.scene, &self.camera);
    }

    fn show_hint(&mut self, hint: StatusHint) {
        if let Some(el) = &self.hint {
            el.set_text_content(Some(hint.text()));
        }
    }
}

fn mesh_for(part: &MeshSpec) -> Mesh {
    let geometry: BufferGeometry = match part.primitive {
        Primitive::Box {
            width,
            height,
            depth,
        } => BoxGeometry::new(width, height, depth).into(),
        Primitive::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => TorusGeometry::new(radius, tube, radial_segments, tubular_segments).into(),
    };
    let material = MeshStandardMaterial::new(&three::params(&[
        ("color", part.color.as_str().into()),
        ("metalness", part.metalness.into()),
        ("roughness", part.roughness.into()),
    ]));

    let mesh = Mesh::new(&geometry, &material);
    let [x, y, z] = part.position;
    mesh.position().set(x, y, z);
    mesh.rotation().set_z(part.rotation_z);
    mesh
}

/// A mesh's `material` is either one material or an array of them.
fn tint_materials(material: &JsValue, hex: &str) {
    if js_sys::Array::is_array(material) {
        for m in js_sys::Array::from(material).iter() {
            tint_material(m.unchecked_ref(), hex);
        }
    } else if !material.is_undefined() && !material.is_null() {
        tint_material(material.unchecked_ref(), hex);
    }
}

fn tint_material(material: &Material, hex: &str) {
    if let Some(color) = material.color() {
        color.set_style(hex);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn bounds_of(shape: &Object3D) -> BoundingBox {
    let bounds = Box3::new().set_from_object(shape);
    let corner = |v: Vector3| [v.x() as f32, v.y() as f32, v.z() as f32];
    BoundingBox::new(corner(bounds.min()), corner(bounds.max()))
}

// =============================================================================
// Page wiring
// =============================================================================

/// The viewer plus its pending auto-rotate resume.
#[derive(Debug)]
struct Stage {
    viewer: Viewer<ThreeStage>,
    resume: Option<Deferred>,
}

type SharedStage = Rc<RefCell<Stage>>;

/// Mount the viewer on `#bagCanvas` and start loading the model.
pub fn mount(doc: &Document) -> Result<(), JsValue> {
    let canvas: HtmlCanvasElement = dom::by_id(doc, ids::BAG_CANVAS)
        .ok_or_else(|| JsValue::from_str("#bagCanvas is not a canvas"))?;
    let hint = doc.query_selector(&format!(".{}", classes::STAGE_HINT))?;

    let backend = ThreeStage::new(&canvas, &StageSetup::default(), hint)?;
    let viewer = Viewer::new(backend, surface_size(&canvas));
    let stage = Rc::new(RefCell::new(Stage {
        viewer,
        resume: None,
    }));

    bind_swatches(doc, &stage)?;
    bind_pointer(&canvas, &stage)?;
    bind_resize(&canvas, &stage)?;
    start_frame_loop(Rc::clone(&stage))?;
    load_model(&canvas, stage);
    Ok(())
}

/// Size of the canvas container in CSS pixels.
fn surface_size(canvas: &HtmlCanvasElement) -> SurfaceSize {
    let px = |v: i32| u32::try_from(v).unwrap_or(0);
    match canvas.parent_element() {
        Some(container) => SurfaceSize::new(px(container.client_width()), px(container.client_height())),
        None => SurfaceSize::new(px(canvas.client_width()), px(canvas.client_height())),
    }
}

fn load_model(canvas: &HtmlCanvasElement, stage: SharedStage) {
    stage.borrow_mut().viewer.begin_load();

    let Some(src) = canvas
        .get_attribute(MODEL_SRC_ATTR)
        .filter(|src| !src.trim().is_empty())
    else {
        let missing = LoadError::Fetch(format!("canvas has no {MODEL_SRC_ATTR}"));
        stage.borrow_mut().viewer.finish_load(Err(missing));
        return;
    };

    spawn_local(async move {
        let result = fetch_model(&src).await;
        stage.borrow_mut().viewer.finish_load(result);
    });
}

async fn fetch_model(src: &str) -> Result<LoadedModel<Object3D>, LoadError> {
    let on_progress = Closure::<dyn FnMut(JsValue)>::new(|event: JsValue| {
        let field = |name: &str| {
            js_sys::Reflect::get(&event, &JsValue::from_str(name))
                .ok()
                .and_then(|v| v.as_f64())
        };
        tracing::debug!(loaded = field("loaded"), total = field("total"), "model download progress");
    });

    tracing::debug!(src, "loading 3d model");
    let promise = GLTFLoader::new().load_async(src, on_progress.as_ref().unchecked_ref());
    let gltf = JsFuture::from(promise)
        .await
        .map_err(|e| LoadError::Fetch(describe(&e)))?;

    let scene = js_sys::Reflect::get(&gltf, &JsValue::from_str("scene"))
        .map_err(|e| LoadError::Parse(describe(&e)))?;
    if scene.is_undefined() || scene.is_null() {
        return Err(LoadError::Parse("asset has no scene".to_string()));
    }

    let shape: Object3D = scene.unchecked_into();
    let bounds = bounds_of(&shape);
    Ok(LoadedModel { shape, bounds })
}

fn describe(error: &JsValue) -> String {
    error
        .as_string()
        .or_else(|| {
            error
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{error:?}"))
}

fn bind_pointer(canvas: &HtmlCanvasElement, stage: &SharedStage) -> Result<(), JsValue> {
    let down = Rc::clone(stage);
    dom::listen(canvas, "pointerdown", move |_| {
        let mut stage = down.borrow_mut();
        stage.resume = None;
        stage.viewer.pointer_down();
    })?;

    for event in ["pointerup", "pointercancel"] {
        let up = Rc::clone(stage);
        dom::listen(canvas, event, move |_| schedule_resume(&up))?;
    }
    Ok(())
}

/// Arm the idle timer; replacing the previous one cancels it.
fn schedule_resume(stage: &SharedStage) {
    let Some(ticket) = stage.borrow_mut().viewer.pointer_up() else {
        return;
    };
    let fire = Rc::clone(stage);
    let delay = i32::try_from(IDLE_RESUME.as_millis()).unwrap_or(i32::MAX);
    match Deferred::new(delay, move || {
        fire.borrow_mut().viewer.resume_auto_rotate(ticket);
    }) {
        Ok(timer) => stage.borrow_mut().resume = Some(timer),
        Err(e) => tracing::warn!(?e, "could not schedule auto-rotate resume"),
    }
}

fn bind_resize(canvas: &HtmlCanvasElement, stage: &SharedStage) -> Result<(), JsValue> {
    let canvas = canvas.clone();
    let stage = Rc::clone(stage);
    dom::listen(&dom::window()?, "resize", move |_| {
        stage.borrow_mut().viewer.resize(surface_size(&canvas));
    })
}

fn start_frame_loop(stage: SharedStage) -> Result<(), JsValue> {
    fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
        dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
        Ok(())
    }

    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&frame);

    *frame.borrow_mut() = Some(Closure::new(move || {
        stage.borrow_mut().viewer.frame();
        if let Some(callback) = next.borrow().as_ref() {
            dom::log_err("animation frame", request_frame(callback));
        }
    }));

    match frame.borrow().as_ref() {
        Some(callback) => request_frame(callback),
        None => Ok(()),
    }
}

fn bind_swatches(doc: &Document, stage: &SharedStage) -> Result<(), JsValue> {
    let found = doc.query_selector_all(&format!(".{}", classes::SWATCH))?;
    let swatches: Rc<Vec<Element>> = Rc::new(
        (0..found.length())
            .filter_map(|i| found.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
    );

    for swatch in swatches.iter() {
        paint_swatch(swatch);
        let all = Rc::clone(&swatches);
        let chosen = swatch.clone();
        let stage = Rc::clone(stage);
        dom::listen(swatch, "click", move |_| select_swatch(&all, &chosen, &stage))?;
    }

    if let Some(first) = swatches.first() {
        select_swatch(&swatches, first, stage);
    }
    Ok(())
}

/// Fill the button with its own color. Set through the CSSOM because the
/// page's CSP rejects inline style attributes.
fn paint_swatch(swatch: &Element) {
    let Some(html) = swatch.dyn_ref::<web_sys::HtmlElement>() else {
        return;
    };
    if let Some(raw) = swatch.get_attribute("data-color")
        && let Ok(color) = Color::parse(&raw)
        && let Err(e) = html.style().set_property("background-color", color.as_str())
    {
        tracing::debug!(?e, "swatch paint failed");
    }
}

fn select_swatch(all: &[Element], chosen: &Element, stage: &SharedStage) {
    let Some(raw) = chosen.get_attribute("data-color") else {
        return;
    };
    let color = match Color::parse(&raw) {
        Ok(color) => color,
        Err(e) => {
            tracing::warn!(color = %raw, error = %e, "ignoring swatch with invalid color");
            return;
        }
    };

    let chosen_node: &web_sys::Node = chosen;
    for swatch in all {
        dom::toggle_class(swatch, classes::ACTIVE, swatch.is_same_node(Some(chosen_node)));
    }
    stage.borrow_mut().viewer.select_color(color);
}
