//! Bindings to the subset of three.js the stage uses.
//!
//! The page bootstrap imports three.js as an ES module and exposes it as
//! `window.THREE`, with the `OrbitControls` and `GLTFLoader` addons attached to
//! the same namespace, before it starts this module.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    // -------------------------------------------------------------------------
    // Math
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    pub type Vector3;

    #[wasm_bindgen(method)]
    pub fn set(this: &Vector3, x: f64, y: f64, z: f64) -> Vector3;

    #[wasm_bindgen(method, js_name = setScalar)]
    pub fn set_scalar(this: &Vector3, s: f64) -> Vector3;

    #[wasm_bindgen(method, getter)]
    pub fn x(this: &Vector3) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn y(this: &Vector3) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn z(this: &Vector3) -> f64;

    #[derive(Debug, Clone)]
    pub type Euler;

    #[wasm_bindgen(method, setter)]
    pub fn set_z(this: &Euler, z: f64);

    #[derive(Debug, Clone)]
    pub type Box3;

    #[wasm_bindgen(constructor)]
    pub fn new() -> Box3;

    #[wasm_bindgen(method, js_name = setFromObject)]
    pub fn set_from_object(this: &Box3, object: &Object3D) -> Box3;

    #[wasm_bindgen(method, getter)]
    pub fn min(this: &Box3) -> Vector3;

    #[wasm_bindgen(method, getter)]
    pub fn max(this: &Box3) -> Vector3;

    #[derive(Debug, Clone)]
    pub type Color;

    #[wasm_bindgen(method, js_name = set)]
    pub fn set_style(this: &Color, style: &str) -> Color;

    // -------------------------------------------------------------------------
    // Scene graph
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    pub type Object3D;

    #[wasm_bindgen(method)]
    pub fn add(this: &Object3D, child: &Object3D);

    #[wasm_bindgen(method, getter)]
    pub fn position(this: &Object3D) -> Vector3;

    #[wasm_bindgen(method, getter)]
    pub fn scale(this: &Object3D) -> Vector3;

    #[wasm_bindgen(method, getter)]
    pub fn rotation(this: &Object3D) -> Euler;

    #[wasm_bindgen(method)]
    pub fn traverse(this: &Object3D, callback: &js_sys::Function);

    #[wasm_bindgen(method, getter = isMesh)]
    pub fn is_mesh(this: &Object3D) -> Option<bool>;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type Scene;

    #[wasm_bindgen(constructor)]
    pub fn new() -> Scene;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type Group;

    #[wasm_bindgen(constructor)]
    pub fn new() -> Group;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type Mesh;

    #[wasm_bindgen(constructor)]
    pub fn new(geometry: &BufferGeometry, material: &Material) -> Mesh;

    #[wasm_bindgen(method, getter)]
    pub fn material(this: &Mesh) -> JsValue;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type PerspectiveCamera;

    #[wasm_bindgen(constructor)]
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64) -> PerspectiveCamera;

    #[wasm_bindgen(method, setter)]
    pub fn set_aspect(this: &PerspectiveCamera, aspect: f64);

    #[wasm_bindgen(method, js_name = updateProjectionMatrix)]
    pub fn update_projection_matrix(this: &PerspectiveCamera);

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type AmbientLight;

    #[wasm_bindgen(constructor)]
    pub fn new(color: &str, intensity: f64) -> AmbientLight;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type DirectionalLight;

    #[wasm_bindgen(constructor)]
    pub fn new(color: &str, intensity: f64) -> DirectionalLight;

    // -------------------------------------------------------------------------
    // Geometry and materials
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    pub type BufferGeometry;

    #[wasm_bindgen(extends = BufferGeometry)]
    #[derive(Debug, Clone)]
    pub type BoxGeometry;

    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, depth: f64) -> BoxGeometry;

    #[wasm_bindgen(extends = BufferGeometry)]
    #[derive(Debug, Clone)]
    pub type TorusGeometry;

    #[wasm_bindgen(constructor)]
    pub fn new(
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> TorusGeometry;

    #[derive(Debug, Clone)]
    pub type Material;

    #[wasm_bindgen(method, getter)]
    pub fn color(this: &Material) -> Option<Color>;

    #[wasm_bindgen(extends = Material)]
    #[derive(Debug, Clone)]
    pub type MeshStandardMaterial;

    #[wasm_bindgen(constructor)]
    pub fn new(parameters: &js_sys::Object) -> MeshStandardMaterial;

    // -------------------------------------------------------------------------
    // Renderer
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    pub type WebGLRenderer;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(parameters: &js_sys::Object) -> Result<WebGLRenderer, JsValue>;

    #[wasm_bindgen(method, js_name = setPixelRatio)]
    pub fn set_pixel_ratio(this: &WebGLRenderer, ratio: f64);

    #[wasm_bindgen(method, js_name = setSize)]
    pub fn set_size(this: &WebGLRenderer, width: f64, height: f64, update_style: bool);

    #[wasm_bindgen(method)]
    pub fn render(this: &WebGLRenderer, scene: &Scene, camera: &PerspectiveCamera);

    // -------------------------------------------------------------------------
    // Addons
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    pub type OrbitControls;

    #[wasm_bindgen(constructor)]
    pub fn new(camera: &PerspectiveCamera, dom_element: &web_sys::HtmlElement) -> OrbitControls;

    #[wasm_bindgen(method, setter = enableDamping)]
    pub fn set_enable_damping(this: &OrbitControls, on: bool);

    #[wasm_bindgen(method, setter = dampingFactor)]
    pub fn set_damping_factor(this: &OrbitControls, factor: f64);

    #[wasm_bindgen(method, setter = enableZoom)]
    pub fn set_enable_zoom(this: &OrbitControls, on: bool);

    #[wasm_bindgen(method, setter = autoRotate)]
    pub fn set_auto_rotate(this: &OrbitControls, on: bool);

    #[wasm_bindgen(method, setter = autoRotateSpeed)]
    pub fn set_auto_rotate_speed(this: &OrbitControls, speed: f64);

    #[wasm_bindgen(method)]
    pub fn update(this: &OrbitControls) -> bool;

    #[derive(Debug, Clone)]
    pub type GLTFLoader;

    #[wasm_bindgen(constructor)]
    pub fn new() -> GLTFLoader;

    #[wasm_bindgen(method, js_name = loadAsync)]
    pub fn load_async(
        this: &GLTFLoader,
        url: &str,
        on_progress: &js_sys::Function,
    ) -> js_sys::Promise;
}

/// Build a plain `{key: value}` parameter object.
pub fn params(entries: &[(&str, JsValue)]) -> js_sys::Object {
    let object = js_sys::Object::new();
    for (key, value) in entries {
        if js_sys::Reflect::set(&object, &JsValue::from_str(key), value).is_err() {
            tracing::debug!(key, "could not set three.js parameter");
        }
    }
    object
}
