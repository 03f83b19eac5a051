//! Stage constants, model fitting and the procedural fallback shape.

use core::f32::consts::PI;

use crate::types::Color;

/// Largest bounding-box dimension of a fitted model, in scene units.
pub const TARGET_SIZE: f32 = 2.5;

/// Camera, lights and orbit controls for the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSetup {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub camera_z: f64,
    pub ambient: Light,
    pub directional: Light,
    pub directional_position: [f64; 3],
    pub damping_factor: f64,
    pub enable_zoom: bool,
    pub auto_rotate_speed: f64,
    pub max_pixel_ratio: f64,
}

/// A light's color and intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: &'static str,
    pub intensity: f64,
}

impl Default for StageSetup {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 5.0,
            ambient: Light {
                color: "#ffffff",
                intensity: 0.6,
            },
            directional: Light {
                color: "#ffffff",
                intensity: 0.8,
            },
            directional_position: [5.0, 5.0, 5.0],
            damping_factor: 0.05,
            enable_zoom: false,
            auto_rotate_speed: 2.0,
            max_pixel_ratio: 2.0,
        }
    }
}

/// Render surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Create a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Camera aspect ratio; 1.0 for a zero-height surface.
    #[must_use]
    pub fn aspect(self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Axis-aligned bounding box of a loaded model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    /// Create a box from its corners.
    #[must_use]
    pub const fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> [f32; 3] {
        let [x0, y0, z0] = self.min;
        let [x1, y1, z1] = self.max;
        [(x0 + x1) / 2.0, (y0 + y1) / 2.0, (z0 + z1) / 2.0]
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> [f32; 3] {
        let [x0, y0, z0] = self.min;
        let [x1, y1, z1] = self.max;
        [x1 - x0, y1 - y0, z1 - z0]
    }

    /// Largest extent.
    #[must_use]
    pub fn max_dimension(&self) -> f32 {
        let [x, y, z] = self.size();
        x.max(y).max(z)
    }
}

/// Translation and uniform scale applied to a shape's root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub translation: [f32; 3],
    pub scale: f32,
}

impl Placement {
    /// Leave the shape where it was built.
    pub const IDENTITY: Self = Self {
        translation: [0.0, 0.0, 0.0],
        scale: 1.0,
    };

    /// Scale so the largest dimension equals `target`, then move the scaled
    /// center onto the origin.
    ///
    /// Empty or non-finite boxes keep scale 1 and are only centered.
    #[must_use]
    pub fn fit(bounds: &BoundingBox, target: f32) -> Self {
        let max_dim = bounds.max_dimension();
        let scale = if max_dim.is_finite() && max_dim > f32::EPSILON {
            target / max_dim
        } else {
            1.0
        };
        let [cx, cy, cz] = bounds.center();
        let center = |c: f32| if c.is_finite() { -c * scale } else { 0.0 };
        Self {
            translation: [center(cx), center(cy), center(cz)],
            scale,
        }
    }
}

/// Geometry of one fallback mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Torus {
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
    },
}

/// One mesh of the fallback shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSpec {
    pub primitive: Primitive,
    pub color: Color,
    pub metalness: f64,
    pub roughness: f64,
    pub position: [f64; 3],
    pub rotation_z: f64,
}

/// The stand-in bag shown when the model cannot be loaded: a body box and two
/// ring handles, every part in `color`.
#[must_use]
pub fn fallback_bag(color: &Color) -> Vec<MeshSpec> {
    let handle = |x: f64, rotation_z: f64| MeshSpec {
        primitive: Primitive::Torus {
            radius: 0.7,
            tube: 0.12,
            radial_segments: 8,
            tubular_segments: 32,
        },
        color: color.clone(),
        metalness: 0.2,
        roughness: 0.3,
        position: [x, 1.4, 0.0],
        rotation_z,
    };
    let tilt = f64::from(PI) / 6.0;

    vec![
        MeshSpec {
            primitive: Primitive::Box {
                width: 2.5,
                height: 2.0,
                depth: 1.2,
            },
            color: color.clone(),
            metalness: 0.1,
            roughness: 0.4,
            position: [0.0, 0.0, 0.0],
            rotation_z: 0.0,
        },
        handle(-0.8, tilt),
        handle(0.8, -tilt),
    ]
}
