// src/render.rs
//
// Visualization port. The core never depends on a rendering capability:
// it hands out a latent-space snapshot on demand and defines the seams a
// renderer plugs into. Dimensionality reduction and rasterization are
// external collaborators.

use serde::{Deserialize, Serialize};

use crate::types::Embedding;

/// Snapshot of the latent space handed to the render path: every user and
/// item embedding plus the index of the active user, all in creation
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderScene {
    pub users: Vec<Embedding>,
    pub items: Vec<Embedding>,
    pub active_user: usize,
}

/// Projects high-dimensional points down to 2-D coordinates.
pub trait Projector {
    fn project(&self, points: &[Embedding]) -> Vec<[f64; 2]>;
}

/// Passthrough projection for spaces that are already at most 2-D:
/// 2-D points map to themselves, 1-D points land on the x axis.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityProjector;

impl Projector for IdentityProjector {
    fn project(&self, points: &[Embedding]) -> Vec<[f64; 2]> {
        points
            .iter()
            .map(|p| {
                [
                    p.first().copied().unwrap_or(0.0),
                    p.get(1).copied().unwrap_or(0.0),
                ]
            })
            .collect()
    }
}

/// A raster frame produced by a renderer. Tightly packed RGB, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Turns a scene into a raster image. Implementations live outside the
/// core; `None` means the renderer produced no frame.
pub trait Renderer {
    fn render(&mut self, scene: &RenderScene) -> Option<Frame>;
}

/// Renderer that discards every scene.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&mut self, _scene: &RenderScene) -> Option<Frame> {
        None
    }
}
