//! Thin owned wrappers over raw `gl` calls: shader program table, vertex
//! geometry, 2D textures and a minimal renderer. Every type assumes a current
//! OpenGL context on the calling thread.

/// Unit quad with per-vertex color and texture coordinates.
/// Layout per vertex: vec2 position, vec3 color, vec2 uv.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 28] = [
    -0.5,  0.5, 1.0, 0.0, 0.0, 0.0, 0.0, // top-left
     0.5,  0.5, 0.0, 1.0, 0.0, 1.0, 0.0, // top-right
     0.5, -0.5, 0.0, 0.0, 1.0, 1.0, 1.0, // bottom-right
    -0.5, -0.5, 1.0, 1.0, 1.0, 0.0, 1.0, // bottom-left
];

#[rustfmt::skip]
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 2,
    0, 2, 3,
];

pub mod backend;
pub mod geometry;
pub mod program;
pub mod renderer;
pub mod texture;
