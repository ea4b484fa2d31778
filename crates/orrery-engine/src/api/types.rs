use bytemuck::{Pod, Zeroable};

/// A scene event communicated from Rust to TypeScript.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SceneEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32, a: f32) -> Self {
        Self {
            kind: kind as f32,
            a,
            b: 0.0,
            c: 0.0,
        }
    }

    pub fn with_payload(mut self, b: f32, c: f32) -> Self {
        self.b = b;
        self.c = c;
        self
    }
}

/// Static meshes exposed to the renderer by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Planet = 0,
    Sun = 1,
    Satellite = 2,
}

impl MeshKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Planet),
            1 => Some(Self::Sun),
            2 => Some(Self::Satellite),
            _ => None,
        }
    }
}
