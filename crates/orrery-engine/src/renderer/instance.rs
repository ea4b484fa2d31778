//! Per-frame render records written for the TypeScript renderer.
//!
//! Every record is `#[repr(C)]` + `Pod` so a `Vec` of them can be handed to
//! JS as a flat `Float32Array` view into wasm memory.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::systems::lighting::LightUniform;

/// Column-major 4×4 matrix as written to the wire.
pub type MatrixData = [[f32; 4]; 4];

/// Per-frame uniforms shared by every draw call.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Projection × view for everything in world space.
    pub view_proj: MatrixData,
    /// Projection × view-without-translation for the starfield (far plane pushed out).
    pub sky_view_proj: MatrixData,
    /// Planet model matrix (spin about +Y).
    pub planet_model: MatrixData,
    /// Sun model matrix (translate × scale).
    pub sun_model: MatrixData,
    pub light: LightUniform,
    /// Camera eye position (w unused).
    pub camera_eye: [f32; 4],
    /// Thruster particle point size.
    pub point_size: f32,
    /// Simulation time in seconds (drives star twinkle).
    pub time: f32,
    /// Interpolation alpha between fixed ticks.
    pub alpha: f32,
    pub _pad: f32,
}

impl FrameUniforms {
    pub const FLOATS: usize = 16 * 4 + LightUniform::FLOATS + 4 + 4;
}

impl Default for FrameUniforms {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            view_proj: identity,
            sky_view_proj: identity,
            planet_model: identity,
            sun_model: identity,
            light: LightUniform::zeroed(),
            camera_eye: [0.0; 4],
            point_size: 1.0,
            time: 0.0,
            alpha: 0.0,
            _pad: 0.0,
        }
    }
}

/// One satellite draw: its model matrix.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ModelInstance {
    pub model: MatrixData,
}

impl ModelInstance {
    pub const FLOATS: usize = 16;

    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

/// Thruster particle point: position + remaining life (fades in the shader).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub life: f32,
}

impl ParticleVertex {
    pub const FLOATS: usize = 4;
}

/// Comet head sprite plus the parameters for its glow pass and tail strip.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CometHead {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Head point size.
    pub size: f32,
    /// Unit direction from the sun to the head (tail orientation hint).
    pub dir_x: f32,
    pub dir_y: f32,
    pub dir_z: f32,
    /// Glow point size.
    pub glow_size: f32,
    /// Emissive intensity of the head.
    pub intensity: f32,
    /// Intensity of the glow pass.
    pub glow_intensity: f32,
    /// Tail line thickness.
    pub tail_width: f32,
    /// Tail glow strength.
    pub tail_glow: f32,
}

impl CometHead {
    pub const FLOATS: usize = 12;
}

/// One tail vertex: position + normalized age parameter `t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TailVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub t: f32,
}

impl TailVertex {
    pub const FLOATS: usize = 4;

    pub fn new(position: Vec3, t: f32) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            t,
        }
    }
}

/// A line strip inside the tail vertex buffer.
/// Stored as floats so the whole frame stays one `Float32Array` family.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StripRange {
    pub start: f32,
    pub count: f32,
}

impl StripRange {
    pub const FLOATS: usize = 2;
}

/// One star: position, size, twinkle phase, color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    pub phase: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl StarVertex {
    pub const FLOATS: usize = 8;
}

/// Section capacities for a `FrameBuffers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCapacity {
    pub satellites: usize,
    pub particles: usize,
    pub comets: usize,
    pub tail_vertices: usize,
}

/// All dynamic render data for one frame.
///
/// Pushes beyond a section's capacity are dropped (and counted) so the data
/// never outgrows the buffers the renderer allocated from the protocol layout.
pub struct FrameBuffers {
    pub uniforms: FrameUniforms,
    satellites: Vec<ModelInstance>,
    particles: Vec<ParticleVertex>,
    comet_heads: Vec<CometHead>,
    tail_vertices: Vec<TailVertex>,
    tail_strips: Vec<StripRange>,
    capacity: FrameCapacity,
    dropped: u32,
}

/// Raw float pointer to a slice of Pod records.
fn float_ptr<T: Pod>(records: &[T]) -> *const f32 {
    bytemuck::cast_slice::<T, f32>(records).as_ptr()
}

impl FrameBuffers {
    pub fn new(capacity: FrameCapacity) -> Self {
        Self {
            uniforms: FrameUniforms::default(),
            satellites: Vec::with_capacity(capacity.satellites),
            particles: Vec::with_capacity(capacity.particles),
            comet_heads: Vec::with_capacity(capacity.comets),
            tail_vertices: Vec::with_capacity(capacity.tail_vertices),
            tail_strips: Vec::with_capacity(capacity.comets),
            capacity,
            dropped: 0,
        }
    }

    /// Reset all sections for a new frame. Uniforms are left for the scene to overwrite.
    pub fn clear(&mut self) {
        self.satellites.clear();
        self.particles.clear();
        self.comet_heads.clear();
        self.tail_vertices.clear();
        self.tail_strips.clear();
        self.dropped = 0;
    }

    pub fn push_satellite(&mut self, model: Mat4) -> bool {
        if self.satellites.len() >= self.capacity.satellites {
            self.dropped += 1;
            return false;
        }
        self.satellites.push(ModelInstance::new(model));
        true
    }

    pub fn push_particle(&mut self, vertex: ParticleVertex) -> bool {
        if self.particles.len() >= self.capacity.particles {
            self.dropped += 1;
            return false;
        }
        self.particles.push(vertex);
        true
    }

    /// Push a comet head together with its tail strip.
    /// The strip is truncated if the tail vertex section is nearly full.
    pub fn push_comet(
        &mut self,
        head: CometHead,
        tail: impl IntoIterator<Item = TailVertex>,
    ) -> bool {
        if self.comet_heads.len() >= self.capacity.comets {
            self.dropped += 1;
            return false;
        }
        self.comet_heads.push(head);

        let start = self.tail_vertices.len();
        let room = self.capacity.tail_vertices - start;
        let mut pushed = 0;
        for vertex in tail {
            if pushed == room {
                self.dropped += 1;
                break;
            }
            self.tail_vertices.push(vertex);
            pushed += 1;
        }
        self.tail_strips.push(StripRange {
            start: start as f32,
            count: pushed as f32,
        });
        true
    }

    pub fn satellites(&self) -> &[ModelInstance] {
        &self.satellites
    }

    pub fn particles(&self) -> &[ParticleVertex] {
        &self.particles
    }

    pub fn comet_heads(&self) -> &[CometHead] {
        &self.comet_heads
    }

    pub fn tail_vertices(&self) -> &[TailVertex] {
        &self.tail_vertices
    }

    pub fn tail_strips(&self) -> &[StripRange] {
        &self.tail_strips
    }

    pub fn capacity(&self) -> FrameCapacity {
        self.capacity
    }

    /// Records dropped this frame for lack of capacity.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    // ---- Raw pointers for JS reads ----

    pub fn uniforms_ptr(&self) -> *const f32 {
        float_ptr(std::slice::from_ref(&self.uniforms))
    }

    pub fn satellites_ptr(&self) -> *const f32 {
        float_ptr(&self.satellites)
    }

    pub fn particles_ptr(&self) -> *const f32 {
        float_ptr(&self.particles)
    }

    pub fn comet_heads_ptr(&self) -> *const f32 {
        float_ptr(&self.comet_heads)
    }

    pub fn tail_vertices_ptr(&self) -> *const f32 {
        float_ptr(&self.tail_vertices)
    }

    pub fn tail_strips_ptr(&self) -> *const f32 {
        float_ptr(&self.tail_strips)
    }
}
