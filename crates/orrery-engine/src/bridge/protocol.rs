//! Packed frame layout shared with the TypeScript renderer.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Uniforms: FrameUniforms::FLOATS]
//! [Satellites: max_satellites × 16 floats]
//! [Particles: max_particles × 4 floats]
//! [Comet heads: max_comets × 12 floats]
//! [Tail vertices: max_tail_vertices × 4 floats]
//! [Tail strips: max_comets × 2 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame next to the live
//! counts, so TypeScript can compute offsets without a second call.

use crate::api::scene::SceneConfig;
use crate::api::types::SceneEvent;
use crate::renderer::instance::{
    CometHead, FrameBuffers, FrameUniforms, ModelInstance, ParticleVertex, StripRange, TailVertex,
};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_SATELLITES: usize = 2;
pub const HEADER_SATELLITE_COUNT: usize = 3;
pub const HEADER_MAX_PARTICLES: usize = 4;
pub const HEADER_PARTICLE_COUNT: usize = 5;
pub const HEADER_MAX_COMETS: usize = 6;
pub const HEADER_COMET_COUNT: usize = 7;
pub const HEADER_MAX_TAIL_VERTICES: usize = 8;
pub const HEADER_TAIL_VERTEX_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_VIEWPORT_WIDTH: usize = 12;
pub const HEADER_VIEWPORT_HEIGHT: usize = 13;
pub const HEADER_DROPPED: usize = 14;
pub const HEADER_SIM_TIME: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_satellites: usize,
    pub max_particles: usize,
    pub max_comets: usize,
    /// `max_comets × max_tail_points`.
    pub max_tail_vertices: usize,
    pub max_events: usize,

    /// Offset (in floats) where each section begins.
    pub uniforms_offset: usize,
    pub satellites_offset: usize,
    pub particles_offset: usize,
    pub comet_heads_offset: usize,
    pub tail_vertices_offset: usize,
    pub tail_strips_offset: usize,
    pub events_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

/// Per-frame values that live in the header rather than a section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStamp {
    pub frame: u32,
    pub viewport: (f32, f32),
    pub time: f32,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_satellites: usize,
        max_particles: usize,
        max_comets: usize,
        max_tail_points: usize,
        max_events: usize,
    ) -> Self {
        let max_tail_vertices = max_comets * max_tail_points;

        let uniforms_offset = HEADER_FLOATS;
        let satellites_offset = uniforms_offset + FrameUniforms::FLOATS;
        let particles_offset = satellites_offset + max_satellites * ModelInstance::FLOATS;
        let comet_heads_offset = particles_offset + max_particles * ParticleVertex::FLOATS;
        let tail_vertices_offset = comet_heads_offset + max_comets * CometHead::FLOATS;
        let tail_strips_offset = tail_vertices_offset + max_tail_vertices * TailVertex::FLOATS;
        let events_offset = tail_strips_offset + max_comets * StripRange::FLOATS;

        let buffer_total_floats = events_offset + max_events * SceneEvent::FLOATS;

        Self {
            max_satellites,
            max_particles,
            max_comets,
            max_tail_vertices,
            max_events,
            uniforms_offset,
            satellites_offset,
            particles_offset,
            comet_heads_offset,
            tail_vertices_offset,
            tail_strips_offset,
            events_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a SceneConfig.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(
            config.max_satellites,
            config.max_particles,
            config.max_comets,
            config.max_tail_points,
            config.max_events,
        )
    }

    /// Copy a frame into `out` at this layout's offsets.
    ///
    /// `out` is resized to `buffer_total_floats`. Events past `max_events`
    /// are dropped and counted in the header.
    pub fn pack(
        &self,
        frame: &FrameBuffers,
        events: &[SceneEvent],
        stamp: FrameStamp,
        out: &mut Vec<f32>,
    ) {
        out.resize(self.buffer_total_floats, 0.0);

        let dropped_events = events.len().saturating_sub(self.max_events);
        let events = clip(events, self.max_events);

        let header = &mut out[..HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = stamp.frame as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_SATELLITES] = self.max_satellites as f32;
        header[HEADER_SATELLITE_COUNT] = frame.satellites().len() as f32;
        header[HEADER_MAX_PARTICLES] = self.max_particles as f32;
        header[HEADER_PARTICLE_COUNT] = frame.particles().len() as f32;
        header[HEADER_MAX_COMETS] = self.max_comets as f32;
        header[HEADER_COMET_COUNT] = frame.comet_heads().len() as f32;
        header[HEADER_MAX_TAIL_VERTICES] = self.max_tail_vertices as f32;
        header[HEADER_TAIL_VERTEX_COUNT] = frame.tail_vertices().len() as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = events.len() as f32;
        header[HEADER_VIEWPORT_WIDTH] = stamp.viewport.0;
        header[HEADER_VIEWPORT_HEIGHT] = stamp.viewport.1;
        header[HEADER_DROPPED] = (frame.dropped() as usize + dropped_events) as f32;
        header[HEADER_SIM_TIME] = stamp.time;

        write_section(out, self.uniforms_offset, std::slice::from_ref(&frame.uniforms));
        write_section(out, self.satellites_offset, clip(frame.satellites(), self.max_satellites));
        write_section(out, self.particles_offset, clip(frame.particles(), self.max_particles));
        write_section(out, self.comet_heads_offset, clip(frame.comet_heads(), self.max_comets));
        write_section(
            out,
            self.tail_vertices_offset,
            clip(frame.tail_vertices(), self.max_tail_vertices),
        );
        write_section(out, self.tail_strips_offset, clip(frame.tail_strips(), self.max_comets));
        write_section(out, self.events_offset, events);
    }
}

fn clip<T>(records: &[T], max: usize) -> &[T] {
    &records[..records.len().min(max)]
}

fn write_section<T: bytemuck::Pod>(out: &mut [f32], offset: usize, records: &[T]) {
    let floats: &[f32] = bytemuck::cast_slice(records);
    out[offset..offset + floats.len()].copy_from_slice(floats);
}
