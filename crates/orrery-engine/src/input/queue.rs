/// Control kinds sent by the GUI panel through `scene_control(kind, value)`.
/// Must stay in sync with the TypeScript panel.
pub const CONTROL_PLANET_SPEED: u32 = 1;
pub const CONTROL_SATELLITE_SPEED: u32 = 2;
pub const CONTROL_THRUSTER_ENABLED: u32 = 3;
pub const CONTROL_THRUSTER_LIFETIME: u32 = 4;
pub const CONTROL_POINT_SIZE: u32 = 5;
pub const CONTROL_COMET_SPAWN_RATE: u32 = 6;
pub const CONTROL_RESET_CAMERA: u32 = 7;

/// A control change coming from the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    SetPlanetSpeed(f32),
    SetSatelliteSpeed(f32),
    SetThrusterEnabled(bool),
    SetThrusterLifetime(f32),
    SetPointSize(f32),
    SetCometSpawnRate(f32),
    ResetCamera,
    /// Canvas resized (pushed by the runner, not decoded from a kind).
    Resize { width: f32, height: f32 },
}

impl ControlEvent {
    /// Decode a `(kind, value)` pair from JS. Unknown kinds yield `None`.
    pub fn decode(kind: u32, value: f32) -> Option<Self> {
        let event = match kind {
            CONTROL_PLANET_SPEED => Self::SetPlanetSpeed(value),
            CONTROL_SATELLITE_SPEED => Self::SetSatelliteSpeed(value),
            CONTROL_THRUSTER_ENABLED => Self::SetThrusterEnabled(value != 0.0),
            CONTROL_THRUSTER_LIFETIME => Self::SetThrusterLifetime(value),
            CONTROL_POINT_SIZE => Self::SetPointSize(value),
            CONTROL_COMET_SPAWN_RATE => Self::SetCometSpawnRate(value),
            CONTROL_RESET_CAMERA => Self::ResetCamera,
            _ => return None,
        };
        Some(event)
    }
}

/// A queue of control events.
/// JS pushes events between frames; the runner applies and drains them on the next tick.
pub struct ControlQueue {
    events: Vec<ControlEvent>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &ControlEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for ControlQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_known_kinds() {
        assert_eq!(
            ControlEvent::decode(CONTROL_PLANET_SPEED, 0.02),
            Some(ControlEvent::SetPlanetSpeed(0.02))
        );
        assert_eq!(
            ControlEvent::decode(CONTROL_THRUSTER_ENABLED, 0.0),
            Some(ControlEvent::SetThrusterEnabled(false))
        );
        assert_eq!(
            ControlEvent::decode(CONTROL_THRUSTER_ENABLED, 1.0),
            Some(ControlEvent::SetThrusterEnabled(true))
        );
        assert_eq!(
            ControlEvent::decode(CONTROL_RESET_CAMERA, 123.0),
            Some(ControlEvent::ResetCamera)
        );
    }

    #[test]
    fn decode_unknown_kind() {
        assert_eq!(ControlEvent::decode(0, 1.0), None);
        assert_eq!(ControlEvent::decode(99, 1.0), None);
    }

    #[test]
    fn push_and_drain() {
        let mut q = ControlQueue::new();
        q.push(ControlEvent::ResetCamera);
        q.push(ControlEvent::Resize { width: 640.0, height: 480.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
        assert_eq!(events[1], ControlEvent::Resize { width: 640.0, height: 480.0 });
    }
}
