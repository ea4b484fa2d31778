use glam::{Mat3, Mat4, Vec3};

/// Radians added to the orbit angle each tick.
pub const ORBIT_STEP: f32 = 0.005;

/// Perspective camera that slowly circles the origin.
pub struct OrbitCamera {
    /// Current orbit angle in radians.
    pub angle: f32,
    /// Horizontal distance from the origin.
    pub distance: f32,
    /// Eye height above the orbit plane.
    pub height: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Far plane for the starfield pass.
    pub sky_far: f32,
    /// Viewport width / height.
    pub aspect: f32,
}

impl OrbitCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            angle: 0.0,
            distance: 8.0,
            height: 3.0,
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: 100.0,
            sky_far: 1000.0,
            aspect: aspect_of(width, height),
        }
    }

    /// Step the automatic orbit by one tick.
    pub fn advance(&mut self) {
        self.angle = (self.angle + ORBIT_STEP) % std::f32::consts::TAU;
    }

    /// Return to the starting angle.
    pub fn reset(&mut self) {
        self.angle = 0.0;
    }

    /// Resize the viewport (e.g. on window resize). Zero sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(cos * self.distance, self.height, sin * self.distance)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    /// WebGL clip space (z in [-1, 1]).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// View-projection with the translation stripped, so stars stay at infinity.
    pub fn sky_view_proj(&self) -> Mat4 {
        let rotation = Mat4::from_mat3(Mat3::from_mat4(self.view_matrix()));
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.sky_far) * rotation
    }
}

fn aspect_of(width: f32, height: f32) -> f32 {
    if width > 0.0 && height > 0.0 {
        width / height
    } else {
        1.0
    }
}
