// SPDX-License-Identifier: MPL-2.0
//! Orbit camera with damped rotation, used by the viewer pane.
//!
//! Y-up spherical coordinates around a target point: yaw 0 / pitch 0 puts
//! the eye on the +Z axis looking at the target, which is where `frame`
//! resets it after each load.

use crate::assets::Aabb;
use crate::config::{CAMERA_DAMPING, CAMERA_DISTANCE_FACTOR, CAMERA_FOV_DEGREES};
use glam::{Mat4, Vec3};

/// Distance used for the empty scene and degenerate (zero-size) models.
const FALLBACK_DISTANCE: f32 = 3.0;

/// Residual velocity below which damping is considered settled.
const REST_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,   // radians
    pub pitch: f32, // radians
    pub fov: f32,   // degrees
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: FALLBACK_DISTANCE,
            yaw: 0.0,
            pitch: 0.0,
            fov: CAMERA_FOV_DEGREES,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 0.1,
            max_distance: 1000.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }
}

impl OrbitCamera {
    pub fn update_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Feeds a drag delta into the orbit. The rotation is applied through
    /// the velocity so it keeps easing after the pointer stops.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw_velocity += delta_yaw;
        self.pitch_velocity += delta_pitch;
    }

    /// Advances the damped rotation by one frame.
    pub fn update(&mut self) {
        self.yaw += self.yaw_velocity;
        self.pitch += self.pitch_velocity;

        // Clamp pitch short of the poles to avoid flipping
        let limit = 89.0f32.to_radians();
        self.pitch = self.pitch.clamp(-limit, limit);

        self.yaw_velocity *= 1.0 - CAMERA_DAMPING;
        self.pitch_velocity *= 1.0 - CAMERA_DAMPING;
        if !self.is_animating() {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
        }
    }

    /// True while residual drag velocity is still easing out.
    pub fn is_animating(&self) -> bool {
        self.yaw_velocity.abs() > REST_EPSILON || self.pitch_velocity.abs() > REST_EPSILON
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance -= delta * self.distance;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Recenters on the model and backs the eye off along +Z so the whole
    /// object is framed: distance is twice the largest bounding dimension.
    pub fn frame(&mut self, aabb: &Aabb) {
        let max_dim = aabb.max_dimension();
        self.target = aabb.center();
        self.distance = if max_dim > 0.0 {
            CAMERA_DISTANCE_FACTOR * max_dim
        } else {
            FALLBACK_DISTANCE
        };
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
        self.min_distance = self.distance * 0.05;
        self.max_distance = self.distance * 10.0;
        self.far = (self.distance * 10.0).max(1000.0);
    }

    pub fn eye_position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        // Y-up convention
        let offset = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance;

        self.target + offset
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }
}
