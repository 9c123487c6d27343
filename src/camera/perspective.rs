//! Perspective camera with a quaternion orientation.

use super::Viewport;
use crate::math::{Frustum, Matrix4, Quaternion, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Depth the projection assigns to points at infinity.
pub const INFINITE_DEPTH: f64 = 1e-6;

/// A perspective camera looking down its local -Z axis.
///
/// View and projection matrices and their inverses are rebuilt whenever
/// a setter changes the camera, so all queries take `&self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    position: Vector3,
    orientation: Quaternion,
    /// Vertical field of view in radians.
    v_fov: f64,
    aspect: f64,
    near: f64,
    view_matrix: Matrix4,
    view_matrix_inverse: Matrix4,
    projection_matrix: Matrix4,
    projection_matrix_inverse: Matrix4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(60f64.to_radians(), 16.0 / 9.0, 0.1)
    }
}

impl Camera {
    /// Create a camera at the origin looking down -Z.
    pub fn new(v_fov: f64, aspect: f64, near: f64) -> Self {
        let mut camera = Self {
            position: Vector3::ZERO,
            orientation: Quaternion::IDENTITY,
            v_fov,
            aspect,
            near,
            view_matrix: Matrix4::IDENTITY,
            view_matrix_inverse: Matrix4::IDENTITY,
            projection_matrix: Matrix4::IDENTITY,
            projection_matrix_inverse: Matrix4::IDENTITY,
        };
        camera.update_view();
        camera.update_projection();
        camera
    }

    /// Camera position in world space.
    #[inline]
    pub fn position(&self) -> &Vector3 {
        &self.position
    }

    /// Rotation from camera space to world space.
    #[inline]
    pub fn orientation(&self) -> &Quaternion {
        &self.orientation
    }

    /// Vertical field of view in radians.
    #[inline]
    pub fn v_fov(&self) -> f64 {
        self.v_fov
    }

    /// Width over height.
    #[inline]
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Near plane distance.
    #[inline]
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Move the camera.
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
        self.update_view();
    }

    /// Rotate the camera.
    pub fn set_orientation(&mut self, orientation: Quaternion) {
        self.orientation = orientation.normalized();
        self.update_view();
    }

    /// Set the vertical field of view in radians.
    pub fn set_v_fov(&mut self, v_fov: f64) {
        self.v_fov = v_fov;
        self.update_projection();
    }

    /// Set the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
        self.update_projection();
    }

    /// Match the aspect ratio of a viewport. Zero-height viewports are ignored.
    pub fn fit_viewport(&mut self, viewport: &Viewport) {
        let aspect = viewport.aspect_ratio();
        if aspect > 0.0 {
            self.set_aspect(aspect);
        }
    }

    /// Set the near plane distance.
    pub fn set_near(&mut self, near: f64) {
        self.near = near;
        self.update_projection();
    }

    /// Camera +X in world space.
    pub fn right(&self) -> Vector3 {
        self.orientation.rotate_vector(&Vector3::UNIT_X)
    }

    /// Camera -Z in world space.
    pub fn forward(&self) -> Vector3 {
        self.orientation.rotate_vector(&Vector3::FORWARD)
    }

    /// Camera +Y in world space.
    pub fn up(&self) -> Vector3 {
        self.orientation.rotate_vector(&Vector3::UNIT_Y)
    }

    /// Orient the camera towards `target`, keeping `up` in the vertical plane.
    ///
    /// Does nothing when `target` coincides with the position or the view
    /// direction is parallel to `up`.
    pub fn look_at(&mut self, target: &Vector3, up: &Vector3) {
        let dir = *target - self.position;
        if dir.length_squared() == 0.0 || dir.cross(up).length_squared() == 0.0 {
            log::warn!("look_at target is degenerate for position {:?}", self.position);
            return;
        }
        let view = Matrix4::look_at(&self.position, target, up);
        let rotation = view.get3x3().transposed();
        self.set_orientation(Quaternion::from_rotation_matrix(&rotation));
    }

    /// World to camera transform.
    #[inline]
    pub fn view_matrix(&self) -> &Matrix4 {
        &self.view_matrix
    }

    /// Camera to world transform.
    #[inline]
    pub fn view_matrix_inverse(&self) -> &Matrix4 {
        &self.view_matrix_inverse
    }

    /// Reverse-Z projection with the far plane at infinity.
    #[inline]
    pub fn projection_matrix(&self) -> &Matrix4 {
        &self.projection_matrix
    }

    /// Inverse of [`Camera::projection_matrix`].
    #[inline]
    pub fn projection_matrix_inverse(&self) -> &Matrix4 {
        &self.projection_matrix_inverse
    }

    /// `projection · view`.
    pub fn view_projection_matrix(&self) -> Matrix4 {
        self.projection_matrix * self.view_matrix
    }

    /// Culling frustum bounded by a far plane at distance `far`.
    pub fn frustum(&self, far: f64) -> Frustum {
        let projection = Matrix4::perspective(self.v_fov, self.aspect, self.near, far);
        Frustum::from_matrix(&(projection * self.view_matrix))
    }

    /// Project a world point to window coordinates.
    ///
    /// `z` of the result is the reverse-Z depth: 1 at the near plane,
    /// approaching 0 at infinity. Points behind the camera give `None`.
    pub fn world_to_window(&self, point: &Vector3, viewport: &Viewport) -> Option<Vector3> {
        let clip = self.view_projection_matrix().transform_vector4(&Vector4::from_vec3(*point, 1.0));
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.project();
        Some(Vector3::new(
            viewport.x as f64 + (ndc.x + 1.0) * 0.5 * viewport.width as f64,
            viewport.y as f64 + (ndc.y + 1.0) * 0.5 * viewport.height as f64,
            ndc.z,
        ))
    }

    /// Inverse of [`Camera::world_to_window`].
    pub fn window_to_world(&self, window: &Vector3, viewport: &Viewport) -> Option<Vector3> {
        if viewport.width == 0 || viewport.height == 0 {
            return None;
        }
        let ndc = Vector4::new(
            (window.x - viewport.x as f64) / viewport.width as f64 * 2.0 - 1.0,
            (window.y - viewport.y as f64) / viewport.height as f64 * 2.0 - 1.0,
            window.z,
            1.0,
        );
        let eye = self.projection_matrix_inverse.transform_vector4(&ndc);
        if eye.w == 0.0 {
            return None;
        }
        Some(self.view_matrix_inverse.transform_point(&eye.project()))
    }

    /// World-space ray through a window point.
    pub fn window_ray(&self, x: f64, y: f64, viewport: &Viewport) -> Option<(Vector3, Vector3)> {
        let on_near = self.window_to_world(&Vector3::new(x, y, 1.0), viewport)?;
        Some((self.position, (on_near - self.position).normalized()))
    }

    fn update_view(&mut self) {
        self.view_matrix_inverse = Matrix4::compose(&self.position, &self.orientation, &Vector3::ONE);
        self.view_matrix = self.view_matrix_inverse.inverted();
    }

    fn update_projection(&mut self) {
        self.projection_matrix =
            Matrix4::perspective_infinite_reverse(self.v_fov, self.aspect, self.near, INFINITE_DEPTH);
        self.projection_matrix_inverse = self.projection_matrix.inverted();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Touch;

    #[test]
    fn test_default_basis() {
        let camera = Camera::default();
        assert!(camera.right().approx_eq(&Vector3::UNIT_X, 1e-12));
        assert!(camera.up().approx_eq(&Vector3::UNIT_Y, 1e-12));
        assert!(camera.forward().approx_eq(&Vector3::FORWARD, 1e-12));
    }

    #[test]
    fn test_cached_inverses() {
        let mut camera = Camera::new(1.0, 1.5, 0.5);
        camera.set_position(Vector3::new(1.0, 2.0, 3.0));
        camera.look_at(&Vector3::ZERO, &Vector3::UNIT_Y);
        let v = *camera.view_matrix() * *camera.view_matrix_inverse();
        let p = *camera.projection_matrix() * *camera.projection_matrix_inverse();
        assert!(v.approx_eq(&Matrix4::IDENTITY, 1e-9));
        assert!(p.approx_eq(&Matrix4::IDENTITY, 1e-9));
    }

    #[test]
    fn test_look_at_points_forward() {
        let mut camera = Camera::default();
        camera.set_position(Vector3::new(0.0, 0.0, 5.0));
        camera.look_at(&Vector3::new(5.0, 0.0, 5.0), &Vector3::UNIT_Y);
        assert!(camera.forward().approx_eq(&Vector3::UNIT_X, 1e-12));
        let view = camera.view_matrix().transform_point(&Vector3::new(5.0, 0.0, 5.0));
        assert!(view.approx_eq(&Vector3::new(0.0, 0.0, -5.0), 1e-12));
    }

    #[test]
    fn test_window_round_trip() {
        let mut camera = Camera::new(1.0, 2.0, 0.1);
        camera.set_position(Vector3::new(0.0, 1.0, 4.0));
        let viewport = Viewport::new(0, 0, 800, 400);
        let point = Vector3::new(0.5, 1.25, -2.0);
        let window = camera.world_to_window(&point, &viewport);
        let back = window.and_then(|w| camera.window_to_world(&w, &viewport));
        assert!(back.is_some_and(|b| b.approx_eq(&point, 1e-6)));

        let center = camera.world_to_window(&Vector3::new(0.0, 1.0, -10.0), &viewport);
        assert!(center.is_some_and(|c| (c.x - 400.0).abs() < 1e-9 && (c.y - 200.0).abs() < 1e-9));
        assert!(camera.world_to_window(&Vector3::new(0.0, 1.0, 10.0), &viewport).is_none());
    }

    #[test]
    fn test_near_plane_depth() {
        let camera = Camera::new(1.0, 1.0, 0.5);
        let viewport = Viewport::from_size(100, 100);
        let near = camera.world_to_window(&Vector3::new(0.0, 0.0, -0.5), &viewport);
        assert!(near.is_some_and(|n| (n.z - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_frustum() {
        let camera = Camera::default();
        let frustum = camera.frustum(100.0);
        assert_eq!(frustum.touches_point(&Vector3::new(0.0, 0.0, -10.0)), Touch::Inside);
        assert_eq!(frustum.touches_point(&Vector3::new(0.0, 0.0, -200.0)), Touch::Outside);
        assert_eq!(frustum.touches_point(&Vector3::new(0.0, 0.0, 1.0)), Touch::Outside);
    }
}
