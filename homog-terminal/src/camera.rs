/// Camera and model transforms for the viewer
use homog_core::{Matrix44, Point3, Point4};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Rotation about x, then y, then z.
    pub fn matrix(&self) -> Matrix44 {
        Matrix44::rotation_x(self.x) * Matrix44::rotation_y(self.y) * Matrix44::rotation_z(self.z)
    }
}

/// Perspective camera at the origin looking down `-z`
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    /// Distance from the camera to the model origin
    pub distance: f64,
    projection: Matrix44,
}

impl Camera {
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64, distance: f64) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            distance,
            projection: Matrix44::perspective(fov, aspect, near, far),
        }
    }

    /// Camera sized for a terminal of `columns` by `rows` cells. Cells are
    /// about twice as tall as they are wide.
    pub fn for_terminal(columns: u16, rows: u16, fov: f64, near: f64, far: f64, distance: f64) -> Self {
        let aspect = f64::from(columns) / (2.0 * f64::from(rows.max(1)));
        Self::new(fov, aspect, near, far, distance)
    }

    pub fn projection_matrix(&self) -> &Matrix44 {
        &self.projection
    }

    /// Model transform: the rotation followed by a push away from the
    /// camera along `-z`.
    pub fn model_matrix(&self, rotation: &RotationState) -> Matrix44 {
        let mut model = rotation.matrix();
        model.set_position(Point3::new(0.0, 0.0, -self.distance));
        model
    }

    /// Projects a model-space point to `(column, row, depth)` screen space,
    /// with rows growing downwards and depth in `[0, 1]`. Returns `None` for
    /// points behind the camera or outside the view volume.
    pub fn project_to_screen(
        &self,
        point: Point3<f64>,
        model_view_projection: &Matrix44,
        width: f64,
        height: f64,
    ) -> Option<(f64, f64, f64)> {
        let clip = point.to_homogeneous() * *model_view_projection;
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.perspective_divide();
        let inside = |v: f64| (-1.0..=1.0).contains(&v);
        if !inside(ndc.x) || !inside(ndc.y) || !inside(ndc.z) {
            return None;
        }

        let screen: Point4<f64> = Matrix44::project(ndc, width, height);
        Some((screen.x, height - screen.y, screen.z))
    }
}
