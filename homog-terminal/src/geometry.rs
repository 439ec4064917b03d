/// Triangle meshes for the terminal viewer
use homog_core::Point3;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Point3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Point3<f64>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    pub fn normal(&self) -> Point3<f64> {
        self.vertices[0].normal
    }
}

/// A mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Axis-aligned cube centered at the origin, two triangles per face,
    /// counter-clockwise when seen from outside.
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        // (outward normal, first tangent, second tangent) with
        // normal = first x second
        let faces = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
            ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ];

        for (normal, u, v) in faces {
            let (normal, u, v) = (Point3::from(normal), Point3::from(u), Point3::from(v));
            let corner = |su: f64, sv: f64| {
                Vertex::new((normal + u * su + v * sv) * half, normal)
            };
            let (a, b, c, d) = (
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            );
            mesh.add_triangle(Triangle::new(a, b, c));
            mesh.add_triangle(Triangle::new(a, c, d));
        }

        mesh
    }
}
