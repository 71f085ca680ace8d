//! Column-major 4x4 matrix helpers, laid out like gl-matrix: `m[col][row]`,
//! translation in `m[3]`.

pub type Mat4 = [[f32; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub fn translation(v: [f32; 3]) -> Mat4 {
    let mut m = IDENTITY;
    m[3] = [v[0], v[1], v[2], 1.0];
    m
}

pub fn rotation_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, s, 0.0],
        [0.0, -s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// `a * b`: applies `b` first, then `a`.
pub fn mat4_mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut out = [[0.0f32; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            out[i][j] =
                a[0][j] * b[i][0] + a[1][j] * b[i][1] + a[2][j] * b[i][2] + a[3][j] * b[i][3];
        }
    }
    out
}

/// Transforms the point `p` (w = 1).
pub fn transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0f32; 3];
    for (row, value) in out.iter_mut().enumerate() {
        *value = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
    }
    out
}

/// Inverse of a rigid transform (rotation + translation): transpose the
/// rotation, rotate and negate the translation.
pub fn rigid_inverse(m: &Mat4) -> Mat4 {
    let mut out = IDENTITY;
    for col in 0..3 {
        for row in 0..3 {
            out[col][row] = m[row][col];
        }
    }
    let t = [m[3][0], m[3][1], m[3][2]];
    for row in 0..3 {
        out[3][row] = -(out[0][row] * t[0] + out[1][row] * t[1] + out[2][row] * t[2]);
    }
    out
}
