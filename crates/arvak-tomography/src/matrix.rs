//! 2x2 complex matrices.

use num_complex::Complex64;

/// A single-qubit operator, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Build a matrix from (re, im) pairs.
pub const fn from_parts(m: [[(f64, f64); 2]; 2]) -> Matrix2 {
    [
        [
            Complex64::new(m[0][0].0, m[0][0].1),
            Complex64::new(m[0][1].0, m[0][1].1),
        ],
        [
            Complex64::new(m[1][0].0, m[1][0].1),
            Complex64::new(m[1][1].0, m[1][1].1),
        ],
    ]
}

/// The identity.
pub const fn identity() -> Matrix2 {
    from_parts([[(1.0, 0.0), (0.0, 0.0)], [(0.0, 0.0), (1.0, 0.0)]])
}

/// Matrix product `a · b`.
pub fn matmul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[ZERO; 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

/// Entry-wise sum.
pub fn add(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    [
        [a[0][0] + b[0][0], a[0][1] + b[0][1]],
        [a[1][0] + b[1][0], a[1][1] + b[1][1]],
    ]
}

/// Conjugate transpose.
pub fn adjoint(m: &Matrix2) -> Matrix2 {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

/// Trace.
pub fn trace(m: &Matrix2) -> Complex64 {
    m[0][0] + m[1][1]
}

/// Entry-wise comparison within `tol`.
pub fn approx_eq(a: &Matrix2, b: &Matrix2, tol: f64) -> bool {
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .all(|(x, y)| (x - y).norm() <= tol)
}
