use crate::math::{Real, UnitVector, Vector};

/// Two unit vectors orthogonal to `n` and to each other, such that
/// `[b0, b1, n]` is right-handed.
///
/// Robust and branchless implementation from Pixar:
/// <https://graphics.pixar.com/library/OrthonormalB/paper.pdf>
pub fn orthonormal_basis(n: &UnitVector<Real>) -> [Vector<Real>; 2] {
    let sign = n.z.signum();
    let a = -1.0 / (sign + n.z);
    let b = n.x * n.y * a;

    [
        Vector::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x),
        Vector::new(b, sign + n.y * n.y * a, -n.y),
    ]
}
