//! Quadric error metric
//!
//! A quadric stores the symmetric 4x4 form of Garland & Heckbert as a 3x3
//! block `A`, a vector `b` and a scalar `c`, so that the error of a point `p`
//! is `pᵀAp + 2bᵀp + c`.

use meshreduce_core::{Matrix3, Point3d, Vector3d};
use std::ops::{Add, AddAssign};

/// Sum of squared distances to a set of planes, as a quadratic form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadric {
    a: Matrix3<f64>,
    b: Vector3d,
    c: f64,
}

impl Default for Quadric {
    fn default() -> Self {
        Self::zero()
    }
}

impl Quadric {
    /// The quadric of an empty plane set.
    pub fn zero() -> Self {
        Self {
            a: Matrix3::zeros(),
            b: Vector3d::zeros(),
            c: 0.0,
        }
    }

    /// Rank-1 quadric of the plane `normal · p + distance = 0`.
    ///
    /// `normal` must be unit length for the error to be a squared distance.
    pub fn from_plane(normal: &Vector3d, distance: f64) -> Self {
        Self {
            a: normal * normal.transpose(),
            b: normal * distance,
            c: distance * distance,
        }
    }

    /// Evaluate `pᵀAp + 2bᵀp + c`.
    ///
    /// Non-negative up to rounding; callers that need a cost clamp it.
    pub fn error(&self, point: &Point3d) -> f64 {
        let p = &point.coords;
        p.dot(&(self.a * p)) + 2.0 * self.b.dot(p) + self.c
    }

    /// Point minimising the error, solving `A p = -b`.
    ///
    /// Returns `None` when `|det A|` is below `epsilon`.
    pub fn minimizer(&self, epsilon: f64) -> Option<Point3d> {
        if self.a.determinant().abs() < epsilon {
            return None;
        }
        let inv = self.a.try_inverse()?;
        let p = -(inv * self.b);
        if p.iter().all(|x| x.is_finite()) {
            Some(Point3d::from(p))
        } else {
            None
        }
    }
}

impl Add for Quadric {
    type Output = Quadric;

    fn add(self, other: Quadric) -> Quadric {
        Quadric {
            a: self.a + other.a,
            b: self.b + other.b,
            c: self.c + other.c,
        }
    }
}

impl AddAssign for Quadric {
    fn add_assign(&mut self, other: Quadric) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
    }
}
