//! Elliptical arc to cubic Bézier conversion
//!
//! Arcs arrive in endpoint parameterization (start, end, radii, rotation and
//! the two flags). They are converted to center parameterization following
//! the SVG arc implementation notes, split into sub-arcs of at most 90° and
//! each sub-arc is approximated by one cubic using the quarter-angle kappa
//! factor `t = 8/3 · sin²(δ/4) / sin(δ/2)`.

use std::f64::consts::{FRAC_PI_2, TAU};

use smallvec::SmallVec;

use crate::point::Point;

/// Corrected radii at or below this length cannot describe an ellipse
const RADIUS_EPSILON: f64 = 1e-12;

/// A cubic Bézier segment starting at the previous segment's end point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// What an arc command turns into
#[derive(Clone, Debug, PartialEq)]
pub enum ArcApproximation {
    /// Start and end coincide, the arc draws nothing
    Omitted,
    /// A zero radius collapses the arc to a straight line to this point
    Line(Point),
    /// One cubic per sub-arc, in drawing order
    Cubics(SmallVec<[CubicSegment; 4]>),
}

/// An elliptical arc in SVG endpoint parameterization
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndpointArc {
    pub from: Point,
    pub to: Point,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x axis, in degrees
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// The same arc in center parameterization
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterArc {
    pub center: Point,
    /// Radii after out-of-range correction
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x axis, in radians
    pub phi: f64,
    /// Start angle on the unit circle
    pub theta1: f64,
    /// Signed angular sweep; negative runs counter to the positive angle direction
    pub dtheta: f64,
}

impl EndpointArc {
    /// Convert to center parameterization
    ///
    /// Returns `None` when the arc has no ellipse to speak of: a zero radius,
    /// coincident endpoints, or radii that are still unusable after scaling.
    pub fn to_center(&self) -> Option<CenterArc> {
        if self.is_zero_radius() || self.from == self.to {
            return None;
        }

        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();

        let phi = self.rotation.rem_euclid(360.0).to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        // Step 1: rotate by -phi around the chord midpoint
        let dx = (self.from.x - self.to.x) / 2.0;
        let dy = (self.from.y - self.to.y) / 2.0;
        let x1p = cos_phi * dx + sin_phi * dy;
        let y1p = -sin_phi * dx + cos_phi * dy;

        // Step 2: scale radii up when the ellipse cannot span the chord
        let lambda = (x1p / rx).powi(2) + (y1p / ry).powi(2);
        if lambda > 1.0 {
            let scale = (x1p / rx).hypot(y1p / ry);
            rx *= scale;
            ry *= scale;
        }
        if !(rx.is_finite() && ry.is_finite()) || rx <= RADIUS_EPSILON || ry <= RADIUS_EPSILON {
            return None;
        }

        // Step 3: center in the rotated frame
        let rx_sq = rx * rx;
        let ry_sq = ry * ry;
        let numer = (rx_sq * ry_sq - rx_sq * y1p * y1p - ry_sq * x1p * x1p).max(0.0);
        let denom = rx_sq * y1p * y1p + ry_sq * x1p * x1p;
        if denom <= 0.0 {
            return None;
        }
        let mut coef = (numer / denom).sqrt();
        if self.large_arc == self.sweep {
            coef = -coef;
        }
        let cxp = coef * rx * y1p / ry;
        let cyp = -coef * ry * x1p / rx;

        // Step 4: back to the original frame
        let center = Point::new(
            cos_phi * cxp - sin_phi * cyp + (self.from.x + self.to.x) / 2.0,
            sin_phi * cxp + cos_phi * cyp + (self.from.y + self.to.y) / 2.0,
        );

        // Step 5: start angle and sweep on the unit circle
        let start = Point::new((x1p - cxp) / rx, (y1p - cyp) / ry);
        let end = Point::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
        let theta1 = angle_between(Point::new(1.0, 0.0), start);
        let mut dtheta = angle_between(start, end);
        if !self.sweep && dtheta > 0.0 {
            dtheta -= TAU;
        } else if self.sweep && dtheta < 0.0 {
            dtheta += TAU;
        }

        Some(CenterArc {
            center,
            rx,
            ry,
            phi,
            theta1,
            dtheta,
        })
    }

    /// Approximate the arc with cubic segments
    ///
    /// A zero radius always yields a line, even back to the start point.
    /// The last cubic segment ends exactly at `self.to`.
    pub fn to_cubics(&self) -> ArcApproximation {
        if self.is_zero_radius() {
            return ArcApproximation::Line(self.to);
        }
        if self.from == self.to {
            return ArcApproximation::Omitted;
        }

        let Some(center) = self.to_center() else {
            return ArcApproximation::Line(self.to);
        };

        let mut segments = center.to_cubics();
        if let Some(last) = segments.last_mut() {
            last.to = self.to;
        }
        ArcApproximation::Cubics(segments)
    }
}

impl EndpointArc {
    fn is_zero_radius(&self) -> bool {
        self.rx == 0.0 || self.ry == 0.0
    }
}

impl CenterArc {
    /// Number of sub-arcs needed so that none spans more than 90°
    pub fn segment_count(&self) -> usize {
        ((self.dtheta.abs() / FRAC_PI_2).ceil() as usize).max(1)
    }

    /// Map a point from unit-circle space onto the ellipse
    pub fn map_unit(&self, u: Point) -> Point {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        Point::new(
            cos_phi * self.rx * u.x - sin_phi * self.ry * u.y + self.center.x,
            sin_phi * self.rx * u.x + cos_phi * self.ry * u.y + self.center.y,
        )
    }

    /// Point on the ellipse at unit-circle angle `theta`
    pub fn point_at(&self, theta: f64) -> Point {
        let (sin, cos) = theta.sin_cos();
        self.map_unit(Point::new(cos, sin))
    }

    /// Split the sweep into equal sub-arcs and approximate each with a cubic
    pub fn to_cubics(&self) -> SmallVec<[CubicSegment; 4]> {
        let count = self.segment_count();
        let delta = self.dtheta / count as f64;
        let t = kappa(delta);

        (0..count)
            .map(|i| {
                let start = self.theta1 + i as f64 * delta;
                let end = start + delta;
                let (sin_s, cos_s) = start.sin_cos();
                let (sin_e, cos_e) = end.sin_cos();

                let ctrl1 = Point::new(cos_s - sin_s * t, sin_s + cos_s * t);
                let ctrl2 = Point::new(cos_e + sin_e * t, sin_e - cos_e * t);

                CubicSegment {
                    ctrl1: self.map_unit(ctrl1),
                    ctrl2: self.map_unit(ctrl2),
                    to: self.map_unit(Point::new(cos_e, sin_e)),
                }
            })
            .collect()
    }
}

/// Tangent length for a unit-circle cubic spanning `delta` radians
pub fn kappa(delta: f64) -> f64 {
    let half = (delta / 2.0).sin();
    if half == 0.0 {
        return 0.0;
    }
    (8.0 / 3.0) * (delta / 4.0).sin().powi(2) / half
}

/// Signed angle from `u` to `v`
fn angle_between(u: Point, v: Point) -> f64 {
    let dot = u.x * v.x + u.y * v.y;
    let len = (u.x * u.x + u.y * u.y).sqrt() * (v.x * v.x + v.y * v.y).sqrt();
    let angle = (dot / len).clamp(-1.0, 1.0).acos();
    if u.x * v.y - u.y * v.x < 0.0 {
        -angle
    } else {
        angle
    }
}
