//! Two-focus pruning region.
//!
//! Any point on a walk of length at most `radius` between the two foci
//! satisfies `d(p, f1) + d(p, f2) <= radius`, where `d` is the great-circle
//! distance. The ellipse therefore never rejects a point that a
//! budget-feasible path could visit. It may accept points that no feasible
//! path reaches; callers verify exact costs afterwards.

use geo::{Coord, Distance, Haversine, Point};

/// Region of points whose summed great-circle distance to two foci does not
/// exceed a cost radius in metres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use veloroute_core::Ellipse;
///
/// let start = Coord { x: 0.0, y: 0.0 };
/// let end = Coord { x: 0.01, y: 0.0 };
/// let ellipse = Ellipse::new(start, end, 1_500.0);
///
/// assert!(ellipse.contains_coord(Coord { x: 0.005, y: 0.001 }));
/// assert!(!ellipse.contains(0.0, 0.05));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    focus1: Point<f64>,
    focus2: Point<f64>,
    radius: f64,
}

impl Ellipse {
    /// Construct an ellipse from two foci and a cost radius in metres.
    pub fn new(focus1: Coord<f64>, focus2: Coord<f64>, radius: f64) -> Self {
        Self {
            focus1: Point::from(focus1),
            focus2: Point::from(focus2),
            radius,
        }
    }

    /// Return the cost radius in metres.
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Return whether the point at `lat`/`lon` (degrees) lies inside.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.contains_coord(Coord { x: lon, y: lat })
    }

    /// Return whether `coord` (`x = longitude`, `y = latitude`) lies inside.
    ///
    /// Boundary points count as inside.
    pub fn contains_coord(&self, coord: Coord<f64>) -> bool {
        let point = Point::from(coord);
        Haversine.distance(point, self.focus1) + Haversine.distance(point, self.focus2)
            <= self.radius
    }
}
