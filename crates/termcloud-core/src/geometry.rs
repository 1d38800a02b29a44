//! Geometric primitives for cloud layout and hit testing.
//!
//! This module provides the geometric types used throughout termcloud for
//! measuring, placing and colliding text elements.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in cloud space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned box defined by minimum and maximum coordinates
//! - [`Footprint`] - A possibly rotated rectangle occupied by a placed word
//!
//! # Coordinate System
//!
//! Layout happens relative to the center of the cloud box, with axes oriented
//! the way SVG orients them:
//!
//! ```text
//!          -Y
//!           ▲
//!           │
//!   -X ◄────┼────► +X
//!           │   (0,0) is the box center
//!           ▼
//!          +Y
//! ```
//!
//! Rotation angles are in degrees, clockwise, matching SVG's `rotate()`.

/// A 2D point in cloud coordinate space.
///
/// # Examples
///
/// ```
/// # use termcloud_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Dot product of the two points taken as vectors
    pub fn dot(self, other: Point) -> f32 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Rotates the point around the origin by `degrees`, clockwise in SVG space.
    ///
    /// # Examples
    ///
    /// ```
    /// # use termcloud_core::geometry::Point;
    /// let p = Point::new(1.0, 0.0).rotate(90.0);
    /// assert!(p.x().abs() < 1e-6);
    /// assert!((p.y() - 1.0).abs() < 1e-6);
    /// ```
    pub fn rotate(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Converts a point and size into a bounds rectangle centered on the point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the size grown by `padding` on every side
    pub fn grow(self, padding: f32) -> Self {
        Self {
            width: self.width + 2.0 * padding,
            height: self.height + 2.0 * padding,
        }
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Merges two bounds into the smallest bounds containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use termcloud_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_center(Point::new(50.0, 15.0), Size::new(100.0, 30.0));
    /// let b = Bounds::new_from_center(Point::new(70.0, 80.0), Size::new(120.0, 80.0));
    ///
    /// let combined = a.merge(&b);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true when the two bounds share interior area.
    ///
    /// Touching edges do not count as an intersection.
    ///
    /// # Examples
    ///
    /// ```
    /// # use termcloud_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_center(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
    /// let b = Bounds::new_from_center(Point::new(10.0, 10.0), Size::new(10.0, 10.0));
    /// let c = Bounds::new_from_center(Point::new(15.0, 5.0), Size::new(10.0, 10.0));
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Returns true when `other` lies entirely inside these bounds.
    pub fn contains_bounds(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }
}

/// The rectangle a placed word occupies, rotated around its center.
///
/// A footprint with a zero rotation is an axis-aligned box; otherwise the
/// exact overlap test uses the separating axis theorem on both rectangles.
///
/// # Examples
///
/// ```
/// # use termcloud_core::geometry::{Footprint, Point, Size};
/// let a = Footprint::new(Point::new(0.0, 0.0), Size::new(40.0, 10.0), 0.0);
/// let b = Footprint::new(Point::new(0.0, 20.0), Size::new(40.0, 10.0), 0.0);
/// assert!(!a.overlaps(&b));
///
/// // Standing upright, the second rectangle reaches into the first one.
/// let c = Footprint::new(Point::new(0.0, 20.0), Size::new(40.0, 10.0), 90.0);
/// assert!(a.overlaps(&c));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    center: Point,
    size: Size,
    rotation: f32,
}

impl Footprint {
    pub fn new(center: Point, size: Size, rotation: f32) -> Self {
        Self {
            center,
            size,
            rotation,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Returns the same footprint moved to a new center
    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    /// Returns the footprint grown by `padding` on every side
    pub fn padded(mut self, padding: f32) -> Self {
        self.size = self.size.grow(padding);
        self
    }

    fn is_axis_aligned(&self) -> bool {
        self.rotation.rem_euclid(180.0) == 0.0
    }

    /// The four corners, clockwise from the top-left before rotation.
    pub fn corners(&self) -> [Point; 4] {
        let hw = self.size.width() / 2.0;
        let hh = self.size.height() / 2.0;
        [
            Point::new(-hw, -hh),
            Point::new(hw, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
        ]
        .map(|corner| corner.rotate(self.rotation).add_point(self.center))
    }

    /// The axis-aligned box enclosing the rotated rectangle
    pub fn bounds(&self) -> Bounds {
        if self.is_axis_aligned() {
            return self.center.to_bounds(self.size);
        }
        let corners = self.corners();
        let first = Bounds::new_from_center(corners[0], Size::default());
        corners[1..].iter().fold(first, |acc, corner| {
            acc.merge(&Bounds::new_from_center(*corner, Size::default()))
        })
    }

    /// Exact overlap test between two (possibly rotated) rectangles.
    ///
    /// Touching edges do not count as an overlap.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        if !self.bounds().intersects(&other.bounds()) {
            return false;
        }
        if self.is_axis_aligned() && other.is_axis_aligned() {
            return true;
        }

        let ours = self.corners();
        let theirs = other.corners();
        let axes = [
            ours[1].sub_point(ours[0]),
            ours[3].sub_point(ours[0]),
            theirs[1].sub_point(theirs[0]),
            theirs[3].sub_point(theirs[0]),
        ];

        axes.iter().all(|axis| {
            let (a_min, a_max) = project(&ours, *axis);
            let (b_min, b_max) = project(&theirs, *axis);
            a_min < b_max && b_min < a_max
        })
    }

    /// Returns true when the point lies inside the rotated rectangle
    pub fn contains_point(&self, point: Point) -> bool {
        let local = point.sub_point(self.center).rotate(-self.rotation);
        local.x().abs() <= self.size.width() / 2.0 && local.y().abs() <= self.size.height() / 2.0
    }
}

fn project(corners: &[Point; 4], axis: Point) -> (f32, f32) {
    corners
        .iter()
        .map(|corner| corner.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.0, 4.0);
        assert_eq!(point.x(), 3.0);
        assert_eq!(point.y(), 4.0);
        assert_eq!(point.add_point(point).sub_point(point), point);
    }

    #[test]
    fn test_point_rotate_quarter_turns() {
        let point = Point::new(2.0, 0.0);

        let quarter = point.rotate(90.0);
        assert_approx_eq!(f32, quarter.x(), 0.0, epsilon = 1e-5);
        assert_approx_eq!(f32, quarter.y(), 2.0, epsilon = 1e-5);

        let half = point.rotate(180.0);
        assert_approx_eq!(f32, half.x(), -2.0, epsilon = 1e-5);
        assert_approx_eq!(f32, half.y(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_bounds_new_from_center() {
        let bounds = Bounds::new_from_center(Point::new(10.0, 10.0), Size::new(20.0, 10.0));
        assert_eq!(bounds.min_x(), 0.0);
        assert_eq!(bounds.min_y(), 5.0);
        assert_eq!(bounds.max_x(), 20.0);
        assert_eq!(bounds.max_y(), 15.0);
        assert_eq!(bounds.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_bounds_intersects_is_symmetric() {
        let a = Bounds::new_from_center(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_center(Point::new(14.0, 14.0), Size::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let far = Bounds::new_from_center(Point::new(50.0, 50.0), Size::new(1.0, 1.0));
        assert!(!a.intersects(&far));
        assert!(!far.intersects(&a));
    }

    #[test]
    fn test_bounds_contains() {
        let outer = Bounds::new_from_center(Point::default(), Size::new(100.0, 100.0));
        let inner = Bounds::new_from_center(Point::new(10.0, 10.0), Size::new(20.0, 20.0));
        let sticking_out = Bounds::new_from_center(Point::new(45.0, 0.0), Size::new(20.0, 20.0));

        assert!(outer.contains_bounds(&inner));
        assert!(!outer.contains_bounds(&sticking_out));
    }

    #[test]
    fn test_footprint_axis_aligned_bounds() {
        let footprint = Footprint::new(Point::new(5.0, 5.0), Size::new(10.0, 4.0), 0.0);
        let bounds = footprint.bounds();
        assert_eq!(bounds.min_x(), 0.0);
        assert_eq!(bounds.max_x(), 10.0);
        assert_eq!(bounds.min_y(), 3.0);
        assert_eq!(bounds.max_y(), 7.0);
    }

    #[test]
    fn test_footprint_rotated_bounds_swap_dimensions() {
        let footprint = Footprint::new(Point::default(), Size::new(40.0, 10.0), 90.0);
        let bounds = footprint.bounds();
        assert_approx_eq!(f32, bounds.width(), 10.0, epsilon = 1e-4);
        assert_approx_eq!(f32, bounds.height(), 40.0, epsilon = 1e-4);
    }

    #[test]
    fn test_footprint_diagonal_rectangles_do_not_overlap_in_bounds_corner() {
        // Two thin diagonal bars whose enclosing boxes overlap but whose
        // rectangles are parallel and separated.
        let a = Footprint::new(Point::new(0.0, 0.0), Size::new(100.0, 4.0), 45.0);
        let b = Footprint::new(Point::new(10.0, -10.0), Size::new(100.0, 4.0), 45.0);
        assert!(a.bounds().intersects(&b.bounds()));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_footprint_touching_edges_do_not_overlap() {
        let a = Footprint::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0), 0.0);
        let b = Footprint::new(Point::new(10.0, 0.0), Size::new(10.0, 10.0), 0.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_footprint_padded() {
        let footprint = Footprint::new(Point::default(), Size::new(10.0, 4.0), 0.0).padded(1.0);
        assert_eq!(footprint.size(), Size::new(12.0, 6.0));
    }

    #[test]
    fn test_footprint_contains_point_rotated() {
        let footprint = Footprint::new(Point::default(), Size::new(40.0, 10.0), 90.0);
        assert!(footprint.contains_point(Point::new(0.0, 15.0)));
        assert!(!footprint.contains_point(Point::new(15.0, 0.0)));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn footprint_strategy() -> impl Strategy<Value = Footprint> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..300.0,
            1.0f32..100.0,
            prop_oneof![Just(0.0f32), Just(90.0f32), -180.0f32..180.0],
        )
            .prop_map(|(x, y, w, h, rotation)| {
                Footprint::new(Point::new(x, y), Size::new(w, h), rotation)
            })
    }

    fn check_overlap_is_symmetric(a: Footprint, b: Footprint) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        Ok(())
    }

    fn check_footprint_overlaps_itself(a: Footprint) -> Result<(), TestCaseError> {
        prop_assert!(a.overlaps(&a));
        prop_assert!(a.contains_point(a.center()));
        Ok(())
    }

    fn check_bounds_enclose_corners(a: Footprint) -> Result<(), TestCaseError> {
        let bounds = a.bounds();
        let tolerance = 1e-2;
        for corner in a.corners() {
            prop_assert!(corner.x() >= bounds.min_x() - tolerance);
            prop_assert!(corner.x() <= bounds.max_x() + tolerance);
            prop_assert!(corner.y() >= bounds.min_y() - tolerance);
            prop_assert!(corner.y() <= bounds.max_y() + tolerance);
        }
        Ok(())
    }

    fn check_disjoint_bounds_never_overlap(a: Footprint, b: Footprint) -> Result<(), TestCaseError> {
        if !a.bounds().intersects(&b.bounds()) {
            prop_assert!(!a.overlaps(&b));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in footprint_strategy(), b in footprint_strategy()) {
            check_overlap_is_symmetric(a, b)?;
        }

        #[test]
        fn footprint_overlaps_itself(a in footprint_strategy()) {
            check_footprint_overlaps_itself(a)?;
        }

        #[test]
        fn bounds_enclose_corners(a in footprint_strategy()) {
            check_bounds_enclose_corners(a)?;
        }

        #[test]
        fn disjoint_bounds_never_overlap(a in footprint_strategy(), b in footprint_strategy()) {
            check_disjoint_bounds_never_overlap(a, b)?;
        }
    }
}
