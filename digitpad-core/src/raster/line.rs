//! Bresenham line walk

use crate::geometry::Point;

/// Iterator over the lattice points of a line, both endpoints included
///
/// The walk is 8-connected for every slope: consecutive points differ by at
/// most one in each axis.
#[derive(Debug, Clone)]
pub struct Line {
    current: Point,
    end: Point,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        Self {
            current: start,
            end,
            dx,
            dy,
            sx: if end.x > start.x { 1 } else { -1 },
            sy: if end.y > start.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }

        let point = self.current;
        if point == self.end {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.current.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.current.y += self.sy;
        }

        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn walk(a: (i32, i32), b: (i32, i32)) -> Vec<(i32, i32)> {
        Line::new(Point::new(a.0, a.1), Point::new(b.0, b.1))
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn test_single_point() {
        assert_eq!(walk((5, 5), (5, 5)), [(5, 5)]);
    }

    #[test]
    fn test_horizontal_and_vertical() {
        assert_eq!(walk((0, 0), (3, 0)), [(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(walk((2, 3), (2, 0)), [(2, 3), (2, 2), (2, 1), (2, 0)]);
    }

    #[test]
    fn test_diagonal() {
        assert_eq!(walk((0, 0), (3, 3)), [(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_shallow_slope() {
        assert_eq!(
            walk((0, 0), (4, 2)),
            [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]
        );
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn endpoints_and_connectivity(
                x0 in -50i32..370, y0 in -50i32..290,
                x1 in -50i32..370, y1 in -50i32..290,
            ) {
                let points = walk((x0, y0), (x1, y1));

                prop_assert_eq!(points.first().copied(), Some((x0, y0)));
                prop_assert_eq!(points.last().copied(), Some((x1, y1)));

                let expected = (x1 - x0).abs().max((y1 - y0).abs()) as usize + 1;
                prop_assert_eq!(points.len(), expected);

                for pair in points.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    prop_assert!((a.0 - b.0).abs() <= 1);
                    prop_assert!((a.1 - b.1).abs() <= 1);
                    prop_assert!(a != b);
                }
            }
        }
    }
}
