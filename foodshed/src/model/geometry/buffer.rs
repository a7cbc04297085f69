use geo::{Coord, Line, LineString, Point, Polygon};
use std::f64::consts::{FRAC_PI_2, PI};

/// approximates the area within a fixed planar distance of a geometry.
/// curves are traced with `quadrant_segments` segments per quarter circle,
/// so a buffered point is a regular polygon with `4 * quadrant_segments`
/// vertices.
pub trait Buffer {
    /// polygon parts whose union covers every location within `radius` of
    /// this geometry. a non-positive radius yields no parts.
    fn buffer(&self, radius: f64, quadrant_segments: usize) -> Vec<Polygon<f64>>;
}

impl Buffer for Point<f64> {
    fn buffer(&self, radius: f64, quadrant_segments: usize) -> Vec<Polygon<f64>> {
        if radius.is_nan() || radius <= 0.0 {
            return vec![];
        }
        vec![circle(self.0, radius, quadrant_segments)]
    }
}

impl Buffer for Line<f64> {
    fn buffer(&self, radius: f64, quadrant_segments: usize) -> Vec<Polygon<f64>> {
        if radius.is_nan() || radius <= 0.0 {
            return vec![];
        }
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        if dx == 0.0 && dy == 0.0 {
            return vec![circle(self.start, radius, quadrant_segments)];
        }
        vec![stadium(self, radius, quadrant_segments)]
    }
}

impl Buffer for LineString<f64> {
    fn buffer(&self, radius: f64, quadrant_segments: usize) -> Vec<Polygon<f64>> {
        match self.0.as_slice() {
            [] => vec![],
            [only] => Point(*only).buffer(radius, quadrant_segments),
            _ => self
                .lines()
                .flat_map(|line| line.buffer(radius, quadrant_segments))
                .collect(),
        }
    }
}

fn arc_point(center: Coord<f64>, radius: f64, angle: f64) -> Coord<f64> {
    Coord {
        x: center.x + radius * angle.cos(),
        y: center.y + radius * angle.sin(),
    }
}

fn circle(center: Coord<f64>, radius: f64, quadrant_segments: usize) -> Polygon<f64> {
    let n = 4 * quadrant_segments.max(1);
    let mut coords = (0..n)
        .map(|i| arc_point(center, radius, 2.0 * PI * i as f64 / n as f64))
        .collect::<Vec<_>>();
    coords.push(coords[0]);
    Polygon::new(LineString::new(coords), vec![])
}

/// a segment buffered with round caps: a half circle around each endpoint
/// joined by the two offset sides, wound counter-clockwise.
fn stadium(line: &Line<f64>, radius: f64, quadrant_segments: usize) -> Polygon<f64> {
    let half = 2 * quadrant_segments.max(1);
    let heading = (line.end.y - line.start.y).atan2(line.end.x - line.start.x);
    let mut coords = Vec::with_capacity(2 * (half + 1) + 1);
    for i in 0..=half {
        let angle = heading - FRAC_PI_2 + PI * i as f64 / half as f64;
        coords.push(arc_point(line.end, radius, angle));
    }
    for i in 0..=half {
        let angle = heading + FRAC_PI_2 + PI * i as f64 / half as f64;
        coords.push(arc_point(line.start, radius, angle));
    }
    coords.push(coords[0]);
    Polygon::new(LineString::new(coords), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, Contains};

    #[test]
    fn test_point_buffer_area() {
        let parts = Point::new(10.0, 10.0).buffer(40.0, 8);
        assert_eq!(parts.len(), 1);
        // regular 32-gon inscribed in a circle of radius 40
        let n = 32.0;
        let expected = 0.5 * n * 40.0_f64.powi(2) * (2.0 * PI / n).sin();
        assert!((parts[0].unsigned_area() - expected).abs() < 1e-6);
        assert!(parts[0].contains(&Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_segment_buffer_is_stadium() {
        let line = Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 100.0, y: 0.0 });
        let parts = line.buffer(10.0, 8);
        assert_eq!(parts.len(), 1);
        let area = parts[0].unsigned_area();
        let expected = 100.0 * 20.0 + PI * 100.0;
        assert!((area - expected).abs() / expected < 0.01, "{area}");
        assert!(parts[0].contains(&Point::new(50.0, 9.0)));
        assert!(parts[0].contains(&Point::new(-9.0, 0.0)));
        assert!(!parts[0].contains(&Point::new(50.0, 11.0)));
    }

    #[test]
    fn test_linestring_buffer_parts() {
        let ls = LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(ls.buffer(1.0, 4).len(), 2);
        assert!(ls.buffer(0.0, 4).is_empty());
        let single = LineString::from(vec![(3.0, 3.0)]);
        assert_eq!(single.buffer(1.0, 4).len(), 1);
    }
}
