use crate::model::geometry::union_all;
use geo::{ConcaveHull, ConvexHull, MultiPoint, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};

/// reduces the buffered parts of one origin's reachable network to its
/// service-area polygon.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum HullAlgorithm {
    /// convex hull of the buffered network. can bridge physical barriers
    /// such as rivers or highways without crossings.
    #[default]
    ConvexHull,
    /// concave hull of the buffered network's vertices; smaller concavity
    /// values follow the network more tightly
    ConcaveHull { concavity: f64 },
    /// the raw union of the buffered network
    BufferUnion,
}

impl HullAlgorithm {
    /// the service-area polygon for a set of buffered parts, or `None` when
    /// there are no parts
    pub fn run(&self, parts: Vec<Polygon<f64>>) -> Option<MultiPolygon<f64>> {
        if parts.is_empty() {
            return None;
        }
        match self {
            HullAlgorithm::ConvexHull => {
                // the hull of the union is the hull of all part vertices
                let hull = vertices(&parts).convex_hull();
                Some(MultiPolygon::new(vec![hull]))
            }
            HullAlgorithm::ConcaveHull { concavity } => {
                let points = vertices(&parts);
                let hull = if points.0.len() < 3 {
                    points.convex_hull()
                } else {
                    points.concave_hull(*concavity)
                };
                Some(MultiPolygon::new(vec![hull]))
            }
            HullAlgorithm::BufferUnion => {
                let multis = parts
                    .into_iter()
                    .map(|p| MultiPolygon::new(vec![p]))
                    .collect();
                union_all(multis, false)
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            HullAlgorithm::ConcaveHull { concavity } if !(concavity.is_finite() && *concavity > 0.0) => {
                Err(format!("concave hull concavity must be positive, found {concavity}"))
            }
            _ => Ok(()),
        }
    }
}

fn vertices(parts: &[Polygon<f64>]) -> MultiPoint<f64> {
    parts
        .iter()
        .flat_map(|p| p.exterior().0.iter().map(|c| Point(*c)))
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Area};

    fn parts() -> Vec<Polygon<f64>> {
        vec![
            polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)],
            polygon![(x: 3.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 1.0), (x: 3.0, y: 1.0)],
        ]
    }

    #[test]
    fn test_convex_hull_bridges_gap() {
        let hull = HullAlgorithm::ConvexHull.run(parts()).unwrap();
        assert!((hull.unsigned_area() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_buffer_union_keeps_gap() {
        let union = HullAlgorithm::BufferUnion.run(parts()).unwrap();
        assert!((union.unsigned_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_concave_hull_within_convex() {
        let concave = HullAlgorithm::ConcaveHull { concavity: 1.0 }
            .run(parts())
            .unwrap();
        assert!(concave.unsigned_area() <= 4.0 + 1e-9);
        assert!(concave.unsigned_area() > 0.0);
    }

    #[test]
    fn test_no_parts() {
        assert!(HullAlgorithm::ConvexHull.run(vec![]).is_none());
    }

    #[test]
    fn test_serde_tag() {
        let h: HullAlgorithm =
            serde_json::from_str(r#"{"type": "concave_hull", "concavity": 2.0}"#).unwrap();
        assert_eq!(h, HullAlgorithm::ConcaveHull { concavity: 2.0 });
        assert!(HullAlgorithm::ConcaveHull { concavity: 0.0 }.validate().is_err());
    }
}
