mod ego_subgraph;
mod hull_algorithm;
mod service_area_engine;

pub use ego_subgraph::{ego_subgraph, EgoSubgraph};
pub use hull_algorithm::HullAlgorithm;
pub use service_area_engine::ServiceAreaEngine;

#[cfg(test)]
pub(crate) mod tests {
    use foodshed_osm::{
        algorithm::projection::UtmZone,
        model::{
            osm::graph::{OsmNodeId, TravelEdge, TravelGraph, TravelNode},
            TravelMode,
        },
    };
    use geo::LineString;

    /// a straight walk graph along y with a node at each x position and
    /// bidirectional edges between neighbors. node osmids start at 1.
    pub(crate) fn line_graph(xs: &[f64], y: f64) -> TravelGraph {
        let nodes = xs
            .iter()
            .enumerate()
            .map(|(i, x)| TravelNode {
                osmid: OsmNodeId(i as i64 + 1),
                x: *x,
                y,
            })
            .collect::<Vec<_>>();
        let mut edges = vec![];
        for i in 1..xs.len() {
            for (src, dst) in [(i - 1, i), (i, i - 1)] {
                edges.push(TravelEdge {
                    src,
                    dst,
                    length_m: (xs[dst] - xs[src]).abs(),
                    geometry: LineString::from(vec![(xs[src], y), (xs[dst], y)]),
                });
            }
        }
        let crs = UtmZone::new(16, true).unwrap();
        TravelGraph::new(TravelMode::Walk, crs, nodes, edges).unwrap()
    }
}
