use super::{
    graph::{OsmGraph, OsmNodes, OsmWays, TravelGraph},
    OsmError,
};
use crate::{
    algorithm::{projection::UtmZone, simplification, truncation},
    config::GraphBuildConfiguration,
    model::TravelMode,
};
use geo::{Geometry, MultiPolygon};

/// runs the osmnx-style construction pipeline over imported OSM elements:
/// component filtering, simplification, boundary truncation, a second
/// component filter, and finally projection into a [`TravelGraph`].
pub struct GraphBuilder {
    mode: TravelMode,
    config: GraphBuildConfiguration,
}

impl GraphBuilder {
    pub fn new(mode: TravelMode, config: GraphBuildConfiguration) -> GraphBuilder {
        GraphBuilder { mode, config }
    }

    /// builds the travel graph. the boundary is in WGS84 lon/lat degrees.
    pub fn build(
        &self,
        nodes: &OsmNodes,
        ways: &OsmWays,
        boundary: &MultiPolygon<f64>,
    ) -> Result<TravelGraph, OsmError> {
        let cc_ftr = &self.config.component_filter;

        eprintln!();
        log::info!("  (((2))) building {} graph from {} ways", self.mode, ways.len());
        let mut graph = OsmGraph::new(nodes, ways, &self.mode)?;
        self.check_not_empty(&graph, "after reading the network source")?;

        eprintln!();
        log::info!("  (((3))) truncating graph via connected components filtering");
        truncation::filter_components(&mut graph, cc_ftr)?;
        self.check_not_empty(&graph, "after component filtering")?;

        if self.config.simplify {
            eprintln!();
            log::info!("  (((4))) simplifying graph");
            simplification::simplify_graph(&mut graph)?;
        } else {
            eprintln!();
            log::info!("  (((4))) simplifying graph (skipped)");
        }

        eprintln!();
        log::info!("  (((5))) truncating graph via extent filtering");
        truncation::truncate_graph_polygon(&mut graph, boundary, self.config.truncate_by_edge)?;
        graph.remove_isolated_nodes();
        self.check_not_empty(&graph, "inside the boundary")?;

        eprintln!();
        log::info!("  (((6))) truncating graph via connected components filtering");
        truncation::filter_components(&mut graph, cc_ftr)?;
        self.check_not_empty(&graph, "after the final component filter")?;

        eprintln!();
        log::info!("  (((7))) projecting graph");
        let crs = UtmZone::for_extent(&Geometry::MultiPolygon(boundary.clone()))?;
        let result = TravelGraph::from_osm_graph(self.mode, &graph, crs)?;
        log::info!(
            "built {} graph in {} with {} nodes, {} edges",
            self.mode,
            crs,
            result.n_nodes(),
            result.n_edges()
        );
        Ok(result)
    }

    fn check_not_empty(&self, graph: &OsmGraph, stage: &str) -> Result<(), OsmError> {
        if graph.is_empty() {
            Err(OsmError::EmptyNetwork {
                mode: self.mode,
                stage: stage.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::osm::graph::{
        osm_graph::tests::{node, nodes, way},
        OsmNodeId,
    };
    use geo::{polygon, Polygon};

    fn boundary(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> MultiPolygon<f64> {
        let p: Polygon<f64> = polygon![
            (x: min_x, y: min_y),
            (x: max_x, y: min_y),
            (x: max_x, y: max_y),
            (x: min_x, y: max_y),
        ];
        MultiPolygon::new(vec![p])
    }

    fn inputs() -> (OsmNodes, OsmWays) {
        let ns = nodes(vec![
            node(1, 0.0, 0.0),
            node(2, 1.0, 0.0),
            node(3, 2.0, 0.0),
            node(4, 8.0, 8.0),
            node(5, 9.0, 8.0),
        ]);
        let ways = vec![
            way(10, &[1, 2, 3], &[("highway", "residential")]),
            way(11, &[4, 5], &[("highway", "residential")]),
        ];
        (ns, ways)
    }

    #[test]
    fn test_build_walk_graph() {
        let (ns, ways) = inputs();
        let builder = GraphBuilder::new(TravelMode::Walk, GraphBuildConfiguration::default());
        let b = boundary(-84.40, 33.74, -84.38, 33.76);
        let graph = builder.build(&ns, &ways, &b).unwrap();
        // the small component is dropped and node 2 is simplified away
        assert_eq!(graph.n_nodes(), 2);
        assert_eq!(graph.n_edges(), 2);
        assert_eq!(graph.nodes()[0].osmid, OsmNodeId(1));
        assert_eq!(graph.nodes()[1].osmid, OsmNodeId(3));
        for edge in graph.edges() {
            assert_eq!(edge.geometry.0.len(), 3);
        }
        assert_eq!(graph.crs().zone, 16);
    }

    #[test]
    fn test_boundary_without_network_is_empty() {
        let (ns, ways) = inputs();
        let builder = GraphBuilder::new(TravelMode::Walk, GraphBuildConfiguration::default());
        let b = boundary(-80.0, 30.0, -79.9, 30.1);
        let result = builder.build(&ns, &ways, &b);
        assert!(matches!(result, Err(OsmError::EmptyNetwork { .. })));
    }
}
