use super::NodeSpatialIndex;
use crate::model::{provider::ProviderPoint, CoverageError};
use foodshed_osm::{
    algorithm::projection::Transformer,
    model::osm::graph::{NodeIndex, TravelGraph},
};
use geo::Point;
use itertools::Itertools;

/// the nearest graph node of every provider for one travel mode. several
/// providers may share a node; only the unique nodes are expanded by the
/// service-area engine.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginAssignment {
    /// provider id and its origin node, in provider order
    pub provider_nodes: Vec<(String, NodeIndex)>,
    /// sorted, de-duplicated origin nodes
    pub unique_nodes: Vec<NodeIndex>,
}

impl OriginAssignment {
    /// projects WGS84 provider locations into the graph's CRS and snaps each
    /// one to its nearest node.
    pub fn resolve(
        graph: &TravelGraph,
        providers: &[ProviderPoint],
        transformer: &Transformer,
    ) -> Result<OriginAssignment, CoverageError> {
        let projected = providers
            .iter()
            .map(|p| {
                let coord = transformer.to_projected(p.point().0)?;
                Ok((p.id.clone(), Point(coord)))
            })
            .collect::<Result<Vec<_>, CoverageError>>()?;
        OriginAssignment::from_projected(graph, &projected)
    }

    /// snaps already-projected points to their nearest nodes
    pub fn from_projected(
        graph: &TravelGraph,
        points: &[(String, Point<f64>)],
    ) -> Result<OriginAssignment, CoverageError> {
        if points.is_empty() {
            return Ok(OriginAssignment {
                provider_nodes: vec![],
                unique_nodes: vec![],
            });
        }
        let index = NodeSpatialIndex::new(graph);
        let provider_nodes = points
            .iter()
            .map(|(id, point)| {
                let node = index.nearest(point).ok_or_else(|| {
                    CoverageError::InternalError(format!(
                        "cannot snap provider {id}, the {} graph has no nodes",
                        graph.mode()
                    ))
                })?;
                Ok((id.clone(), node))
            })
            .collect::<Result<Vec<_>, CoverageError>>()?;
        let unique_nodes = provider_nodes
            .iter()
            .map(|(_, n)| *n)
            .sorted()
            .dedup()
            .collect_vec();
        log::info!(
            "{} providers resolved to {} unique {} origin nodes",
            provider_nodes.len(),
            unique_nodes.len(),
            graph.mode()
        );
        Ok(OriginAssignment {
            provider_nodes,
            unique_nodes,
        })
    }

    /// OSM ids of the unique origin nodes, sorted
    pub fn unique_osmids(&self, graph: &TravelGraph) -> Vec<i64> {
        graph
            .osmids(&self.unique_nodes)
            .into_iter()
            .map(|id| id.0)
            .sorted()
            .collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::service_area::tests::line_graph;

    #[test]
    fn test_snap_and_dedup() {
        let graph = line_graph(&[0.0, 100.0, 200.0], 500.0);
        let points = vec![
            (String::from("a"), Point::new(10.0, 520.0)),
            (String::from("b"), Point::new(-5.0, 480.0)),
            (String::from("c"), Point::new(190.0, 500.0)),
        ];
        let assignment = OriginAssignment::from_projected(&graph, &points).unwrap();
        assert_eq!(
            assignment.provider_nodes,
            vec![
                (String::from("a"), 0),
                (String::from("b"), 0),
                (String::from("c"), 2)
            ]
        );
        assert_eq!(assignment.unique_nodes, vec![0, 2]);
        assert_eq!(assignment.unique_osmids(&graph), vec![1, 3]);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let graph = line_graph(&[0.0, 100.0], 0.0);
        let points = vec![(String::from("mid"), Point::new(50.0, 0.0))];
        let assignment = OriginAssignment::from_projected(&graph, &points).unwrap();
        assert_eq!(assignment.unique_nodes, vec![0]);
    }

    #[test]
    fn test_no_providers() {
        let graph = line_graph(&[0.0, 100.0], 0.0);
        let assignment = OriginAssignment::from_projected(&graph, &[]).unwrap();
        assert!(assignment.unique_nodes.is_empty());
    }
}
