use super::{ego_subgraph, EgoSubgraph, HullAlgorithm};
use crate::model::{
    geometry::{union_all, Buffer},
    CoverageError,
};
use foodshed_osm::model::{
    osm::graph::{NodeIndex, TravelGraph},
    BufferRadii,
};
use geo::{MultiPolygon, Polygon};
use itertools::Itertools;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use uom::si::length::meter;

/// progress is logged after this many origins
const PROGRESS_INTERVAL: usize = 25;

/// computes per-origin service areas over one mode's projected graph and
/// unions them into a coverage polygon.
///
/// the engine only reads the graph, so origins are processed independently
/// and may be fanned out over the rayon thread pool. results are merged in
/// origin order, so the coverage polygon does not depend on scheduling.
pub struct ServiceAreaEngine<'a> {
    graph: &'a TravelGraph,
    edge_buffer_m: f64,
    node_buffer_m: f64,
    hull: HullAlgorithm,
    quadrant_segments: usize,
    parallelize: bool,
}

impl<'a> ServiceAreaEngine<'a> {
    pub fn new(
        graph: &'a TravelGraph,
        radii: &BufferRadii,
        hull: HullAlgorithm,
        quadrant_segments: usize,
        parallelize: bool,
    ) -> Result<ServiceAreaEngine<'a>, CoverageError> {
        radii.validate().map_err(CoverageError::InvalidConfiguration)?;
        hull.validate().map_err(CoverageError::InvalidConfiguration)?;
        if quadrant_segments == 0 {
            return Err(CoverageError::InvalidConfiguration(String::from(
                "quadrant_segments must be at least 1",
            )));
        }
        Ok(ServiceAreaEngine {
            graph,
            edge_buffer_m: radii.edge_buffer().get::<meter>(),
            node_buffer_m: radii.node_buffer().get::<meter>(),
            hull,
            quadrant_segments,
            parallelize,
        })
    }

    /// buffered node points and edge lines of a reachable subgraph
    pub fn footprint(&self, subgraph: &EgoSubgraph) -> Result<Vec<Polygon<f64>>, CoverageError> {
        let mut parts = vec![];
        for node_idx in subgraph.nodes.iter() {
            let node = self.graph.node(*node_idx).ok_or_else(|| {
                CoverageError::InternalError(format!("node {node_idx} missing from graph"))
            })?;
            parts.extend(node.point().buffer(self.node_buffer_m, self.quadrant_segments));
        }
        for edge_idx in subgraph.edges.iter() {
            let edge = self.graph.edge(*edge_idx).ok_or_else(|| {
                CoverageError::InternalError(format!("edge {edge_idx} missing from graph"))
            })?;
            parts.extend(edge.geometry.buffer(self.edge_buffer_m, self.quadrant_segments));
        }
        Ok(parts)
    }

    /// the reachable-area polygon for one origin within `radius_m` meters of
    /// network distance. `None` when the origin reaches nothing with area.
    pub fn service_area(
        &self,
        origin: NodeIndex,
        radius_m: f64,
    ) -> Result<Option<MultiPolygon<f64>>, CoverageError> {
        let subgraph = ego_subgraph(self.graph, origin, radius_m)?;
        if subgraph.is_empty() {
            return Ok(None);
        }
        let parts = self.footprint(&subgraph)?;
        Ok(self.hull.run(parts))
    }

    /// union of the service areas of every unique origin. `None` when no
    /// origin contributes a polygon, which means nothing is covered.
    pub fn coverage(
        &self,
        origins: &[NodeIndex],
        radius_m: f64,
    ) -> Result<Option<MultiPolygon<f64>>, CoverageError> {
        let unique = origins.iter().cloned().unique().collect_vec();
        let total = unique.len();
        if total == 0 {
            return Ok(None);
        }
        let mode = self.graph.mode();
        let processed = AtomicUsize::new(0);
        let run = |origin: &NodeIndex| {
            let result = self.service_area(*origin, radius_m);
            let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
            if count % PROGRESS_INTERVAL == 0 || count == total {
                log::info!(
                    "{mode} {radius_m:.1}m: processed {count}/{total} origin nodes"
                );
            }
            result
        };
        let areas: Vec<Option<MultiPolygon<f64>>> = if self.parallelize {
            unique.par_iter().map(run).collect::<Result<_, _>>()?
        } else {
            unique.iter().map(run).collect::<Result<_, _>>()?
        };
        let areas = areas.into_iter().flatten().collect_vec();
        Ok(union_all(areas, self.parallelize))
    }
}
