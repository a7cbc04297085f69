use crate::model::osm::{
    graph::{OsmGraph, OsmNodeId},
    OsmError,
};
use geo::{Intersects, MultiPolygon};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashSet;
use wkt::ToWkt;

/// removes nodes that lie outside of the provided extent. when
/// `truncate_by_edge` is set, an outside node is retained if any of its
/// neighbors lies inside the extent. returns the number of nodes removed.
pub fn truncate_graph_polygon(
    graph: &mut OsmGraph,
    extent: &MultiPolygon<f64>,
    truncate_by_edge: bool,
) -> Result<usize, OsmError> {
    if extent.0.is_empty() {
        return Err(OsmError::InvalidExtent(String::from(
            "cannot truncate graph to an empty extent",
        )));
    }
    log::info!("identifying all nodes that lie outside the polygon");
    log::debug!("truncation extent: {}", extent.wkt_string());
    let node_ids = graph.node_ids();
    let inside: HashSet<OsmNodeId> = node_ids
        .par_iter()
        .map(|node_id| {
            let node = graph.get_node_data(node_id)?;
            Ok((*node_id, extent.intersects(&node.get_point())))
        })
        .collect::<Result<Vec<_>, OsmError>>()?
        .into_iter()
        .filter_map(|(id, is_inside)| if is_inside { Some(id) } else { None })
        .collect();

    let remove_nodes = node_ids
        .iter()
        .filter(|node_id| {
            if inside.contains(node_id) {
                return false;
            }
            if truncate_by_edge {
                let touches_extent = graph
                    .get_undirected_neighbors(node_id)
                    .iter()
                    .any(|n| inside.contains(n));
                !touches_extent
            } else {
                true
            }
        })
        .cloned()
        .collect_vec();

    let n_removed = remove_nodes.len();
    for node_id in remove_nodes.iter() {
        graph.disconnect_node(node_id, true)?;
    }
    if truncate_by_edge {
        log::info!(
            "removed {n_removed} nodes not connected by edges to nodes within the provided extent"
        );
    } else {
        log::info!("removed {n_removed} nodes found outside the provided extent");
    }
    Ok(n_removed)
}
