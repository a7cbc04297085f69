use foodshed_osm::model::osm::graph::{NodeIndex, TravelGraph};
use geo::Point;
use rstar::{primitives::GeomWithData, RTree};

type IndexedNode = GeomWithData<[f64; 2], NodeIndex>;

/// an R-tree over the projected node positions of a [`TravelGraph`]
pub struct NodeSpatialIndex {
    rtree: RTree<IndexedNode>,
}

impl NodeSpatialIndex {
    pub fn new(graph: &TravelGraph) -> NodeSpatialIndex {
        let entries = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(idx, node)| GeomWithData::new([node.x, node.y], idx))
            .collect::<Vec<_>>();
        NodeSpatialIndex {
            rtree: RTree::bulk_load(entries),
        }
    }

    /// the node closest to a projected point by planar distance. ties go to
    /// the lowest node index.
    pub fn nearest(&self, point: &Point<f64>) -> Option<NodeIndex> {
        let query = [point.x(), point.y()];
        let mut candidates = self.rtree.nearest_neighbor_iter_with_distance_2(&query);
        let (first, best_distance) = candidates.next()?;
        let tied = candidates
            .take_while(|(_, d)| *d <= best_distance)
            .map(|(n, _)| n.data);
        tied.chain(std::iter::once(first.data)).min()
    }
}
