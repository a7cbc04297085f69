use super::{
    graph::{osm_element_filter::ElementFilter, OsmNodeData, OsmNodeId, OsmNodes, OsmWayData, OsmWays},
    OsmError,
};
use geo::{BoundingRect, Coord, Intersects, MultiPolygon, Rect};
use itertools::Itertools;
use kdam::{tqdm, Bar, BarExt};
use osmpbf::{Element, ElementReader};
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

/// meters per degree of latitude, used to grow a geographic bounding box
const METERS_PER_DEGREE: f64 = 111_320.0;

/// the bounding box of an extent, grown by `buffer_m` meters in every
/// direction. longitude growth is scaled by the cosine of the box's center
/// latitude.
pub fn expand_extent(extent: &MultiPolygon<f64>, buffer_m: f64) -> Result<Rect<f64>, OsmError> {
    let rect = extent
        .bounding_rect()
        .ok_or_else(|| OsmError::InvalidExtent(String::from("extent has no bounding box")))?;
    let dlat = buffer_m / METERS_PER_DEGREE;
    let cos_lat = rect.center().y.to_radians().cos();
    if cos_lat <= f64::EPSILON {
        return Err(OsmError::InvalidExtent(format!(
            "extent centered at latitude {} cannot be expanded",
            rect.center().y
        )));
    }
    let dlon = buffer_m / (METERS_PER_DEGREE * cos_lat);
    let min = Coord {
        x: rect.min().x - dlon,
        y: (rect.min().y - dlat).max(-90.0),
    };
    let max = Coord {
        x: rect.max().x + dlon,
        y: (rect.max().y + dlat).min(90.0),
    };
    Ok(Rect::new(min, max))
}

/// reads a PBF file and stores the Ways and Nodes in lookup objects.
/// - if provided, nodes outside of the bounding box are dropped
/// - the provided [`ElementFilter`] filters ways by their tags
/// - ways that reference dropped nodes are split into the runs that remain
/// - nodes that are not referenced by any retained way are dropped
pub fn read_pbf(
    filepath: &str,
    filter: &ElementFilter,
    bbox: Option<&Rect<f64>>,
) -> Result<(OsmNodes, OsmWays), OsmError> {
    let reader = ElementReader::from_path(Path::new(filepath)).map_err(|e| {
        OsmError::PbfLibError {
            filepath: filepath.to_string(),
            source: e,
        }
    })?;

    let mut reader_bar = Bar::builder()
        .desc(filepath)
        .unit(" rows")
        .unit_scale(true)
        .build()
        .map_err(OsmError::InternalError)?;

    let mut nodes_map: OsmNodes = HashMap::new();
    let mut raw_ways: Vec<OsmWayData> = vec![];
    let within_bbox = |n: &OsmNodeData| match bbox {
        Some(rect) => rect.intersects(&n.get_point()),
        None => true,
    };

    reader
        .for_each(|e| {
            let _ = reader_bar.update(1);
            match e {
                Element::Node(node) => {
                    let n = OsmNodeData::from(&node);
                    if within_bbox(&n) {
                        nodes_map.insert(n.osmid, n);
                    }
                }
                Element::DenseNode(dense) => {
                    let n = OsmNodeData::from(&dense);
                    if within_bbox(&n) {
                        nodes_map.insert(n.osmid, n);
                    }
                }
                Element::Way(way) => {
                    let tags = way.tags().collect_vec();
                    if filter.accept_way_tags(&tags) {
                        raw_ways.push(OsmWayData::new(&way));
                    }
                }
                Element::Relation(_) => {}
            }
        })
        .map_err(|e| OsmError::PbfLibError {
            filepath: filepath.to_string(),
            source: e,
        })?;
    eprintln!();

    let ways = split_ways_on_missing_nodes(raw_ways, &nodes_map);
    let nodes = retain_way_nodes(nodes_map, &ways);

    log::info!(
        "{} ways and {} nodes collected from OSM pbf resource {}",
        ways.len(),
        nodes.len(),
        filepath
    );
    Ok((nodes, ways))
}

/// replaces each way by the runs of its nodes found in the node collection.
pub fn split_ways_on_missing_nodes(ways: Vec<OsmWayData>, nodes: &OsmNodes) -> OsmWays {
    let iter = tqdm!(
        ways.iter(),
        desc = "split ways with missing nodes",
        total = ways.len()
    );
    let result = iter
        .flat_map(|way| way.split_on_missing_nodes(nodes))
        .collect_vec();
    eprintln!();
    result
}

/// drops nodes that no way references.
pub fn retain_way_nodes(mut nodes: OsmNodes, ways: &OsmWays) -> OsmNodes {
    let referenced: HashSet<OsmNodeId> = ways
        .iter()
        .flat_map(|w| w.nodes.iter().cloned())
        .collect();
    nodes.retain(|id, _| referenced.contains(id));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::osm::graph::OsmWayId;
    use geo::{polygon, Polygon};

    #[test]
    fn test_expand_extent() {
        let p: Polygon<f64> = polygon![
            (x: -84.40, y: 33.70),
            (x: -84.30, y: 33.70),
            (x: -84.30, y: 33.80),
            (x: -84.40, y: 33.80),
        ];
        let rect = expand_extent(&MultiPolygon::new(vec![p]), 500.0).unwrap();
        let dlat = 500.0 / 111_320.0;
        assert!((rect.min().y - (33.70 - dlat)).abs() < 1e-9);
        assert!((rect.max().y - (33.80 + dlat)).abs() < 1e-9);
        // longitude grows more than latitude away from the equator
        assert!(rect.max().x - (-84.30) > dlat);
    }

    #[test]
    fn test_split_and_retain() {
        let nodes: OsmNodes = [1, 2, 4, 5, 9]
            .iter()
            .map(|i| {
                let n = OsmNodeData::new(OsmNodeId(*i), *i as f64, 0.0);
                (n.osmid, n)
            })
            .collect();
        let way = OsmWayData::from_tags(
            OsmWayId(7),
            [1, 2, 3, 4, 5].iter().map(|i| OsmNodeId(*i)).collect(),
            &[("highway", "residential")],
        );
        let ways = split_ways_on_missing_nodes(vec![way], &nodes);
        assert_eq!(ways.len(), 2);
        assert_eq!(ways[0].nodes, vec![OsmNodeId(1), OsmNodeId(2)]);
        assert_eq!(ways[1].nodes, vec![OsmNodeId(4), OsmNodeId(5)]);

        let retained = retain_way_nodes(nodes, &ways);
        assert_eq!(retained.len(), 4);
        assert!(!retained.contains_key(&OsmNodeId(9)));
    }
}
