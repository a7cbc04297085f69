use crate::model::osm::graph::OsmNodeId;
use kdam::tqdm;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashSet},
};

/// selects which weakly-connected components survive graph construction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ComponentFilter {
    #[default]
    Largest,
    TopK {
        k: usize,
    },
    KeepAll,
}

impl std::fmt::Display for ComponentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentFilter::Largest => write!(f, "largest"),
            ComponentFilter::TopK { k } => write!(f, "top-{k}"),
            ComponentFilter::KeepAll => write!(f, "keep all"),
        }
    }
}

impl ComponentFilter {
    /// filters the connected node components, retaining their original order.
    /// ties in component size go to the component found first.
    pub fn assign_components(&self, components: Vec<Vec<OsmNodeId>>) -> Vec<Vec<OsmNodeId>> {
        let k = match self {
            ComponentFilter::Largest => 1,
            ComponentFilter::TopK { k } => *k,
            ComponentFilter::KeepAll => return components,
        };
        let mut heap: BinaryHeap<FilterQueueElement> = BinaryHeap::with_capacity(k + 1);
        let iter = tqdm!(
            components.iter().enumerate(),
            desc = format!("assign components using '{self}' component filter"),
            total = components.len()
        );
        for (index, component) in iter {
            heap.push(FilterQueueElement::new(component, index));
            if heap.len() > k {
                let _ = heap.pop();
            }
        }
        eprintln!();
        let keep_indices: HashSet<usize> = heap.iter().map(|fqe| fqe.index).collect();
        components
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| keep_indices.contains(idx))
            .map(|(_, c)| c)
            .collect()
    }
}

/// max-heap element where the "greatest" element is the one to evict first:
/// the smallest component, and among equals the one found last.
#[derive(Clone, Eq, PartialEq)]
struct FilterQueueElement {
    size: usize,
    index: usize,
}

impl FilterQueueElement {
    fn new(component: &[OsmNodeId], index: usize) -> FilterQueueElement {
        FilterQueueElement {
            size: component.len(),
            index,
        }
    }
}

impl Ord for FilterQueueElement {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for FilterQueueElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[i64]) -> Vec<OsmNodeId> {
        v.iter().map(|i| OsmNodeId(*i)).collect()
    }

    #[test]
    fn test_largest() {
        let components = vec![ids(&[1, 2]), ids(&[3, 4, 5]), ids(&[6])];
        let result = ComponentFilter::Largest.assign_components(components);
        assert_eq!(result, vec![ids(&[3, 4, 5])]);
    }

    #[test]
    fn test_largest_tie_keeps_first() {
        let components = vec![ids(&[1, 2]), ids(&[3, 4])];
        let result = ComponentFilter::Largest.assign_components(components);
        assert_eq!(result, vec![ids(&[1, 2])]);
    }

    #[test]
    fn test_top_k_and_keep_all() {
        let components = vec![ids(&[1, 2]), ids(&[3, 4, 5]), ids(&[6])];
        let top2 = ComponentFilter::TopK { k: 2 }.assign_components(components.clone());
        assert_eq!(top2, vec![ids(&[1, 2]), ids(&[3, 4, 5])]);
        let all = ComponentFilter::KeepAll.assign_components(components.clone());
        assert_eq!(all, components);
    }
}
