use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// which side of a directed segment an adjacency entry was recorded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyDirection {
    /// successors of a node
    Forward,
    /// predecessors of a node
    Reverse,
}

impl AdjacencyDirection {
    pub fn opposite(&self) -> AdjacencyDirection {
        match self {
            AdjacencyDirection::Forward => AdjacencyDirection::Reverse,
            AdjacencyDirection::Reverse => AdjacencyDirection::Forward,
        }
    }
}

impl Display for AdjacencyDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjacencyDirection::Forward => write!(f, "forward"),
            AdjacencyDirection::Reverse => write!(f, "reverse"),
        }
    }
}
