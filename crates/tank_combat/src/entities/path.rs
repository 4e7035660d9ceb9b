//! Enemy route graph
//!
//! Route nodes are plain scene markers whose names encode the graph:
//! `path.NN.a,b,c` declares node `NN` with neighbours `a`, `b` and `c`.

use rand::Rng;
use tank_engine::foundation::math::Vec3;

/// Malformed route declarations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathGraphError {
    /// Name does not follow `path.NN.a,b,c`
    #[error("malformed path node name '{0}'")]
    MalformedName(String),

    /// Two markers declare the same node number
    #[error("path node {0} is declared twice")]
    DuplicateNode(u32),

    /// A neighbour list refers to a node that was never declared
    #[error("path node {node} lists unknown neighbour {neighbour}")]
    UnknownNeighbour {
        /// Declaring node
        node: u32,
        /// Missing neighbour
        neighbour: u32,
    },
}

/// One waypoint
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    /// Number from the marker name
    pub number: u32,
    /// World position of the marker
    pub position: Vec3,
    /// Indices of neighbouring waypoints in the owning graph
    pub neighbours: Vec<usize>,
}

/// Undirected-by-convention waypoint graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathGraph {
    nodes: Vec<PathNode>,
}

/// Split a marker name into its node number and neighbour numbers
pub fn parse_node_name(name: &str) -> Result<(u32, Vec<u32>), PathGraphError> {
    let malformed = || PathGraphError::MalformedName(name.to_owned());

    let rest = name.strip_prefix("path.").ok_or_else(malformed)?;
    let (number, neighbours) = rest.split_once('.').ok_or_else(malformed)?;
    let number = number.parse().map_err(|_| malformed())?;
    let neighbours = neighbours
        .split(',')
        .map(|neighbour| neighbour.trim().parse().map_err(|_| malformed()))
        .collect::<Result<Vec<u32>, _>>()?;

    Ok((number, neighbours))
}

impl PathGraph {
    /// Build the graph from `(marker name, world position)` pairs
    pub fn from_markers<'a, I>(markers: I) -> Result<Self, PathGraphError>
    where
        I: IntoIterator<Item = (&'a str, Vec3)>,
    {
        let mut declared = Vec::new();
        for (name, position) in markers {
            let (number, neighbours) = parse_node_name(name)?;
            if declared.iter().any(|(existing, _, _)| *existing == number) {
                return Err(PathGraphError::DuplicateNode(number));
            }
            declared.push((number, position, neighbours));
        }

        let index_of = |number: u32| declared.iter().position(|(n, _, _)| *n == number);

        let mut nodes = Vec::with_capacity(declared.len());
        for (number, position, neighbours) in &declared {
            let neighbours = neighbours
                .iter()
                .map(|&neighbour| {
                    index_of(neighbour).ok_or(PathGraphError::UnknownNeighbour {
                        node: *number,
                        neighbour,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            nodes.push(PathNode {
                number: *number,
                position: *position,
                neighbours,
            });
        }

        Ok(Self { nodes })
    }

    /// All waypoints in declaration order
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Waypoint by index
    pub fn node(&self, index: usize) -> Option<&PathNode> {
        self.nodes.get(index)
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no waypoints
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the waypoint nearest to `position`; the first wins ties
    pub fn closest(&self, position: &Vec3) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, node) in self.nodes.iter().enumerate() {
            let distance = (node.position - position).magnitude();
            if best.map_or(true, |(_, nearest)| distance < nearest) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Uniformly chosen neighbour of a waypoint
    pub fn random_neighbour<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Option<usize> {
        let neighbours = &self.nodes.get(index)?.neighbours;
        if neighbours.is_empty() {
            return None;
        }
        Some(neighbours[rng.gen_range(0..neighbours.len())])
    }
}
