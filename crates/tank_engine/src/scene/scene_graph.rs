//! Hierarchical node store
//!
//! Nodes live in a slot-map arena and refer to each other by [`NodeId`].
//! The graph owns every node; parent links are plain handles, so there are
//! no reference cycles. The root list defines document order, which in turn
//! fixes the order in which collision pairs and ray candidates are visited.

use slotmap::SlotMap;

use crate::foundation::math::{translation_of, Mat4, Vec3};
use crate::scene::node::Node;

slotmap::new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`]
    pub struct NodeId;
}

/// Structural errors raised while building the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// Handle does not refer to a live node
    #[error("node {0:?} does not exist")]
    MissingNode(NodeId),

    /// Reparenting would make a node its own ancestor
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },
}

/// Scene graph owning a forest of nodes
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    /// Create a new empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached node and return its handle
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.nodes.insert(node)
    }

    /// Get a node by handle
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable node by handle
    ///
    /// Links cannot be edited through the returned reference.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes in the arena, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root handles in document order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// First node with the given name, attached or not
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// Make a node a scene root.
    ///
    /// A node that currently has a parent is detached from it first. Adding
    /// an existing root again is a no-op.
    pub fn add_node(&mut self, id: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(id) {
            return Err(SceneError::MissingNode(id));
        }
        self.detach_from_parent(id);
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
        Ok(())
    }

    /// Attach `child` as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        for id in [parent, child] {
            if !self.nodes.contains_key(id) {
                return Err(SceneError::MissingNode(id));
            }
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }

        self.roots.retain(|&root| root != child);
        self.detach_from_parent(child);

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Detach a node's subtree from the scene and clear its parent link.
    ///
    /// The nodes stay allocated so outstanding handles remain valid. Returns
    /// whether anything was detached; removing twice is harmless.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if let Some(index) = self.roots.iter().position(|&root| root == id) {
            self.roots.remove(index);
            return true;
        }
        self.detach_from_parent(id)
    }

    /// Detach a node and free its whole subtree from the arena
    pub fn destroy_node(&mut self, id: NodeId) {
        self.remove_node(id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
        }
    }

    /// Whether the node is reachable from the root list
    pub fn has_node(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            match self.nodes.get(current) {
                Some(node) => match node.parent {
                    Some(parent) => current = parent,
                    None => return self.roots.contains(&current),
                },
                None => return false,
            }
        }
    }

    /// Whether `ancestor` appears on the parent chain of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Whether either node is an ancestor of the other
    pub fn is_related(&self, a: NodeId, b: NodeId) -> bool {
        self.is_ancestor(a, b) || self.is_ancestor(b, a)
    }

    /// Depth-first traversal over every attached node.
    ///
    /// `before` runs on a node ahead of its children, `after` once they are
    /// all visited. Order follows the root list, then child order.
    pub fn traverse<B, A>(&self, mut before: B, mut after: A)
    where
        B: FnMut(NodeId, &Node),
        A: FnMut(NodeId, &Node),
    {
        for &root in &self.roots {
            self.traverse_node(root, &mut before, &mut after);
        }
    }

    fn traverse_node<B, A>(&self, id: NodeId, before: &mut B, after: &mut A)
    where
        B: FnMut(NodeId, &Node),
        A: FnMut(NodeId, &Node),
    {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        before(id, node);
        for &child in &node.children {
            self.traverse_node(child, before, after);
        }
        after(id, node);
    }

    /// Pre-order snapshot of the attached nodes.
    ///
    /// Scans that may detach nodes while running iterate this snapshot and
    /// re-check [`has_node`](Self::has_node) instead of walking live links.
    pub fn traversal_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.traverse(|id, _| order.push(id), |_, _| {});
        order
    }

    /// Accumulated transform: ancestors' local matrices times the node's own
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(id)?;
        let mut world = *node.matrix();
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let parent = self.nodes.get(parent_id)?;
            world = parent.matrix() * world;
            current = parent.parent;
        }
        Some(world)
    }

    /// World-space position of a node
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_transform(id).map(|world| translation_of(&world))
    }

    fn detach_from_parent(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get_mut(id).and_then(|node| node.parent.take()) else {
            return false;
        };
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.retain(|&child| child != id);
        }
        true
    }
}
