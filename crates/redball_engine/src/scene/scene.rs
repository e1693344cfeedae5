//! Scene arena

use super::component::Component;
use super::node::{Node, NodeId};
use slotmap::SlotMap;
use thiserror::Error;

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The handle refers to a node that was removed (or never existed)
    #[error("Node {0:?} is not present in the scene")]
    StaleNode(NodeId),

    /// A required component is not attached to the node
    #[error("Node {node:?} has no {component} component")]
    MissingComponent {
        /// Node that was inspected
        node: NodeId,
        /// Expected component type
        component: &'static str,
    },

    /// The scene root is owned by the scene itself
    #[error("The scene root cannot be removed")]
    RootRemoval,
}

/// Scene graph owning every node
///
/// Nodes live in a generational arena and are addressed by [`NodeId`]. The root
/// node is created with the scene and hosts scene-wide components such as the
/// spatial index and the physics world.
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Scene {
    /// Create a new scene containing only the root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("Scene", None));
        Self { nodes, root }
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a named child of the root node
    pub fn create_child(&mut self, name: impl Into<String>) -> NodeId {
        let root = self.root;
        let node = self.nodes.insert(Node::new(name, Some(root)));
        self.nodes[root].children.push(node);
        log::debug!("Created node {:?} '{}'", node, self.nodes[node].name());
        node
    }

    /// Create a named child of an arbitrary node
    pub fn create_child_of(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::StaleNode(parent));
        }
        let node = self.nodes.insert(Node::new(name, Some(parent)));
        self.nodes[parent].children.push(node);
        log::debug!("Created node {:?} '{}' under {:?}", node, self.nodes[node].name(), parent);
        Ok(node)
    }

    /// Remove a node, its subtree and every attached component
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), SceneError> {
        if node == self.root {
            return Err(SceneError::RootRemoval);
        }
        let removed = self.nodes.remove(node).ok_or(SceneError::StaleNode(node))?;
        log::debug!("Removing node {:?} '{}'", node, removed.name());

        if let Some(parent) = removed.parent().and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|child| *child != node);
        }

        let mut pending = removed.children;
        while let Some(child) = pending.pop() {
            if let Some(child_node) = self.nodes.remove(child) {
                pending.extend(child_node.children);
            }
        }
        Ok(())
    }

    /// Check whether a node is still present
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Borrow a node
    pub fn node(&self, node: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(node).ok_or(SceneError::StaleNode(node))
    }

    /// Borrow a node mutably
    pub fn node_mut(&mut self, node: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(node).ok_or(SceneError::StaleNode(node))
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Attach a component to a node
    pub fn add_component<T: Component>(&mut self, node: NodeId, component: T) -> Result<(), SceneError> {
        self.node_mut(node)?.add_component(component);
        Ok(())
    }

    /// Get a component attached to a node
    pub fn component<T: Component>(&self, node: NodeId) -> Result<&T, SceneError> {
        self.node(node)?
            .component::<T>()
            .ok_or(SceneError::MissingComponent { node, component: std::any::type_name::<T>() })
    }

    /// Get a component attached to a node mutably
    pub fn component_mut<T: Component>(&mut self, node: NodeId) -> Result<&mut T, SceneError> {
        self.node_mut(node)?
            .component_mut::<T>()
            .ok_or(SceneError::MissingComponent { node, component: std::any::type_name::<T>() })
    }

    /// Find a direct child of `parent` by name
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes
            .get(parent)?
            .children()
            .iter()
            .copied()
            .find(|child| self.nodes.get(*child).is_some_and(|n| n.name() == name))
    }

    /// All nodes carrying a component of type `T`
    pub fn nodes_with_component<T: Component>(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.has_component::<T>())
            .map(|(id, _)| id)
            .collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
