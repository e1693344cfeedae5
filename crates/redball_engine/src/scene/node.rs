//! Scene graph nodes

use super::component::{Component, StoredComponent};
use crate::foundation::math::Vec3;

slotmap::new_key_type! {
    /// Generational handle to a node stored in a [`Scene`](super::Scene)
    ///
    /// A handle stays invalid forever once its node is removed, even if the
    /// slot is later reused by another node.
    pub struct NodeId;
}

/// Named attachment point in the scene graph
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    position: Vec3,
    scale: Vec3,
    components: Vec<Box<dyn StoredComponent>>,
}

impl Node {
    pub(super) fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            position: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            components: Vec::new(),
        }
    }

    /// Node name (may be empty)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, `None` for the scene root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in creation order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the local position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Local scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the local scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Attach a component to this node
    pub fn add_component<T: Component>(&mut self, component: T) {
        self.components.push(Box::new(component));
    }

    /// Get the first component of type `T`
    pub fn component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| c.as_any().downcast_ref::<T>())
    }

    /// Get the first component of type `T` mutably
    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Check whether a component of type `T` is attached
    pub fn has_component<T: Component>(&self) -> bool {
        self.component::<T>().is_some()
    }

    /// Detach and return the first component of type `T`
    pub fn remove_component<T: Component>(&mut self) -> Option<T> {
        let index = self.components.iter().position(|c| c.as_any().is::<T>())?;
        self.components
            .remove(index)
            .into_any()
            .downcast::<T>()
            .ok()
            .map(|boxed| *boxed)
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Type names of the attached components, for diagnostics
    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.type_name()).collect()
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .field("position", &self.position)
            .field("components", &self.component_names())
            .finish()
    }
}
