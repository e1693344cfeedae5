//! Component trait and type-erased storage

use std::any::Any;

/// Marker trait for components
///
/// Anything attached to a [`Node`](super::Node) implements this trait. Components are
/// stored type-erased on their node and looked up again by concrete type.
pub trait Component: 'static + Send + Sync {}

/// Object-safe view over a stored component
pub(crate) trait StoredComponent: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn type_name(&self) -> &'static str;
}

impl<T: Component> StoredComponent for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
