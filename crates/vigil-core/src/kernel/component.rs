use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::kernel::error::Result;

/// Core component lifecycle trait for all kernel components
#[async_trait]
pub trait KernelComponent: Any + Send + Sync + Debug {
    fn name(&self) -> &'static str;
    async fn initialize(&self) -> Result<()>;
    async fn start(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
}

/// Registry storing components as `Arc<dyn KernelComponent>`.
///
/// Instances are keyed by the *concrete* type's `TypeId` and additionally
/// indexed by component name, so a collaborator holding only a fixed string
/// identifier can still resolve its component.
#[derive(Default, Debug)]
pub struct DependencyRegistry {
    instances: HashMap<TypeId, Arc<dyn KernelComponent>>,
    names: HashMap<&'static str, TypeId>,
}

impl DependencyRegistry {
    /// Create a new empty dependency registry
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
            names: HashMap::new(),
        }
    }

    /// Register a component instance. Stores it as Arc<dyn KernelComponent>.
    /// Keyed by the TypeId of the concrete type V; the component's name is
    /// indexed as well. Registering the same name again re-points the index.
    pub fn register_instance<V>(&mut self, instance: Arc<V>)
    where
        V: KernelComponent + 'static,
    {
        let type_id = TypeId::of::<V>();
        self.names.insert(instance.name(), type_id);
        // The instance Arc<V> is cast to Arc<dyn KernelComponent> for storage
        self.instances.insert(type_id, instance);
    }

    /// Get a component instance by the TypeId of its concrete type.
    pub fn get_component_by_id(&self, type_id: &TypeId) -> Option<Arc<dyn KernelComponent>> {
        self.instances.get(type_id).cloned()
    }

    /// Get a component instance by its registered name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn KernelComponent>> {
        self.names
            .get(name)
            .and_then(|type_id| self.instances.get(type_id))
            .cloned()
    }

    /// Get a component instance by concrete type T.
    /// Returns Arc<T> if found and downcast is successful.
    pub fn get_concrete<T: KernelComponent + 'static>(&self) -> Option<Arc<T>> {
        let type_id = TypeId::of::<T>();
        self.instances.get(&type_id).and_then(|component| {
            // KernelComponent: Any, so the Arc can be downcast to the
            // concrete type.
            let arc_any: Arc<dyn Any + Send + Sync> = component.clone();
            Arc::downcast::<T>(arc_any).ok()
        })
    }

    /// Get all registered component trait objects.
    pub fn get_all_components(&self) -> Vec<Arc<dyn KernelComponent>> {
        self.instances.values().cloned().collect()
    }

    /// Names of all registered components.
    pub fn registered_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.names.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Clear all instances.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.names.clear();
    }
}
