//! Structure instances.

use std::sync::Arc;

use lyre_ir::{Name, NodeId};
use rustc_hash::FxHashMap;

use crate::Value;

/// An immutable structure instance: a type tag plus an ordered property map
/// with unique names.
///
/// Cloning shares the property storage.
#[derive(Clone, Debug)]
pub struct StructureInstance(Arc<InstanceData>);

#[derive(Debug)]
struct InstanceData {
    type_name: Name,
    definition: NodeId,
    properties: Vec<(Name, Value)>,
    index: FxHashMap<Name, usize>,
}

impl StructureInstance {
    /// Structure name.
    #[inline]
    pub fn type_name(&self) -> Name {
        self.0.type_name
    }

    /// Structure definition node this instance was built from.
    #[inline]
    pub fn definition(&self) -> NodeId {
        self.0.definition
    }

    /// Property by name.
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.0
            .index
            .get(&name)
            .map(|&slot| &self.0.properties[slot].1)
    }

    /// Properties in declaration order: inputs, then body binds.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = (Name, &Value)> + '_ {
        self.0.properties.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.0.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.properties.is_empty()
    }
}

impl PartialEq for StructureInstance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.definition == other.0.definition
                && self.0.properties == other.0.properties)
    }
}

/// Accumulates properties during construction.
#[derive(Debug)]
pub struct InstanceBuilder {
    type_name: Name,
    definition: NodeId,
    properties: Vec<(Name, Value)>,
    index: FxHashMap<Name, usize>,
}

impl InstanceBuilder {
    pub fn new(type_name: Name, definition: NodeId) -> Self {
        Self {
            type_name,
            definition,
            properties: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Add a property. A repeated name replaces the earlier value and keeps
    /// its position.
    pub fn set(&mut self, name: Name, value: Value) {
        if let Some(&slot) = self.index.get(&name) {
            self.properties[slot].1 = value;
        } else {
            self.index.insert(name, self.properties.len());
            self.properties.push((name, value));
        }
    }

    pub fn finish(self) -> StructureInstance {
        StructureInstance(Arc::new(InstanceData {
            type_name: self.type_name,
            definition: self.definition,
            properties: self.properties,
            index: self.index,
        }))
    }
}
