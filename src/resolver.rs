//! container resolution registry
//!
//! anilist queries declare list-valued fields whose dto-side type is an
//! abstract container shape rather than a committed representation. the
//! registry maps each abstract shape to one concrete container and hands out
//! cached converters that normalize raw json for that container, including
//! nested instantiations (a sequence of sequences resolves recursively).
//!
//! the registry itself is process-wide, constructed exactly once on first use,
//! and read-mostly afterwards: the shape table is fixed at construction and
//! the converter cache only grows.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// abstract container shape, unparameterized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerShape {
    /// ordered sequence of T
    Sequence,
    /// set of T
    Set,
    /// mapping from string to T
    Mapping,
}

impl ContainerShape {
    /// shape name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            ContainerShape::Sequence => "sequence",
            ContainerShape::Set => "set",
            ContainerShape::Mapping => "mapping",
        }
    }
}

/// concrete container representation a shape resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConcreteContainer {
    /// contiguous ordered collection (`Vec`)
    Vec,
}

/// fully-instantiated type descriptor
///
/// a concrete leaf is keyed by its [`TypeId`]; an abstract container carries
/// its shape plus the descriptor of its type argument, so nested generics
/// (e.g. sequence of sequence of T) form a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    /// concrete type, identified by rust type id
    Concrete(TypeId),
    /// abstract container parameterized by an inner descriptor
    Abstract(ContainerShape, Box<TypeKey>),
}

impl TypeKey {
    /// descriptor for a concrete type
    pub fn of<T: 'static>() -> Self {
        TypeKey::Concrete(TypeId::of::<T>())
    }

    /// ordered sequence of `item`
    pub fn sequence_of(item: TypeKey) -> Self {
        TypeKey::Abstract(ContainerShape::Sequence, Box::new(item))
    }

    /// set of `item`
    pub fn set_of(item: TypeKey) -> Self {
        TypeKey::Abstract(ContainerShape::Set, Box::new(item))
    }

    /// mapping with `value` values
    pub fn mapping_of(value: TypeKey) -> Self {
        TypeKey::Abstract(ContainerShape::Mapping, Box::new(value))
    }
}

/// converter bound to one fully-instantiated concrete type
///
/// converters normalize a raw json value into the shape serde expects for the
/// concrete container: `null` becomes an empty container, elements are
/// normalized recursively, and anything that is not container-shaped is a
/// serialization error. concrete leaves use a shared passthrough converter.
#[derive(Debug)]
pub struct Converter {
    key: Option<TypeKey>,
    kind: ConverterKind,
}

#[derive(Debug)]
enum ConverterKind {
    Passthrough,
    Sequence { inner: Arc<Converter> },
}

impl Converter {
    fn passthrough() -> Self {
        Converter {
            key: None,
            kind: ConverterKind::Passthrough,
        }
    }

    fn sequence(key: TypeKey, inner: Arc<Converter>) -> Self {
        Converter {
            key: Some(key),
            kind: ConverterKind::Sequence { inner },
        }
    }

    /// the instantiated key this converter is bound to, if any
    pub fn key(&self) -> Option<&TypeKey> {
        self.key.as_ref()
    }

    /// normalize a raw json value for the bound container type
    pub fn apply(&self, value: Value) -> Result<Value> {
        match &self.kind {
            ConverterKind::Passthrough => Ok(value),
            ConverterKind::Sequence { inner } => match value {
                Value::Null => Ok(Value::Array(Vec::new())),
                Value::Array(items) => {
                    let items = items
                        .into_iter()
                        .map(|item| inner.apply(item))
                        .collect::<Result<Vec<_>>>()?;
                    Ok(Value::Array(items))
                }
                other => Err(Error::Serialization(serde::de::Error::custom(format!(
                    "expected an array for container field, got {other}"
                )))),
            },
        }
    }
}

/// process-wide registry from abstract shapes to concrete containers
pub struct ContainerRegistry {
    shapes: HashMap<ContainerShape, ConcreteContainer>,
    passthrough: Arc<Converter>,
    cache: RwLock<HashMap<TypeKey, Arc<Converter>>>,
}

static REGISTRY: Lazy<ContainerRegistry> = Lazy::new(ContainerRegistry::with_default_shapes);

impl ContainerRegistry {
    /// the shared registry, constructed once on first access
    pub fn global() -> &'static ContainerRegistry {
        &REGISTRY
    }

    /// registry with the anilist default mappings: sequences and sets both
    /// resolve to `Vec`; mappings are deliberately unregistered
    fn with_default_shapes() -> Self {
        let mut shapes = HashMap::new();
        shapes.insert(ContainerShape::Sequence, ConcreteContainer::Vec);
        shapes.insert(ContainerShape::Set, ConcreteContainer::Vec);
        ContainerRegistry {
            shapes,
            passthrough: Arc::new(Converter::passthrough()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// resolve a converter for a fully-instantiated type descriptor
    ///
    /// concrete keys delegate to the shared passthrough converter. abstract
    /// keys must have a registered shape; the converter is built with the
    /// key's own argument (resolved recursively) and cached per instantiated
    /// key for the process lifetime, so repeated resolution returns the
    /// identical instance.
    pub fn resolve(&self, key: &TypeKey) -> Result<Arc<Converter>> {
        let (shape, argument) = match key {
            TypeKey::Concrete(_) => return Ok(Arc::clone(&self.passthrough)),
            TypeKey::Abstract(shape, argument) => (*shape, argument.as_ref()),
        };

        let concrete = self
            .shapes
            .get(&shape)
            .copied()
            .ok_or(Error::UnsupportedType(shape.name()))?;

        if let Some(converter) = self.cache.read().expect("registry cache poisoned").get(key) {
            return Ok(Arc::clone(converter));
        }

        let inner = self.resolve(argument)?;
        let converter = match concrete {
            ConcreteContainer::Vec => Arc::new(Converter::sequence(key.clone(), inner)),
        };

        // insertion is idempotent: a racing resolver keeps the first entry
        let mut cache = self.cache.write().expect("registry cache poisoned");
        Ok(Arc::clone(
            cache.entry(key.clone()).or_insert(converter),
        ))
    }
}
