//! Aliases and the per-statement alias registry.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::entity::{Entity, EntityType};
use crate::error::{SelectError, SelectResult};

/// Number of leading characters of the entity name used for default aliases.
const DEFAULT_ALIAS_LEN: usize = 2;

/// Default alias value for an entity name: its first two characters,
/// lower-cased (`Person` -> `pe`).
pub fn default_alias_value(entity_name: &str) -> String {
    entity_name
        .chars()
        .take(DEFAULT_ALIAS_LEN)
        .flat_map(char::to_lowercase)
        .collect()
}

/// A named occurrence of an entity within one statement.
///
/// Bound to exactly one entity type for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alias {
    entity: EntityType,
    value: Arc<str>,
}

impl Alias {
    pub fn new(entity: EntityType, value: &str) -> Self {
        Self {
            entity,
            value: Arc::from(value),
        }
    }

    /// The default alias for an entity type.
    pub fn default_for(entity: EntityType) -> Self {
        Self::new(entity, &default_alias_value(entity.name()))
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// True when the value is empty or whitespace, which cannot be rendered.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub(crate) fn blank_error(&self, context: &str) -> SelectError {
        SelectError::InvalidState {
            alias: self.value.to_string(),
            entity: self.entity.name().to_string(),
            context: format!("{}: alias value is empty", context),
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// An alias statically bound to entity `E`.
pub struct EntityAlias<E> {
    alias: Alias,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityAlias<E> {
    pub fn new(value: &str) -> Self {
        Self {
            alias: Alias::new(EntityType::of::<E>(), value),
            _marker: PhantomData,
        }
    }

    pub fn value(&self) -> &str {
        self.alias.value()
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }
}

impl<E: Entity> Default for EntityAlias<E> {
    fn default() -> Self {
        Self {
            alias: Alias::default_for(EntityType::of::<E>()),
            _marker: PhantomData,
        }
    }
}

impl<E> Clone for EntityAlias<E> {
    fn clone(&self) -> Self {
        Self {
            alias: self.alias.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E> fmt::Debug for EntityAlias<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityAlias").field(&self.alias).finish()
    }
}

impl<E> From<EntityAlias<E>> for Alias {
    fn from(alias: EntityAlias<E>) -> Self {
        alias.alias
    }
}

/// Default alias for `E`.
pub fn alias_for<E: Entity>() -> EntityAlias<E> {
    EntityAlias::default()
}

/// The set of aliases registered in one statement, in registration order.
///
/// Persistent: [`register`](Self::register) returns a new registry and
/// leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AliasRegistry {
    aliases: Arc<Vec<Alias>>,
}

impl AliasRegistry {
    /// A registry holding only the root alias.
    pub fn with_root(root: Alias) -> Self {
        Self {
            aliases: Arc::new(vec![root]),
        }
    }

    /// Register an alias.
    ///
    /// Uniqueness is checked on the alias value only, so reusing a value for
    /// a different entity type is rejected as well.
    pub fn register(&self, alias: &Alias) -> SelectResult<Self> {
        if alias.is_blank() {
            return Err(alias.blank_error("join"));
        }
        if self.contains_value(alias.value()) {
            return Err(SelectError::DuplicateAlias {
                alias: alias.value().to_string(),
            });
        }
        let mut aliases = Arc::clone(&self.aliases);
        Arc::make_mut(&mut aliases).push(alias.clone());
        Ok(Self { aliases })
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.aliases.iter().any(|a| a.value() == value)
    }

    /// True when `alias` is registered with the same value and entity type.
    pub fn contains(&self, alias: &Alias) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.iter()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
