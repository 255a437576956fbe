//! Member-to-column metadata.
//!
//! The builder never inspects entity declarations on its own. It asks a
//! [`ColumnResolver`] for the column name behind a [`MemberRef`], through a
//! [`MetadataProvider`] that memoizes every successful answer.
//!
//! ```text
//! Member<E, T> ──erase──▶ MemberRef ──▶ MetadataProvider ──miss──▶ ColumnResolver
//!                                             │
//!                                             └── DashMap<(TypeId, member), column>
//! ```
//!
//! A process-wide provider backed by [`EntityColumnResolver`] is created
//! lazily on first use and lives for the rest of the process.

use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::error::{SelectError, SelectResult};
use crate::model::MemberRef;

/// Resolves a member reference to its column name.
pub trait ColumnResolver: Send + Sync {
    fn resolve_column_name(&self, member: &MemberRef) -> SelectResult<String>;
}

/// Resolver reading the member table declared by the entity itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityColumnResolver;

impl ColumnResolver for EntityColumnResolver {
    fn resolve_column_name(&self, member: &MemberRef) -> SelectResult<String> {
        member
            .entity
            .member(member.member)
            .map(|info| info.column.to_string())
            .ok_or_else(|| SelectError::FieldResolution {
                entity: member.entity.name().to_string(),
                member: member.member.to_string(),
                reason: "member is not declared on the entity".into(),
            })
    }
}

static GLOBAL: Lazy<MetadataProvider> = Lazy::new(MetadataProvider::default);

/// Memoizing front for a [`ColumnResolver`].
///
/// Safe for concurrent lookups and inserts. Failed resolutions are not
/// cached.
pub struct MetadataProvider {
    resolver: Arc<dyn ColumnResolver>,
    columns: DashMap<(TypeId, &'static str), Arc<str>>,
}

impl MetadataProvider {
    pub fn new(resolver: Arc<dyn ColumnResolver>) -> Self {
        Self {
            resolver,
            columns: DashMap::new(),
        }
    }

    /// The process-wide provider.
    pub fn global() -> &'static MetadataProvider {
        &GLOBAL
    }

    /// Column name for a member, resolving it at most once per provider.
    pub fn resolve_column_name(&self, member: &MemberRef) -> SelectResult<Arc<str>> {
        let key = (member.entity.type_id(), member.member);
        if let Some(column) = self.columns.get(&key) {
            return Ok(Arc::clone(column.value()));
        }

        tracing::trace!(member = %member, "resolving column name");
        let column: Arc<str> = Arc::from(self.resolver.resolve_column_name(member)?);
        if column.is_empty() {
            return Err(SelectError::FieldResolution {
                entity: member.entity.name().to_string(),
                member: member.member.to_string(),
                reason: "resolver returned an empty column name".into(),
            });
        }

        let cached = self.columns.entry(key).or_insert(column);
        Ok(Arc::clone(cached.value()))
    }

    /// Number of memoized members.
    pub fn cached_len(&self) -> usize {
        self.columns.len()
    }
}

impl Default for MetadataProvider {
    fn default() -> Self {
        Self::new(Arc::new(EntityColumnResolver))
    }
}

impl std::fmt::Debug for MetadataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataProvider")
            .field("cached", &self.columns.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    crate::entity! {
        struct Person as "Person" {
            id: i64 => "Id",
            last_name: String => "LastName",
        }
    }

    #[derive(Default)]
    struct CountingResolver {
        calls: AtomicUsize,
    }

    impl ColumnResolver for CountingResolver {
        fn resolve_column_name(&self, member: &MemberRef) -> SelectResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            EntityColumnResolver.resolve_column_name(member)
        }
    }

    #[test]
    fn test_entity_resolver() {
        let column = EntityColumnResolver
            .resolve_column_name(&Person::last_name().erase())
            .unwrap();
        assert_eq!(column, "LastName");
    }

    #[test]
    fn test_resolution_is_memoized() {
        let resolver = Arc::new(CountingResolver::default());
        let provider = MetadataProvider::new(resolver.clone());

        let member = Person::id().erase();
        assert_eq!(&*provider.resolve_column_name(&member).unwrap(), "Id");
        assert_eq!(&*provider.resolve_column_name(&member).unwrap(), "Id");

        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.cached_len(), 1);
    }

    #[test]
    fn test_unknown_member_fails() {
        let provider = MetadataProvider::default();
        let member = MemberRef::new(
            crate::model::EntityType::of::<Person>(),
            "nickname",
            crate::model::ValueType::Text,
        );
        let err = provider.resolve_column_name(&member).unwrap_err();
        assert!(matches!(err, SelectError::FieldResolution { .. }));
        assert_eq!(provider.cached_len(), 0);
    }

    #[test]
    fn test_concurrent_resolution() {
        let provider = Arc::new(MetadataProvider::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || {
                    provider
                        .resolve_column_name(&Person::last_name().erase())
                        .map(|c| c.to_string())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), "LastName");
        }
        assert_eq!(provider.cached_len(), 1);
    }
}
