//! Entities and typed members.
//!
//! An [`Entity`] is a Rust type standing for one table. Its members are
//! declared statically so that member references can be checked by the
//! compiler and resolved to column names without runtime reflection.
//!
//! The [`entity!`](crate::entity) macro is the usual way to declare one:
//!
//! ```ignore
//! sqlselect::entity! {
//!     pub struct Person as "Person" {
//!         id: i64 => "Id",
//!         last_name: String => "LastName",
//!     }
//! }
//!
//! let member = Person::last_name(); // Member<Person, String>
//! ```

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use super::types::{SqlType, ValueType};

/// Static description of one entity member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberInfo {
    /// Member name as used in Rust code and member references.
    pub name: &'static str,
    /// Column name the member maps to.
    pub column: &'static str,
    pub value_type: ValueType,
}

/// A Rust type that stands for a table.
pub trait Entity: 'static {
    /// Entity name; default aliases derive from it.
    fn entity_name() -> &'static str;

    /// Table name used in FROM and JOIN clauses.
    fn table_name() -> &'static str {
        Self::entity_name()
    }

    /// Declared members.
    fn members() -> &'static [MemberInfo];
}

/// Runtime identity of an entity type.
///
/// Two values are equal iff they describe the same Rust type.
#[derive(Clone, Copy)]
pub struct EntityType {
    id: TypeId,
    name: &'static str,
    table: &'static str,
    members: fn() -> &'static [MemberInfo],
}

impl EntityType {
    pub fn of<E: Entity>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: E::entity_name(),
            table: E::table_name(),
            members: E::members,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn table_name(&self) -> &'static str {
        self.table
    }

    pub fn members(&self) -> &'static [MemberInfo] {
        (self.members)()
    }

    /// Look up a declared member by name.
    pub fn member(&self, name: &str) -> Option<&'static MemberInfo> {
        self.members().iter().find(|m| m.name == name)
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityType {}

impl std::hash::Hash for EntityType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityType").field(&self.name).finish()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// An untyped member reference: (declaring entity, member name).
///
/// This is what the metadata resolver consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberRef {
    pub entity: EntityType,
    pub member: &'static str,
    pub value_type: ValueType,
}

impl MemberRef {
    pub fn new(entity: EntityType, member: &'static str, value_type: ValueType) -> Self {
        Self {
            entity,
            member,
            value_type,
        }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity.name(), self.member)
    }
}

/// A typed member of entity `E` holding values of type `T`.
pub struct Member<E, T> {
    name: &'static str,
    _marker: PhantomData<fn() -> (E, T)>,
}

impl<E: Entity, T: SqlType> Member<E, T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Erase the static types, keeping entity identity and value type.
    pub fn erase(&self) -> MemberRef {
        MemberRef::new(EntityType::of::<E>(), self.name, T::VALUE_TYPE)
    }
}

impl<E, T> Clone for Member<E, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, T> Copy for Member<E, T> {}

impl<E, T> fmt::Debug for Member<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Member").field(&self.name).finish()
    }
}

impl<E: Entity, T: SqlType> From<Member<E, T>> for MemberRef {
    fn from(member: Member<E, T>) -> Self {
        member.erase()
    }
}

/// Declare an entity type with typed members.
///
/// Generates a unit struct, its [`Entity`] impl and one associated
/// function per member returning a [`Member`].
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident as $entity:literal $(in $table:literal)? {
            $($member:ident : $ty:ty => $column:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::model::Entity for $name {
            fn entity_name() -> &'static str {
                $entity
            }

            $(
                fn table_name() -> &'static str {
                    $table
                }
            )?

            fn members() -> &'static [$crate::model::MemberInfo] {
                const MEMBERS: &[$crate::model::MemberInfo] = &[
                    $(
                        $crate::model::MemberInfo {
                            name: stringify!($member),
                            column: $column,
                            value_type: <$ty as $crate::model::SqlType>::VALUE_TYPE,
                        },
                    )*
                ];
                MEMBERS
            }
        }

        #[allow(dead_code)]
        impl $name {
            $(
                pub fn $member() -> $crate::model::Member<$name, $ty> {
                    $crate::model::Member::new(stringify!($member))
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::entity! {
        struct Person as "Person" {
            id: i64 => "Id",
            last_name: String => "LastName",
        }
    }

    crate::entity! {
        struct Order as "Order" in "sales.Orders" {
            total: f64 => "Total",
        }
    }

    #[test]
    fn test_entity_metadata() {
        let person = EntityType::of::<Person>();
        assert_eq!(person.name(), "Person");
        assert_eq!(person.table_name(), "Person");
        assert_eq!(person.members().len(), 2);
        assert_eq!(person.member("last_name").unwrap().column, "LastName");
        assert!(person.member("missing").is_none());
    }

    #[test]
    fn test_table_override() {
        assert_eq!(EntityType::of::<Order>().table_name(), "sales.Orders");
    }

    #[test]
    fn test_entity_type_equality_is_by_type() {
        assert_eq!(EntityType::of::<Person>(), EntityType::of::<Person>());
        assert_ne!(EntityType::of::<Person>(), EntityType::of::<Order>());
    }

    #[test]
    fn test_member_erase() {
        let member = Person::id().erase();
        assert_eq!(member.entity, EntityType::of::<Person>());
        assert_eq!(member.member, "id");
        assert_eq!(member.value_type, ValueType::Int);
        assert_eq!(member.to_string(), "Person.id");
    }
}
