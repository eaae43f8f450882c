//! Entity trait: records that are addressed by identity rather than by value.

/// A record with a stable identifier.
///
/// Lists of entities (the catalog page, pending deletions) are filtered and
/// looked up through this trait, never by comparing whole records.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}

/// Copy of `items` with every entity carrying `id` left out.
pub fn without<E>(items: &[E], id: &E::Id) -> Vec<E>
where
    E: Entity + Clone,
{
    items.iter().filter(|item| !item.has_id(id)).cloned().collect()
}
