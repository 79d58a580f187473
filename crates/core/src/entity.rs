//! Entity trait: identity + continuity across state changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;
}

/// A persisted entity: repository-assigned identity and timestamps wrapped
/// around the data supplied at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<D> {
    pub id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: D,
}

impl<D> Record<D> {
    /// Wrap `data` as a freshly created record (`created_at == updated_at`).
    pub fn new(id: EntityId, data: D, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            data,
        }
    }

    /// Apply a patch and bump `updated_at`. Identity and `created_at` never change.
    pub fn apply<P: Patch<D>>(&mut self, patch: P, now: DateTime<Utc>) {
        patch.apply_to(&mut self.data);
        self.updated_at = now;
    }
}

impl<D> Entity for Record<D> {
    type Id = EntityId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// A partial update of `D`.
///
/// Implementations overwrite only the fields they carry, leaving everything
/// else untouched (shallow merge).
pub trait Patch<D> {
    fn apply_to(self, target: &mut D);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Customer {
        name: String,
        email: String,
    }

    #[derive(Default)]
    struct CustomerPatch {
        name: Option<String>,
        email: Option<String>,
    }

    impl Patch<Customer> for CustomerPatch {
        fn apply_to(self, target: &mut Customer) {
            if let Some(name) = self.name {
                target.name = name;
            }
            if let Some(email) = self.email {
                target.email = email;
            }
        }
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let created = Utc::now();
        let mut record = Record::new(
            EntityId::from("1"),
            Customer {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            created,
        );

        let later = created + Duration::seconds(5);
        record.apply(
            CustomerPatch {
                name: Some("Ada L.".to_string()),
                ..Default::default()
            },
            later,
        );

        assert_eq!(record.data.name, "Ada L.");
        assert_eq!(record.data.email, "ada@example.com");
        assert_eq!(record.created_at(), created);
        assert_eq!(record.updated_at(), later);
        assert_eq!(record.id(), &EntityId::from("1"));
    }
}
