//! Per-role store lookup.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use eduhub_core::error::AppError;
use eduhub_core::result::AppResult;
use eduhub_entity::Role;

use crate::memory::MemoryPrincipalStore;
use crate::repositories::PgPrincipalRepository;
use crate::store::PrincipalStore;

/// One [`PrincipalStore`] per stored role.
#[derive(Clone, Default)]
pub struct PrincipalStores {
    stores: HashMap<Role, Arc<dyn PrincipalStore>>,
}

impl std::fmt::Debug for PrincipalStores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrincipalStores")
            .field("roles", &self.stores.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PrincipalStores {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Postgres repositories for every stored role.
    pub fn postgres(pool: &PgPool) -> AppResult<Self> {
        let mut stores = Self::new();
        for role in Role::STORED {
            stores.insert(Arc::new(PgPrincipalRepository::new(pool.clone(), role)?));
        }
        Ok(stores)
    }

    /// Empty in-memory stores for every stored role.
    pub fn in_memory() -> AppResult<Self> {
        let mut stores = Self::new();
        for role in Role::STORED {
            stores.insert(Arc::new(MemoryPrincipalStore::new(role)?));
        }
        Ok(stores)
    }

    /// Register a store under the role it reports.
    pub fn insert(&mut self, store: Arc<dyn PrincipalStore>) {
        self.stores.insert(store.role(), store);
    }

    /// The store for `role`, or `None` for SuperAdmin and unregistered roles.
    pub fn for_role(&self, role: Role) -> Option<Arc<dyn PrincipalStore>> {
        self.stores.get(&role).cloned()
    }

    /// The store for `role`, failing when there is none.
    pub fn require(&self, role: Role) -> AppResult<Arc<dyn PrincipalStore>> {
        self.for_role(role)
            .ok_or_else(|| AppError::internal(format!("No principal store registered for {role}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_covers_stored_roles_only() {
        let stores = PrincipalStores::in_memory().unwrap();
        for role in Role::STORED {
            assert_eq!(stores.for_role(role).unwrap().role(), role);
        }
        assert!(stores.for_role(Role::SuperAdmin).is_none());
        assert!(stores.require(Role::SuperAdmin).is_err());
    }
}
