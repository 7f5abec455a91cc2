use crate::modules::collection::crud::CollectionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    AlreadyExists,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionCheck {
    pub outcome: EnsureOutcome,
    pub access_denied: Option<String>,
}

impl CollectionCheck {
    pub fn is_accessible(&self) -> bool {
        self.access_denied.is_none()
    }
}

/// Creates `name` when it is not listed, then confirms it can be read.
pub async fn ensure_collection<S: CollectionStore>(
    store: &S,
    name: &str,
) -> Result<CollectionCheck, S::Error> {
    let names = store.list_collection_names().await?;

    let outcome = if names.iter().any(|n| n == name) {
        tracing::info!(collection = %name, "collection already exists");
        EnsureOutcome::AlreadyExists
    } else {
        if let Err(e) = store.create_collection(name).await {
            tracing::error!(collection = %name, error = %e, "failed to create collection");
            return Err(e);
        }
        tracing::info!(collection = %name, "collection created");
        EnsureOutcome::Created
    };

    let access_denied = match store.check_access(name).await {
        Ok(()) => {
            tracing::info!(collection = %name, "access confirmed");
            None
        }
        Err(e) => {
            tracing::warn!(collection = %name, error = %e, "insufficient privileges");
            Some(e.to_string())
        }
    };

    Ok(CollectionCheck {
        outcome,
        access_denied,
    })
}
