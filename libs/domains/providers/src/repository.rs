use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProviderError, ProviderResult};
use crate::models::{CreateProvider, Provider};

/// Repository trait for providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// All providers ordered by business name
    async fn list(&self) -> ProviderResult<Vec<Provider>>;

    /// Insert a provider and return its new id
    async fn create(&self, input: CreateProvider) -> ProviderResult<i32>;
}

/// In-memory implementation of ProviderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProviderRepository {
    providers: Arc<RwLock<Vec<Provider>>>,
}

impl InMemoryProviderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProviderRepository for InMemoryProviderRepository {
    async fn list(&self) -> ProviderResult<Vec<Provider>> {
        let providers = self.providers.read().await;
        let mut result = providers.clone();
        result.sort_by(|a, b| a.razon_social.cmp(&b.razon_social));
        Ok(result)
    }

    async fn create(&self, input: CreateProvider) -> ProviderResult<i32> {
        let mut providers = self.providers.write().await;

        if providers.iter().any(|p| p.ruc == input.ruc) {
            return Err(ProviderError::DuplicateRuc(input.ruc));
        }

        let id = providers.len() as i32 + 1;
        providers.push(Provider {
            id,
            razon_social: input.razon_social,
            ruc: input.ruc,
            email: input.email,
            contacto_nombre: input.contacto_nombre,
            telefono: input.telefono,
            sitio_web: input.sitio_web,
            fecha_registro: Utc::now(),
        });

        tracing::info!(provider_id = id, "Created provider");
        Ok(id)
    }
}
