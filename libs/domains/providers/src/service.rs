use std::sync::Arc;
use validator::Validate;

use crate::error::{ProviderError, ProviderResult};
use crate::models::{CreateProvider, Provider};
use crate::repository::ProviderRepository;

/// Service layer for provider business logic
#[derive(Clone)]
pub struct ProviderService<R: ProviderRepository> {
    repository: Arc<R>,
}

impl<R: ProviderRepository> ProviderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_providers(&self) -> ProviderResult<Vec<Provider>> {
        self.repository.list().await
    }

    /// Register a provider, returning its id
    pub async fn create_provider(&self, input: CreateProvider) -> ProviderResult<i32> {
        let input = input.normalized();
        input
            .validate()
            .map_err(|e| ProviderError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProviderRepository;

    fn input(ruc: &str) -> CreateProvider {
        CreateProvider {
            razon_social: "Compu Perú EIRL".into(),
            ruc: ruc.into(),
            email: Some("ventas@compuperu.pe".into()),
            contacto_nombre: None,
            telefono: None,
            sitio_web: None,
        }
    }

    #[tokio::test]
    async fn test_create_trims_ruc_before_insert() {
        let mut mock_repo = MockProviderRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| input.ruc == "20601234567")
            .returning(|_| Ok(3));

        let service = ProviderService::new(mock_repo);
        assert_eq!(service.create_provider(input(" 20601234567 ")).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_blank_ruc_never_reaches_repository() {
        let mut mock_repo = MockProviderRepository::new();
        mock_repo.expect_create().never();

        let service = ProviderService::new(mock_repo);
        let err = service.create_provider(input("  ")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_ruc_propagates() {
        let mut mock_repo = MockProviderRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| Err(ProviderError::DuplicateRuc(input.ruc)));

        let service = ProviderService::new(mock_repo);
        let err = service.create_provider(input("20601234567")).await.unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateRuc(_)));
    }
}
