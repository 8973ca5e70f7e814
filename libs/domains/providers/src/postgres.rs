use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};

use crate::error::{ProviderError, ProviderResult};
use crate::models::{CreateProvider, Provider};
use crate::repository::ProviderRepository;

/// PostgreSQL implementation of ProviderRepository
#[derive(Clone)]
pub struct PgProviderRepository {
    db: DatabaseConnection,
}

impl PgProviderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct ProviderRow {
    id: i32,
    razon_social: String,
    ruc: String,
    email: Option<String>,
    contacto_nombre: Option<String>,
    telefono: Option<String>,
    sitio_web: Option<String>,
    fecha_registro: DateTime<Utc>,
}

impl From<ProviderRow> for Provider {
    fn from(row: ProviderRow) -> Self {
        Provider {
            id: row.id,
            razon_social: row.razon_social,
            ruc: row.ruc,
            email: row.email,
            contacto_nombre: row.contacto_nombre,
            telefono: row.telefono,
            sitio_web: row.sitio_web,
            fecha_registro: row.fecha_registro,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: i32,
}

#[async_trait]
impl ProviderRepository for PgProviderRepository {
    async fn list(&self) -> ProviderResult<Vec<Provider>> {
        let sql = r#"
            SELECT id, razon_social, ruc, email, contacto_nombre, telefono, sitio_web,
                   fecha_registro
            FROM proveedores
            ORDER BY razon_social
        "#;
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = ProviderRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| ProviderError::Internal(format!("Database error: {}", e)))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, input: CreateProvider) -> ProviderResult<i32> {
        let sql = r#"
            INSERT INTO proveedores (razon_social, ruc, email, contacto_nombre, telefono, sitio_web)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                input.razon_social.into(),
                input.ruc.clone().into(),
                input.email.into(),
                input.contacto_nombre.into(),
                input.telefono.into(),
                input.sitio_web.into(),
            ],
        );

        let row = IdRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
                    ProviderError::DuplicateRuc(input.ruc.clone())
                } else {
                    ProviderError::Internal(format!("Database error: {}", e))
                }
            })?
            .ok_or_else(|| ProviderError::Internal("Insert returned no id".to_string()))?;

        tracing::info!(provider_id = row.id, "Created provider");
        Ok(row.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, IntoMockRow, MockDatabase, RuntimeErr};
    use std::collections::BTreeMap;

    fn create_input() -> CreateProvider {
        CreateProvider {
            razon_social: "Tech Import SAC".into(),
            ruc: "20512345678".into(),
            email: None,
            contacto_nombre: None,
            telefono: None,
            sitio_web: None,
        }
    }

    #[tokio::test]
    async fn test_create_returns_inserted_id() {
        let row = BTreeMap::from([("id", sea_orm::Value::from(12))]).into_mock_row();
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let repo = PgProviderRepository::new(db);
        assert_eq!(repo.create(create_input()).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_duplicate_ruc() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"proveedores_ruc_key\"".into(),
            ))])
            .into_connection();

        let repo = PgProviderRepository::new(db);
        let err = repo.create(create_input()).await.unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateRuc(ruc) if ruc == "20512345678"));
    }
}
