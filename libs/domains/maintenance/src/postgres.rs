use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement, Value};
use std::str::FromStr;

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::models::{
    CreateMaintenance, Maintenance, MaintenanceFilter, MaintenancePriority, MaintenanceStatus,
    MaintenanceType, UpdateMaintenance,
};
use crate::repository::MaintenanceRepository;

/// PostgreSQL implementation of MaintenanceRepository
#[derive(Clone)]
pub struct PgMaintenanceRepository {
    db: DatabaseConnection,
}

impl PgMaintenanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct MaintenanceRow {
    id: i32,
    equipo_id: i32,
    tipo: String,
    fecha_programada: NaiveDate,
    fecha_realizada: Option<NaiveDate>,
    descripcion: String,
    prioridad: String,
    estado: String,
    costo: Option<f64>,
    observaciones: Option<String>,
    fecha_registro: DateTime<Utc>,
    equipo_nombre: String,
    codigo_inventario: String,
}

impl TryFrom<MaintenanceRow> for Maintenance {
    type Error = MaintenanceError;

    fn try_from(row: MaintenanceRow) -> Result<Self, Self::Error> {
        let corrupt = |column: &str, value: &str| {
            MaintenanceError::Internal(format!(
                "Unexpected {} '{}' in maintenance {}",
                column, value, row.id
            ))
        };

        Ok(Maintenance {
            tipo: MaintenanceType::from_str(&row.tipo).map_err(|_| corrupt("tipo", &row.tipo))?,
            prioridad: MaintenancePriority::from_str(&row.prioridad)
                .map_err(|_| corrupt("prioridad", &row.prioridad))?,
            estado: MaintenanceStatus::from_str(&row.estado)
                .map_err(|_| corrupt("estado", &row.estado))?,
            id: row.id,
            equipo_id: row.equipo_id,
            fecha_programada: row.fecha_programada,
            fecha_realizada: row.fecha_realizada,
            descripcion: row.descripcion,
            costo: row.costo,
            observaciones: row.observaciones,
            fecha_registro: row.fecha_registro,
            equipo_nombre: row.equipo_nombre,
            codigo_inventario: row.codigo_inventario,
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: i32,
}

pub(crate) fn build_list_query(filter: &MaintenanceFilter) -> (String, Vec<Value>) {
    let mut sql = String::from(
        r#"
        SELECT m.id, m.equipo_id, m.tipo, m.fecha_programada, m.fecha_realizada,
               m.descripcion, m.prioridad, m.estado, m.costo, m.observaciones,
               m.fecha_registro, e.nombre AS equipo_nombre, e.codigo_inventario
        FROM mantenimientos m
        JOIN equipos e ON m.equipo_id = e.id
        "#,
    );
    let mut conditions = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(estado) = filter.estado {
        values.push(estado.to_string().into());
        conditions.push(format!("m.estado = ${}", values.len()));
    }
    if let Some(equipo_id) = filter.equipo_id {
        values.push(equipo_id.into());
        conditions.push(format!("m.equipo_id = ${}", values.len()));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY m.fecha_programada ASC, m.id ASC");

    (sql, values)
}

pub(crate) fn build_update(id: i32, input: &UpdateMaintenance) -> Option<(String, Vec<Value>)> {
    let mut sets = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    let mut push = |column: &str, value: Value| {
        values.push(value);
        sets.push(format!("{} = ${}", column, values.len()));
    };

    if let Some(fecha) = input.fecha_realizada {
        push("fecha_realizada", fecha.into());
    }
    if let Some(costo) = input.costo {
        push("costo", costo.into());
    }
    if let Some(estado) = input.estado {
        push("estado", estado.to_string().into());
    }
    if let Some(observaciones) = &input.observaciones {
        push("observaciones", observaciones.clone().into());
    }

    if sets.is_empty() {
        return None;
    }

    values.push(id.into());
    let sql = format!(
        "UPDATE mantenimientos SET {} WHERE id = ${}",
        sets.join(", "),
        values.len()
    );
    Some((sql, values))
}

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn list(&self, filter: MaintenanceFilter) -> MaintenanceResult<Vec<Maintenance>> {
        let (sql, values) = build_list_query(&filter);
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);

        let rows = MaintenanceRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| MaintenanceError::Internal(format!("Database error: {}", e)))?;

        rows.into_iter().map(Maintenance::try_from).collect()
    }

    async fn create(&self, input: CreateMaintenance) -> MaintenanceResult<i32> {
        let sql = r#"
            INSERT INTO mantenimientos (equipo_id, tipo, fecha_programada, descripcion, prioridad, estado)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                input.equipo_id.into(),
                input.tipo.to_string().into(),
                input.fecha_programada.into(),
                input.descripcion.into(),
                input.prioridad.to_string().into(),
                MaintenanceStatus::Programado.to_string().into(),
            ],
        );

        let row = IdRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| {
                if e.to_string().contains("foreign key") {
                    MaintenanceError::UnknownEquipment(input.equipo_id)
                } else {
                    MaintenanceError::Internal(format!("Database error: {}", e))
                }
            })?
            .ok_or_else(|| MaintenanceError::Internal("Insert returned no id".to_string()))?;

        tracing::info!(maintenance_id = row.id, equipo_id = input.equipo_id, "Scheduled maintenance");
        Ok(row.id)
    }

    async fn update(&self, id: i32, input: UpdateMaintenance) -> MaintenanceResult<bool> {
        let Some((sql, values)) = build_update(id, &input) else {
            return Err(MaintenanceError::NothingToUpdate);
        };
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| MaintenanceError::Internal(format!("Database error: {}", e)))?;

        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(maintenance_id = id, "Updated maintenance");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, MockDatabase, MockExecResult, RuntimeErr};

    #[test]
    fn test_list_query_filters() {
        let filter = MaintenanceFilter {
            estado: Some(MaintenanceStatus::Programado),
            equipo_id: Some(3),
        };
        let (sql, values) = build_list_query(&filter);

        assert!(sql.contains("WHERE m.estado = $1 AND m.equipo_id = $2"));
        assert!(sql.ends_with("ORDER BY m.fecha_programada ASC, m.id ASC"));
        assert_eq!(values, vec![Value::from("programado".to_string()), Value::from(3)]);
    }

    #[test]
    fn test_update_keeps_zero_cost() {
        let input = UpdateMaintenance {
            costo: Some(0.0),
            estado: Some(MaintenanceStatus::Completado),
            ..Default::default()
        };
        let (sql, values) = build_update(11, &input).unwrap();

        assert_eq!(sql, "UPDATE mantenimientos SET costo = $1, estado = $2 WHERE id = $3");
        assert_eq!(values[0], Value::from(0.0_f64));
    }

    #[tokio::test]
    async fn test_update_of_missing_row_returns_false() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PgMaintenanceRepository::new(db);
        let updated = repo
            .update(
                404,
                UpdateMaintenance {
                    observaciones: Some("Sin cambios".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_foreign_key_violation_is_unknown_equipment() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "insert or update on table \"mantenimientos\" violates foreign key constraint".into(),
            ))])
            .into_connection();

        let input: CreateMaintenance = serde_json::from_value(serde_json::json!({
            "equipo_id": 999,
            "tipo": "correctivo",
            "fecha_programada": "2025-05-01",
            "descripcion": "Reemplazo de pantalla"
        }))
        .unwrap();

        let err = PgMaintenanceRepository::new(db).create(input).await.unwrap_err();
        assert!(matches!(err, MaintenanceError::UnknownEquipment(999)));
    }
}
