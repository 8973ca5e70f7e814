use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};

use crate::error::{ReportError, ReportResult};
use crate::models::{
    CategoryCount, DashboardCounts, EquipmentSummary, LocationCount, MaintenanceSummary,
    MonthlyCost, StatusCount, month_name,
};
use crate::repository::ReportRepository;

/// PostgreSQL implementation of ReportRepository
#[derive(Clone)]
pub struct PgReportRepository {
    db: DatabaseConnection,
}

impl PgReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> ReportError {
    ReportError::Internal(format!("Database error: {}", e))
}

#[derive(Debug, FromQueryResult)]
struct DashboardRow {
    total_equipos: i64,
    equipos_operativos: i64,
    valor_inventario: f64,
    mantenimientos_mes: i64,
    costo_mantenimiento_mes: f64,
}

#[derive(Debug, FromQueryResult)]
struct LocationRow {
    ubicacion: String,
    cantidad: i64,
}

#[derive(Debug, FromQueryResult)]
struct StatusRow {
    estado: String,
    cantidad: i64,
}

#[derive(Debug, FromQueryResult)]
struct CategoryRow {
    categoria: String,
    cantidad: i64,
    valor_total: f64,
}

#[derive(Debug, FromQueryResult)]
struct MonthlyCostRow {
    mes_num: i32,
    tipo: String,
    total_costo: f64,
}

#[derive(Debug, FromQueryResult)]
struct EquipmentExportRow {
    codigo_inventario: String,
    nombre: String,
    categoria: Option<String>,
    estado: String,
    ubicacion: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct MaintenanceExportRow {
    fecha_programada: NaiveDate,
    codigo_inventario: String,
    tipo: String,
    estado: String,
    costo: Option<f64>,
}

/// Cost of completed orders per month and type, as counted by the dashboard
const MAINTENANCE_COSTS_SQL: &str = r#"
    SELECT EXTRACT(MONTH FROM fecha_realizada)::int4 AS mes_num, tipo,
           COALESCE(SUM(costo), 0)::float8 AS total_costo
    FROM mantenimientos
    WHERE estado = 'completado'
      AND fecha_realizada IS NOT NULL
      AND EXTRACT(YEAR FROM fecha_realizada)::int4 = $1
    GROUP BY mes_num, tipo
    ORDER BY mes_num, tipo
"#;

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn dashboard_counts(
        &self,
        month_start: NaiveDate,
        next_month_start: NaiveDate,
    ) -> ReportResult<DashboardCounts> {
        let sql = r#"
            SELECT
                (SELECT COUNT(*) FROM equipos) AS total_equipos,
                (SELECT COUNT(*) FROM equipos WHERE estado_operativo = 'operativo') AS equipos_operativos,
                (SELECT COALESCE(SUM(costo_compra), 0)::float8 FROM equipos) AS valor_inventario,
                (SELECT COUNT(*) FROM mantenimientos
                  WHERE fecha_programada >= $1 AND fecha_programada < $2) AS mantenimientos_mes,
                (SELECT COALESCE(SUM(costo), 0)::float8 FROM mantenimientos
                  WHERE estado = 'completado'
                    AND fecha_realizada >= $1 AND fecha_realizada < $2) AS costo_mantenimiento_mes
        "#;
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [month_start.into(), next_month_start.into()],
        );

        let row = DashboardRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ReportError::Internal("Dashboard query returned no row".to_string()))?;

        Ok(DashboardCounts {
            total_equipos: row.total_equipos,
            equipos_operativos: row.equipos_operativos,
            valor_inventario: row.valor_inventario,
            mantenimientos_mes: row.mantenimientos_mes,
            costo_mantenimiento_mes: row.costo_mantenimiento_mes,
        })
    }

    async fn equipment_by_location(&self) -> ReportResult<Vec<LocationCount>> {
        let sql = r#"
            SELECT u.edificio || ' - ' || u.aula_oficina AS ubicacion, COUNT(*) AS cantidad
            FROM equipos e
            JOIN ubicaciones u ON e.ubicacion_actual_id = u.id
            GROUP BY u.id, u.edificio, u.aula_oficina
            ORDER BY cantidad DESC, ubicacion
        "#;
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = LocationRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|r| LocationCount {
                ubicacion: r.ubicacion,
                cantidad: r.cantidad,
            })
            .collect())
    }

    async fn equipment_by_status(&self) -> ReportResult<Vec<StatusCount>> {
        let sql = r#"
            SELECT estado_operativo AS estado, COUNT(*) AS cantidad
            FROM equipos
            GROUP BY estado_operativo
            ORDER BY cantidad DESC, estado
        "#;
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = StatusRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|r| StatusCount {
                estado: r.estado,
                cantidad: r.cantidad,
            })
            .collect())
    }

    async fn equipment_by_category(&self) -> ReportResult<Vec<CategoryCount>> {
        let sql = r#"
            SELECT c.nombre AS categoria, COUNT(*) AS cantidad,
                   COALESCE(SUM(e.costo_compra), 0)::float8 AS valor_total
            FROM equipos e
            JOIN categorias_equipos c ON e.categoria_id = c.id
            GROUP BY c.nombre
            ORDER BY c.nombre
        "#;
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = CategoryRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|r| CategoryCount {
                categoria: r.categoria,
                cantidad: r.cantidad,
                valor_total: r.valor_total,
            })
            .collect())
    }

    async fn maintenance_costs(&self, year: i32) -> ReportResult<Vec<MonthlyCost>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            MAINTENANCE_COSTS_SQL,
            [year.into()],
        );

        let rows = MonthlyCostRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        rows.into_iter()
            .map(|r| {
                let mes = u32::try_from(r.mes_num)
                    .ok()
                    .and_then(month_name)
                    .ok_or_else(|| ReportError::Internal(format!("Invalid month {}", r.mes_num)))?;
                Ok(MonthlyCost {
                    mes: mes.to_string(),
                    tipo: r.tipo,
                    total_costo: r.total_costo,
                })
            })
            .collect()
    }

    async fn equipment_for_export(&self) -> ReportResult<Vec<EquipmentSummary>> {
        let sql = r#"
            SELECT e.codigo_inventario, e.nombre, c.nombre AS categoria,
                   e.estado_operativo AS estado,
                   u.edificio || ' - ' || u.aula_oficina AS ubicacion
            FROM equipos e
            LEFT JOIN categorias_equipos c ON e.categoria_id = c.id
            LEFT JOIN ubicaciones u ON e.ubicacion_actual_id = u.id
            ORDER BY e.codigo_inventario
        "#;
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = EquipmentExportRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|r| EquipmentSummary {
                codigo_inventario: r.codigo_inventario,
                nombre: r.nombre,
                categoria: r.categoria,
                estado: r.estado,
                ubicacion: r.ubicacion,
            })
            .collect())
    }

    async fn maintenance_for_export(&self) -> ReportResult<Vec<MaintenanceSummary>> {
        let sql = r#"
            SELECT m.fecha_programada, e.codigo_inventario, m.tipo, m.estado, m.costo
            FROM mantenimientos m
            JOIN equipos e ON m.equipo_id = e.id
            ORDER BY m.fecha_programada, m.id
        "#;
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = MaintenanceExportRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|r| MaintenanceSummary {
                fecha_programada: r.fecha_programada,
                codigo_inventario: r.codigo_inventario,
                tipo: r.tipo,
                estado: r.estado,
                costo: r.costo,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{MockDatabase, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_maintenance_costs_use_english_month_names() {
        let rows = vec![
            BTreeMap::from([
                ("mes_num", Value::from(2)),
                ("tipo", Value::from("preventivo")),
                ("total_costo", Value::from(120.0_f64)),
            ]),
            BTreeMap::from([
                ("mes_num", Value::from(11)),
                ("tipo", Value::from("correctivo")),
                ("total_costo", Value::from(450.5_f64)),
            ]),
        ];
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([rows])
            .into_connection();

        let costs = PgReportRepository::new(db).maintenance_costs(2025).await.unwrap();
        assert_eq!(costs.len(), 2);
        assert_eq!(costs[0].mes, "February");
        assert_eq!(costs[1].mes, "November");
        assert_eq!(costs[1].total_costo, 450.5);
    }

    #[test]
    fn test_yearly_costs_only_count_completed_orders() {
        assert!(MAINTENANCE_COSTS_SQL.contains("WHERE estado = 'completado'"));
        assert!(MAINTENANCE_COSTS_SQL.contains("fecha_realizada IS NOT NULL"));
    }

    #[tokio::test]
    async fn test_dashboard_counts_read_single_row() {
        let row = BTreeMap::from([
            ("total_equipos", Value::from(12_i64)),
            ("equipos_operativos", Value::from(9_i64)),
            ("valor_inventario", Value::from(54_000.0_f64)),
            ("mantenimientos_mes", Value::from(3_i64)),
            ("costo_mantenimiento_mes", Value::from(0.0_f64)),
        ]);
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let next = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let counts = PgReportRepository::new(db)
            .dashboard_counts(start, next)
            .await
            .unwrap();

        assert_eq!(counts.total_equipos, 12);
        assert_eq!(counts.equipos_operativos, 9);
        assert_eq!(counts.mantenimientos_mes, 3);
    }
}
