use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};

use crate::error::{NotificationError, NotificationResult};
use crate::models::{NewNotification, Notification, OverdueCandidate, WarrantyCandidate};
use crate::repository::NotificationRepository;

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    db: DatabaseConnection,
}

impl PgNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> NotificationError {
    NotificationError::Internal(format!("Database error: {}", e))
}

#[derive(Debug, FromQueryResult)]
struct NotificationRow {
    id: i32,
    tipo: String,
    titulo: String,
    mensaje: String,
    equipo_id: Option<i32>,
    leida: bool,
    fecha_creacion: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            tipo: row.tipo,
            titulo: row.titulo,
            mensaje: row.mensaje,
            equipo_id: row.equipo_id,
            leida: row.leida,
            fecha_creacion: row.fecha_creacion,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: i32,
}

#[derive(Debug, FromQueryResult)]
struct WarrantyRow {
    id: i32,
    codigo_inventario: String,
    nombre: String,
    fecha_garantia_fin: NaiveDate,
}

#[derive(Debug, FromQueryResult)]
struct OverdueRow {
    id: i32,
    equipo_id: i32,
    codigo_inventario: String,
    nombre: String,
    fecha_programada: NaiveDate,
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn list(&self, leida: bool, limit: u64) -> NotificationResult<Vec<Notification>> {
        let sql = r#"
            SELECT id, tipo, titulo, mensaje, equipo_id, leida, fecha_creacion
            FROM notificaciones
            WHERE leida = $1
            ORDER BY id DESC
            LIMIT $2
        "#;
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [leida.into(), (limit as i64).into()],
        );

        let rows = NotificationRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_read(&self, id: i32) -> NotificationResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE notificaciones SET leida = true WHERE id = $1",
            [id.into()],
        );

        let result = self.db.execute_raw(stmt).await.map_err(db_error)?;
        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(notification_id = id, "Marked notification as read");
        }
        Ok(updated)
    }

    async fn insert_unless_pending(&self, notification: NewNotification) -> NotificationResult<Option<i32>> {
        // Skipped rows return nothing; the partial unique index arbitrates races
        let sql = r#"
            INSERT INTO notificaciones (tipo, titulo, mensaje, equipo_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (tipo, COALESCE(equipo_id, 0)) WHERE leida = false DO NOTHING
            RETURNING id
        "#;
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                notification.tipo.to_string().into(),
                notification.titulo.into(),
                notification.mensaje.into(),
                notification.equipo_id.into(),
            ],
        );

        let row = IdRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        if let Some(IdRow { id }) = row {
            tracing::info!(notification_id = id, tipo = %notification.tipo, "Created notification");
        }
        Ok(row.map(|r| r.id))
    }

    async fn expiring_warranties(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> NotificationResult<Vec<WarrantyCandidate>> {
        let sql = r#"
            SELECT id, codigo_inventario, nombre, fecha_garantia_fin
            FROM equipos
            WHERE fecha_garantia_fin BETWEEN $1 AND $2
            ORDER BY fecha_garantia_fin, id
        "#;
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [from.into(), until.into()]);

        let rows = WarrantyRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|r| WarrantyCandidate {
                equipo_id: r.id,
                codigo_inventario: r.codigo_inventario,
                nombre: r.nombre,
                fecha_garantia_fin: r.fecha_garantia_fin,
            })
            .collect())
    }

    async fn overdue_maintenance(&self, today: NaiveDate) -> NotificationResult<Vec<OverdueCandidate>> {
        let sql = r#"
            SELECT m.id, m.equipo_id, e.codigo_inventario, e.nombre, m.fecha_programada
            FROM mantenimientos m
            JOIN equipos e ON m.equipo_id = e.id
            WHERE m.estado = 'programado' AND m.fecha_programada < $1
            ORDER BY m.fecha_programada, m.id
        "#;
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [today.into()]);

        let rows = OverdueRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|r| OverdueCandidate {
                mantenimiento_id: r.id,
                equipo_id: r.equipo_id,
                codigo_inventario: r.codigo_inventario,
                nombre: r.nombre,
                fecha_programada: r.fecha_programada,
            })
            .collect())
    }
}
