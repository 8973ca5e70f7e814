use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000002_create_equipos::Equipos;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notificaciones::Table)
                    .if_not_exists()
                    .col(pk_auto(Notificaciones::Id))
                    .col(string(Notificaciones::Tipo))
                    .col(string(Notificaciones::Titulo))
                    .col(text(Notificaciones::Mensaje))
                    .col(integer_null(Notificaciones::EquipoId))
                    .col(boolean(Notificaciones::Leida).default(false))
                    .col(
                        timestamp_with_time_zone(Notificaciones::FechaCreacion)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notificaciones_equipo")
                            .from(Notificaciones::Table, Notificaciones::EquipoId)
                            .to(Equipos::Table, Equipos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notificaciones_leida")
                    .table(Notificaciones::Table)
                    .col(Notificaciones::Leida)
                    .to_owned(),
            )
            .await?;

        // At most one unread notification per (tipo, equipo)
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_notificaciones_pendientes \
                 ON notificaciones (tipo, COALESCE(equipo_id, 0)) WHERE leida = false",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notificaciones::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Notificaciones {
    Table,
    Id,
    Tipo,
    Titulo,
    Mensaje,
    EquipoId,
    Leida,
    FechaCreacion,
}
