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
                    .table(Mantenimientos::Table)
                    .if_not_exists()
                    .col(pk_auto(Mantenimientos::Id))
                    .col(integer(Mantenimientos::EquipoId))
                    .col(string(Mantenimientos::Tipo))
                    .col(date(Mantenimientos::FechaProgramada))
                    .col(date_null(Mantenimientos::FechaRealizada))
                    .col(text(Mantenimientos::Descripcion))
                    .col(string(Mantenimientos::Prioridad).default("media"))
                    .col(string(Mantenimientos::Estado).default("programado"))
                    .col(double_null(Mantenimientos::Costo))
                    .col(text_null(Mantenimientos::Observaciones))
                    .col(
                        timestamp_with_time_zone(Mantenimientos::FechaRegistro)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mantenimientos_equipo")
                            .from(Mantenimientos::Table, Mantenimientos::EquipoId)
                            .to(Equipos::Table, Equipos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_mantenimientos_equipo_id", Mantenimientos::EquipoId),
            ("idx_mantenimientos_fecha_programada", Mantenimientos::FechaProgramada),
            ("idx_mantenimientos_estado", Mantenimientos::Estado),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Mantenimientos::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Mantenimientos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Mantenimientos {
    Table,
    Id,
    EquipoId,
    Tipo,
    FechaProgramada,
    FechaRealizada,
    Descripcion,
    Prioridad,
    Estado,
    Costo,
    Observaciones,
    FechaRegistro,
}
