use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_catalogs::{CategoriasEquipos, Ubicaciones};
use crate::m20250301_000001_create_proveedores::Proveedores;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Equipos::Table)
                    .if_not_exists()
                    .col(pk_auto(Equipos::Id))
                    .col(string_uniq(Equipos::CodigoInventario))
                    .col(integer(Equipos::CategoriaId))
                    .col(string(Equipos::Nombre))
                    .col(string_null(Equipos::Marca))
                    .col(string_null(Equipos::Modelo))
                    .col(string_null(Equipos::NumeroSerie))
                    .col(json_binary_null(Equipos::Especificaciones))
                    .col(integer_null(Equipos::ProveedorId))
                    .col(date_null(Equipos::FechaCompra))
                    .col(double_null(Equipos::CostoCompra))
                    .col(date_null(Equipos::FechaGarantiaFin))
                    .col(integer_null(Equipos::UbicacionActualId))
                    .col(string(Equipos::EstadoOperativo).default("operativo"))
                    .col(text_null(Equipos::Notas))
                    .col(
                        timestamp_with_time_zone(Equipos::FechaRegistro)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipos_categoria")
                            .from(Equipos::Table, Equipos::CategoriaId)
                            .to(CategoriasEquipos::Table, CategoriasEquipos::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipos_proveedor")
                            .from(Equipos::Table, Equipos::ProveedorId)
                            .to(Proveedores::Table, Proveedores::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipos_ubicacion")
                            .from(Equipos::Table, Equipos::UbicacionActualId)
                            .to(Ubicaciones::Table, Ubicaciones::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_equipos_estado_operativo", Equipos::EstadoOperativo),
            ("idx_equipos_categoria_id", Equipos::CategoriaId),
            ("idx_equipos_fecha_garantia_fin", Equipos::FechaGarantiaFin),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Equipos::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Equipos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Equipos {
    Table,
    Id,
    CodigoInventario,
    CategoriaId,
    Nombre,
    Marca,
    Modelo,
    NumeroSerie,
    Especificaciones,
    ProveedorId,
    FechaCompra,
    CostoCompra,
    FechaGarantiaFin,
    UbicacionActualId,
    EstadoOperativo,
    Notas,
    FechaRegistro,
}
