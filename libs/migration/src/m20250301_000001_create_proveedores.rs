use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Proveedores::Table)
                    .if_not_exists()
                    .col(pk_auto(Proveedores::Id))
                    .col(string(Proveedores::RazonSocial))
                    .col(string_uniq(Proveedores::Ruc))
                    .col(string_null(Proveedores::Email))
                    .col(string_null(Proveedores::ContactoNombre))
                    .col(string_null(Proveedores::Telefono))
                    .col(string_null(Proveedores::SitioWeb))
                    .col(
                        timestamp_with_time_zone(Proveedores::FechaRegistro)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_proveedores_razon_social")
                    .table(Proveedores::Table)
                    .col(Proveedores::RazonSocial)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Proveedores::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Proveedores {
    Table,
    Id,
    RazonSocial,
    Ruc,
    Email,
    ContactoNombre,
    Telefono,
    SitioWeb,
    FechaRegistro,
}
