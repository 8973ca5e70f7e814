use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CategoriasEquipos::Table)
                    .if_not_exists()
                    .col(pk_auto(CategoriasEquipos::Id))
                    .col(string_uniq(CategoriasEquipos::Nombre))
                    .col(text_null(CategoriasEquipos::Descripcion))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ubicaciones::Table)
                    .if_not_exists()
                    .col(pk_auto(Ubicaciones::Id))
                    .col(string(Ubicaciones::Edificio))
                    .col(string(Ubicaciones::AulaOficina))
                    .col(boolean(Ubicaciones::Activo).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ubicaciones_edificio_aula")
                    .table(Ubicaciones::Table)
                    .col(Ubicaciones::Edificio)
                    .col(Ubicaciones::AulaOficina)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ubicaciones::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CategoriasEquipos::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum CategoriasEquipos {
    Table,
    Id,
    Nombre,
    Descripcion,
}

#[derive(DeriveIden)]
pub(crate) enum Ubicaciones {
    Table,
    Id,
    Edificio,
    AulaOficina,
    Activo,
}
