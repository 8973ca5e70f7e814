use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            INSERT INTO categorias_equipos (nombre, descripcion)
            VALUES
                ('Computadora de escritorio', 'Equipos de escritorio para laboratorios y oficinas'),
                ('Laptop', 'Equipos portátiles'),
                ('Proyector', 'Proyectores multimedia de aulas'),
                ('Impresora', 'Impresoras y multifuncionales'),
                ('Servidor', 'Servidores del centro de datos'),
                ('Equipo de red', 'Switches, routers y access points')
            ON CONFLICT (nombre) DO NOTHING
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            INSERT INTO ubicaciones (edificio, aula_oficina, activo)
            VALUES
                ('Pabellón A', 'Laboratorio 101', true),
                ('Pabellón A', 'Laboratorio 102', true),
                ('Pabellón B', 'Aula 201', true),
                ('Pabellón B', 'Aula 202', true),
                ('Administración', 'Oficina de TI', true),
                ('Administración', 'Centro de datos', true)
            ON CONFLICT (edificio, aula_oficina) DO NOTHING
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "DELETE FROM ubicaciones WHERE id NOT IN (SELECT ubicacion_actual_id FROM equipos WHERE ubicacion_actual_id IS NOT NULL)",
        )
        .await?;
        db.execute_unprepared(
            "DELETE FROM categorias_equipos WHERE id NOT IN (SELECT categoria_id FROM equipos)",
        )
        .await?;

        Ok(())
    }
}
