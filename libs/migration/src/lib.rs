pub use sea_orm_migration::prelude::*;

mod m20250301_000000_create_catalogs;
mod m20250301_000001_create_proveedores;
mod m20250301_000002_create_equipos;
mod m20250301_000003_create_mantenimientos;
mod m20250301_000004_create_notificaciones;
mod m20250301_000005_seed_catalogs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000000_create_catalogs::Migration),
            Box::new(m20250301_000001_create_proveedores::Migration),
            Box::new(m20250301_000002_create_equipos::Migration),
            Box::new(m20250301_000003_create_mantenimientos::Migration),
            Box::new(m20250301_000004_create_notificaciones::Migration),
            Box::new(m20250301_000005_seed_catalogs::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_unique() {
        let names: Vec<String> = Migrator::migrations().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names.len(), 6);

        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }
}
