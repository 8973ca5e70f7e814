use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value,
};
use std::str::FromStr;

use crate::error::{EquipmentError, EquipmentResult};
use crate::models::{
    Category, CreateEquipment, Equipment, EquipmentFilter, Location, OperationalStatus,
    UpdateEquipment,
};
use crate::repository::EquipmentRepository;

const SELECT_EQUIPMENT: &str = r#"
    SELECT e.id, e.codigo_inventario, e.categoria_id, e.nombre, e.marca, e.modelo,
           e.numero_serie, e.especificaciones, e.proveedor_id, e.fecha_compra,
           e.costo_compra, e.fecha_garantia_fin, e.ubicacion_actual_id,
           e.estado_operativo, e.notas, e.fecha_registro,
           c.nombre AS categoria_nombre,
           u.edificio || ' - ' || u.aula_oficina AS ubicacion_nombre,
           p.razon_social AS proveedor_nombre
    FROM equipos e
    LEFT JOIN categorias_equipos c ON e.categoria_id = c.id
    LEFT JOIN ubicaciones u ON e.ubicacion_actual_id = u.id
    LEFT JOIN proveedores p ON e.proveedor_id = p.id
"#;

/// PostgreSQL implementation of EquipmentRepository
#[derive(Clone)]
pub struct PgEquipmentRepository {
    db: DatabaseConnection,
}

impl PgEquipmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct EquipmentRow {
    id: i32,
    codigo_inventario: String,
    categoria_id: i32,
    nombre: String,
    marca: Option<String>,
    modelo: Option<String>,
    numero_serie: Option<String>,
    especificaciones: Option<serde_json::Value>,
    proveedor_id: Option<i32>,
    fecha_compra: Option<NaiveDate>,
    costo_compra: Option<f64>,
    fecha_garantia_fin: Option<NaiveDate>,
    ubicacion_actual_id: Option<i32>,
    estado_operativo: String,
    notas: Option<String>,
    fecha_registro: DateTime<Utc>,
    categoria_nombre: Option<String>,
    ubicacion_nombre: Option<String>,
    proveedor_nombre: Option<String>,
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        let estado_operativo = OperationalStatus::from_str(&row.estado_operativo)
            .unwrap_or_else(|_| {
                tracing::warn!(
                    equipment_id = row.id,
                    estado = %row.estado_operativo,
                    "Unknown operational status in database"
                );
                OperationalStatus::default()
            });

        Equipment {
            id: row.id,
            codigo_inventario: row.codigo_inventario,
            categoria_id: row.categoria_id,
            nombre: row.nombre,
            marca: row.marca,
            modelo: row.modelo,
            numero_serie: row.numero_serie,
            especificaciones: row.especificaciones,
            proveedor_id: row.proveedor_id,
            fecha_compra: row.fecha_compra,
            costo_compra: row.costo_compra,
            fecha_garantia_fin: row.fecha_garantia_fin,
            ubicacion_actual_id: row.ubicacion_actual_id,
            estado_operativo,
            notas: row.notas,
            fecha_registro: row.fecha_registro,
            categoria_nombre: row.categoria_nombre,
            ubicacion_nombre: row.ubicacion_nombre,
            proveedor_nombre: row.proveedor_nombre,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: i32,
}

#[derive(Debug, FromQueryResult)]
struct CategoryRow {
    id: i32,
    nombre: String,
    descripcion: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct LocationRow {
    id: i32,
    edificio: String,
    aula_oficina: String,
    activo: bool,
}

/// Builds the list query; filters are bound as parameters in a fixed order.
pub(crate) fn build_list_query(filter: &EquipmentFilter) -> (String, Vec<Value>) {
    let mut sql = String::from(SELECT_EQUIPMENT);
    let mut conditions = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(categoria) = &filter.categoria {
        values.push(categoria.clone().into());
        conditions.push(format!("c.nombre = ${}", values.len()));
    }
    if let Some(estado) = filter.estado {
        values.push(estado.to_string().into());
        conditions.push(format!("e.estado_operativo = ${}", values.len()));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY e.fecha_registro DESC, e.id DESC");

    (sql, values)
}

/// Builds a partial UPDATE touching only the supplied fields.
/// Returns `None` when there is nothing to set.
pub(crate) fn build_update(id: i32, input: &UpdateEquipment) -> Option<(String, Vec<Value>)> {
    let mut sets = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    let mut push = |column: &str, value: Value| {
        values.push(value);
        sets.push(format!("{} = ${}", column, values.len()));
    };

    if let Some(estado) = input.estado_operativo {
        push("estado_operativo", estado.to_string().into());
    }
    if let Some(ubicacion) = input.ubicacion_actual_id {
        push("ubicacion_actual_id", ubicacion.into());
    }
    if let Some(proveedor) = input.proveedor_id {
        push("proveedor_id", proveedor.into());
    }
    if let Some(costo) = input.costo_compra {
        push("costo_compra", costo.into());
    }
    if let Some(fecha) = input.fecha_garantia_fin {
        push("fecha_garantia_fin", fecha.into());
    }
    if let Some(notas) = &input.notas {
        push("notas", notas.clone().into());
    }

    if sets.is_empty() {
        return None;
    }

    values.push(id.into());
    let sql = format!(
        "UPDATE equipos SET {} WHERE id = ${}",
        sets.join(", "),
        values.len()
    );
    Some((sql, values))
}

fn map_write_error(e: DbErr, codigo: Option<&str>) -> EquipmentError {
    let err_str = e.to_string();
    if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
        EquipmentError::DuplicateCode(codigo.unwrap_or_default().to_string())
    } else if err_str.contains("foreign key") {
        EquipmentError::InvalidReference(
            "La categoría, ubicación o proveedor indicado no existe".to_string(),
        )
    } else {
        EquipmentError::Internal(format!("Database error: {}", e))
    }
}

#[async_trait]
impl EquipmentRepository for PgEquipmentRepository {
    async fn list(&self, filter: EquipmentFilter) -> EquipmentResult<Vec<Equipment>> {
        let (sql, values) = build_list_query(&filter);
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);

        let rows = EquipmentRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| EquipmentError::Internal(format!("Database error: {}", e)))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i32) -> EquipmentResult<Option<Equipment>> {
        let sql = format!("{} WHERE e.id = $1", SELECT_EQUIPMENT);
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = EquipmentRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| EquipmentError::Internal(format!("Database error: {}", e)))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, input: CreateEquipment) -> EquipmentResult<i32> {
        let sql = r#"
            INSERT INTO equipos (codigo_inventario, categoria_id, nombre, marca, modelo,
                                 numero_serie, especificaciones, proveedor_id, fecha_compra,
                                 costo_compra, fecha_garantia_fin, ubicacion_actual_id,
                                 estado_operativo, notas)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                input.codigo_inventario.clone().into(),
                input.categoria_id.into(),
                input.nombre.into(),
                input.marca.into(),
                input.modelo.into(),
                input.numero_serie.into(),
                input.especificaciones.into(),
                input.proveedor_id.into(),
                input.fecha_compra.into(),
                input.costo_compra.into(),
                input.fecha_garantia_fin.into(),
                input.ubicacion_actual_id.into(),
                input.estado_operativo.to_string().into(),
                input.notas.into(),
            ],
        );

        let row = IdRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| map_write_error(e, Some(&input.codigo_inventario)))?
            .ok_or_else(|| EquipmentError::Internal("Insert returned no id".to_string()))?;

        tracing::info!(equipment_id = row.id, "Created equipment");
        Ok(row.id)
    }

    async fn update(&self, id: i32, input: UpdateEquipment) -> EquipmentResult<bool> {
        let Some((sql, values)) = build_update(id, &input) else {
            return Err(EquipmentError::NothingToUpdate);
        };
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| map_write_error(e, None))?;

        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(equipment_id = id, "Updated equipment");
        }
        Ok(updated)
    }

    async fn list_categories(&self) -> EquipmentResult<Vec<Category>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT id, nombre, descripcion FROM categorias_equipos ORDER BY nombre",
            [],
        );

        let rows = CategoryRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| EquipmentError::Internal(format!("Database error: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|r| Category {
                id: r.id,
                nombre: r.nombre,
                descripcion: r.descripcion,
            })
            .collect())
    }

    async fn list_locations(&self) -> EquipmentResult<Vec<Location>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                SELECT id, edificio, aula_oficina, activo
                FROM ubicaciones
                WHERE activo = true
                ORDER BY edificio, aula_oficina
            "#,
            [],
        );

        let rows = LocationRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| EquipmentError::Internal(format!("Database error: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|r| Location {
                nombre_completo: Location::display_name(&r.edificio, &r.aula_oficina),
                id: r.id,
                edificio: r.edificio,
                aula_oficina: r.aula_oficina,
                activo: r.activo,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_without_filters() {
        let (sql, values) = build_list_query(&EquipmentFilter::default());
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY e.fecha_registro DESC, e.id DESC"));
        assert!(values.is_empty());
    }

    #[test]
    fn test_list_query_binds_filters_in_order() {
        let filter = EquipmentFilter {
            categoria: Some("Laptop".into()),
            estado: Some(OperationalStatus::EnMantenimiento),
        };
        let (sql, values) = build_list_query(&filter);

        assert!(sql.contains("WHERE c.nombre = $1 AND e.estado_operativo = $2"));
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], Value::from("en_mantenimiento".to_string()));
    }

    #[test]
    fn test_list_query_status_only() {
        let filter = EquipmentFilter {
            categoria: None,
            estado: Some(OperationalStatus::Obsoleto),
        };
        let (sql, values) = build_list_query(&filter);

        assert!(sql.contains("WHERE e.estado_operativo = $1"));
        assert_eq!(values, vec![Value::from("obsoleto".to_string())]);
    }

    #[test]
    fn test_update_only_sets_supplied_fields() {
        let input = UpdateEquipment {
            estado_operativo: Some(OperationalStatus::EnReparacion),
            notas: Some("Pantalla dañada".into()),
            ..Default::default()
        };
        let (sql, values) = build_update(7, &input).unwrap();

        assert_eq!(
            sql,
            "UPDATE equipos SET estado_operativo = $1, notas = $2 WHERE id = $3"
        );
        assert_eq!(values.len(), 3);
        assert_eq!(values[2], Value::from(7));
    }

    #[test]
    fn test_update_with_nothing_to_set() {
        assert!(build_update(1, &UpdateEquipment::default()).is_none());
    }
}
