//! Table rendering for gateway payloads.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use serde_json::Value;

/// Printed instead of a table when a listing is empty
pub const NO_RECORDS: &str = "Sin registros";

/// `(json key, column header)` pairs
pub type Columns = &'static [(&'static str, &'static str)];

pub const EQUIPMENT_COLUMNS: Columns = &[
    ("id", "ID"),
    ("codigo_inventario", "Código"),
    ("nombre", "Nombre"),
    ("categoria_nombre", "Categoría"),
    ("ubicacion_nombre", "Ubicación"),
    ("estado_operativo", "Estado"),
    ("proveedor_nombre", "Proveedor"),
    ("fecha_garantia_fin", "Garantía hasta"),
];

pub const CATEGORY_COLUMNS: Columns = &[("id", "ID"), ("nombre", "Nombre"), ("descripcion", "Descripción")];

pub const LOCATION_COLUMNS: Columns = &[("id", "ID"), ("nombre_completo", "Ubicación")];

pub const PROVIDER_COLUMNS: Columns = &[
    ("id", "ID"),
    ("razon_social", "Razón social"),
    ("ruc", "RUC"),
    ("contacto_nombre", "Contacto"),
    ("telefono", "Teléfono"),
    ("email", "Email"),
];

pub const MAINTENANCE_COLUMNS: Columns = &[
    ("id", "ID"),
    ("codigo_inventario", "Código"),
    ("equipo_nombre", "Equipo"),
    ("tipo", "Tipo"),
    ("prioridad", "Prioridad"),
    ("estado", "Estado"),
    ("fecha_programada", "Programado"),
    ("fecha_realizada", "Realizado"),
    ("costo", "Costo"),
];

pub const NOTIFICATION_COLUMNS: Columns = &[
    ("id", "ID"),
    ("tipo", "Tipo"),
    ("titulo", "Título"),
    ("mensaje", "Mensaje"),
    ("fecha_creacion", "Fecha"),
];

pub const COST_COLUMNS: Columns = &[("mes", "Mes"), ("tipo", "Tipo"), ("total_costo", "Total")];

pub const AGENT_COLUMNS: Columns = &[("nombre", "Agente"), ("creadas", "Creadas")];

const DASHBOARD_METRICS: &[(&str, &str, &str)] = &[
    ("total_equipos", "Total de equipos", ""),
    ("equipos_operativos", "Equipos operativos", ""),
    ("tasa_disponibilidad", "Tasa de disponibilidad", "%"),
    ("valor_inventario", "Valor del inventario", ""),
    ("mantenimientos_mes", "Mantenimientos del mes", ""),
    ("equipos_reparacion", "Equipos fuera de servicio", ""),
    ("costo_mantenimiento_mes", "Costo de mantenimiento del mes", ""),
];

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Text for one JSON value; missing and null values render as `-`
pub fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(true)) => "sí".to_string(),
        Some(Value::Bool(false)) => "no".to_string(),
        Some(other) => other.to_string(),
    }
}

/// One row per record, or `None` when there is nothing to show
pub fn listing(rows: &[Value], columns: Columns) -> Option<Table> {
    if rows.is_empty() {
        return None;
    }

    let mut table = new_table();
    table.set_header(columns.iter().map(|(_, header)| *header));
    for row in rows {
        table.add_row(columns.iter().map(|(key, _)| cell(row.get(*key))));
    }
    Some(table)
}

/// Listing text, with [`NO_RECORDS`] for an empty listing
pub fn listing_text(rows: &[Value], columns: Columns) -> String {
    listing(rows, columns)
        .map(|table| table.to_string())
        .unwrap_or_else(|| NO_RECORDS.to_string())
}

/// Two-column metric table for the dashboard summary
pub fn dashboard(summary: &Value) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Indicador", "Valor"]);
    for (key, label, suffix) in DASHBOARD_METRICS {
        table.add_row(vec![
            label.to_string(),
            format!("{}{}", cell(summary.get(*key)), suffix),
        ]);
    }
    table
}
