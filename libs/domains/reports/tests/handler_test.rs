//! Handler tests for the reports domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Datelike, Local, NaiveDate};
use domain_reports::*;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt; // For oneshot()

async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}

fn snapshot() -> ReportSnapshot {
    let this_year = Local::now().year();
    ReportSnapshot {
        counts: DashboardCounts {
            total_equipos: 3,
            equipos_operativos: 2,
            valor_inventario: 4_500.0,
            mantenimientos_mes: 1,
            costo_mantenimiento_mes: 80.0,
        },
        by_location: vec![LocationCount {
            ubicacion: "Bloque A - Laboratorio 1".into(),
            cantidad: 3,
        }],
        by_status: vec![
            StatusCount {
                estado: "operativo".into(),
                cantidad: 2,
            },
            StatusCount {
                estado: "en_reparacion".into(),
                cantidad: 1,
            },
        ],
        by_category: vec![CategoryCount {
            categoria: "Laptops".into(),
            cantidad: 3,
            valor_total: 4_500.0,
        }],
        costs: vec![
            (
                this_year,
                MonthlyCost {
                    mes: "March".into(),
                    tipo: "correctivo".into(),
                    total_costo: 80.0,
                },
            ),
            (
                2020,
                MonthlyCost {
                    mes: "January".into(),
                    tipo: "preventivo".into(),
                    total_costo: 25.0,
                },
            ),
        ],
        equipment: vec![EquipmentSummary {
            codigo_inventario: "LAP-001".into(),
            nombre: "Laptop Dell".into(),
            categoria: Some("Laptops".into()),
            estado: "operativo".into(),
            ubicacion: Some("Bloque A - Laboratorio 1".into()),
        }],
        maintenance: vec![MaintenanceSummary {
            fecha_programada: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            codigo_inventario: "LAP-001".into(),
            tipo: "correctivo".into(),
            estado: "completado".into(),
            costo: Some(80.0),
        }],
    }
}

fn app() -> Router {
    handlers::router(ReportService::new(InMemoryReportRepository::new(snapshot())))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn export(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/export/pdf")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_dashboard() {
    let response = app().oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["total_equipos"], 3);
    assert_eq!(body["equipos_reparacion"], 1);
    assert_eq!(body["tasa_disponibilidad"], 66.7);
    assert_eq!(body["valor_inventario"], 4500.0);
}

#[tokio::test]
async fn test_aggregates() {
    let app = app();

    let status: Vec<StatusCount> =
        json_body(app.clone().oneshot(get("/equipos-por-estado")).await.unwrap().into_body()).await;
    assert_eq!(status.iter().map(|s| s.cantidad).sum::<i64>(), 3);

    let location: Vec<Value> =
        json_body(app.clone().oneshot(get("/equipos-por-ubicacion")).await.unwrap().into_body()).await;
    assert_eq!(location[0]["ubicacion"], "Bloque A - Laboratorio 1");

    let category: Vec<Value> =
        json_body(app.oneshot(get("/equipos-por-categoria")).await.unwrap().into_body()).await;
    assert_eq!(category[0]["valor_total"], 4500.0);
}

#[tokio::test]
async fn test_costs_default_year_and_explicit_year() {
    let app = app();

    let current: Vec<MonthlyCost> =
        json_body(app.clone().oneshot(get("/costos-mantenimiento")).await.unwrap().into_body()).await;
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].mes, "March");

    let old: Vec<MonthlyCost> = json_body(
        app.clone()
            .oneshot(get("/costos-mantenimiento?year=2020"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(old[0].tipo, "preventivo");

    let invalid = app
        .oneshot(get("/costos-mantenimiento?year=abc"))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_defaults_to_equipment() {
    let response = app().oneshot(export("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"reporte_equipos.pdf\""
    );

    let pdf = body_bytes(response.into_body()).await;
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(String::from_utf8_lossy(&pdf).contains("(Reporte de Equipos) Tj"));
}

#[tokio::test]
async fn test_export_maintenance() {
    let response = app()
        .oneshot(export(r#"{"type": "mantenimientos"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"reporte_mantenimientos.pdf\""
    );

    let pdf = body_bytes(response.into_body()).await;
    assert!(String::from_utf8_lossy(&pdf).contains("LAP-001 | correctivo | completado | 80.00"));
}

#[tokio::test]
async fn test_export_rejects_unknown_type_and_bad_json() {
    let app = app();

    let unknown = app
        .clone()
        .oneshot(export(r#"{"type": "proveedores"}"#))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    let malformed = app.oneshot(export("{not json")).await.unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}
