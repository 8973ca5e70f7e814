//! Agents scan inventory state and propose notifications.
//!
//! An agent only produces candidates; the service stores them through
//! [`NotificationRepository::insert_unless_pending`] so a run never adds a
//! second unread notification for the same kind and equipment.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use crate::error::NotificationResult;
use crate::models::{NewNotification, NotificationKind, OverdueCandidate, WarrantyCandidate};
use crate::repository::NotificationRepository;

/// Days ahead the warranty agent looks
pub const WARRANTY_WINDOW_DAYS: u64 = 30;

#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &'static str;

    /// Notifications this agent would raise on `today`
    async fn scan(
        &self,
        repository: &dyn NotificationRepository,
        today: NaiveDate,
    ) -> NotificationResult<Vec<NewNotification>>;
}

/// Flags equipment whose warranty ends within the window, today included
#[derive(Debug, Clone)]
pub struct WarrantyAgent {
    window_days: u64,
}

impl WarrantyAgent {
    pub fn new(window_days: u64) -> Self {
        Self { window_days }
    }
}

impl Default for WarrantyAgent {
    fn default() -> Self {
        Self::new(WARRANTY_WINDOW_DAYS)
    }
}

pub(crate) fn warranty_notification(candidate: &WarrantyCandidate) -> NewNotification {
    NewNotification {
        tipo: NotificationKind::Garantia,
        titulo: format!("Garantía por vencer: {}", candidate.codigo_inventario),
        mensaje: format!(
            "La garantía del equipo {} ({}) vence el {}",
            candidate.nombre,
            candidate.codigo_inventario,
            candidate.fecha_garantia_fin.format("%Y-%m-%d")
        ),
        equipo_id: Some(candidate.equipo_id),
    }
}

#[async_trait]
impl Agent for WarrantyAgent {
    fn name(&self) -> &'static str {
        "garantias"
    }

    async fn scan(
        &self,
        repository: &dyn NotificationRepository,
        today: NaiveDate,
    ) -> NotificationResult<Vec<NewNotification>> {
        let until = today
            .checked_add_days(Days::new(self.window_days))
            .unwrap_or(NaiveDate::MAX);
        let candidates = repository.expiring_warranties(today, until).await?;
        Ok(candidates.iter().map(warranty_notification).collect())
    }
}

/// Flags orders still `programado` after their scheduled date
#[derive(Debug, Clone, Default)]
pub struct OverdueMaintenanceAgent;

pub(crate) fn overdue_notification(candidate: &OverdueCandidate) -> NewNotification {
    NewNotification {
        tipo: NotificationKind::MantenimientoVencido,
        titulo: format!("Mantenimiento vencido: {}", candidate.codigo_inventario),
        mensaje: format!(
            "El mantenimiento #{} del equipo {} ({}) estaba programado para el {}",
            candidate.mantenimiento_id,
            candidate.nombre,
            candidate.codigo_inventario,
            candidate.fecha_programada.format("%Y-%m-%d")
        ),
        equipo_id: Some(candidate.equipo_id),
    }
}

#[async_trait]
impl Agent for OverdueMaintenanceAgent {
    fn name(&self) -> &'static str {
        "mantenimientos_vencidos"
    }

    async fn scan(
        &self,
        repository: &dyn NotificationRepository,
        today: NaiveDate,
    ) -> NotificationResult<Vec<NewNotification>> {
        let candidates = repository.overdue_maintenance(today).await?;
        Ok(candidates.iter().map(overdue_notification).collect())
    }
}

/// The agents run by `POST /run-all-agents`, in order
pub fn default_agents() -> Vec<Box<dyn Agent>> {
    vec![
        Box::new(WarrantyAgent::default()),
        Box::new(OverdueMaintenanceAgent),
    ]
}
