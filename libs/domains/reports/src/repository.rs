use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ReportResult;
use crate::models::{
    CategoryCount, DashboardCounts, EquipmentSummary, LocationCount, MaintenanceSummary,
    MonthlyCost, StatusCount,
};

/// Read-only aggregate queries over equipment and maintenance
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Dashboard aggregates; the month window is `[month_start, next_month_start)`
    async fn dashboard_counts(
        &self,
        month_start: NaiveDate,
        next_month_start: NaiveDate,
    ) -> ReportResult<DashboardCounts>;

    async fn equipment_by_location(&self) -> ReportResult<Vec<LocationCount>>;

    async fn equipment_by_status(&self) -> ReportResult<Vec<StatusCount>>;

    async fn equipment_by_category(&self) -> ReportResult<Vec<CategoryCount>>;

    /// Completed maintenance cost per month and type, in month order
    async fn maintenance_costs(&self, year: i32) -> ReportResult<Vec<MonthlyCost>>;

    async fn equipment_for_export(&self) -> ReportResult<Vec<EquipmentSummary>>;

    async fn maintenance_for_export(&self) -> ReportResult<Vec<MaintenanceSummary>>;
}

/// Fixed report data served from memory (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct ReportSnapshot {
    pub counts: DashboardCounts,
    pub by_location: Vec<LocationCount>,
    pub by_status: Vec<StatusCount>,
    pub by_category: Vec<CategoryCount>,
    /// Costs keyed by year
    pub costs: Vec<(i32, MonthlyCost)>,
    pub equipment: Vec<EquipmentSummary>,
    pub maintenance: Vec<MaintenanceSummary>,
}

/// In-memory implementation of ReportRepository backed by a snapshot
#[derive(Debug, Default, Clone)]
pub struct InMemoryReportRepository {
    snapshot: Arc<RwLock<ReportSnapshot>>,
}

impl InMemoryReportRepository {
    pub fn new(snapshot: ReportSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn dashboard_counts(
        &self,
        _month_start: NaiveDate,
        _next_month_start: NaiveDate,
    ) -> ReportResult<DashboardCounts> {
        Ok(self.snapshot.read().await.counts.clone())
    }

    async fn equipment_by_location(&self) -> ReportResult<Vec<LocationCount>> {
        Ok(self.snapshot.read().await.by_location.clone())
    }

    async fn equipment_by_status(&self) -> ReportResult<Vec<StatusCount>> {
        Ok(self.snapshot.read().await.by_status.clone())
    }

    async fn equipment_by_category(&self) -> ReportResult<Vec<CategoryCount>> {
        Ok(self.snapshot.read().await.by_category.clone())
    }

    async fn maintenance_costs(&self, year: i32) -> ReportResult<Vec<MonthlyCost>> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .costs
            .iter()
            .filter(|(y, _)| *y == year)
            .map(|(_, cost)| cost.clone())
            .collect())
    }

    async fn equipment_for_export(&self) -> ReportResult<Vec<EquipmentSummary>> {
        Ok(self.snapshot.read().await.equipment.clone())
    }

    async fn maintenance_for_export(&self) -> ReportResult<Vec<MaintenanceSummary>> {
        Ok(self.snapshot.read().await.maintenance.clone())
    }
}
