use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::NotificationResult;
use crate::models::{NewNotification, Notification, OverdueCandidate, WarrantyCandidate};

/// Storage for notifications plus the queries the agents scan
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Newest first, at most `limit` rows with the given read flag
    async fn list(&self, leida: bool, limit: u64) -> NotificationResult<Vec<Notification>>;

    /// Returns false when the id does not exist
    async fn mark_read(&self, id: i32) -> NotificationResult<bool>;

    /// Store a notification unless an unread one with the same `tipo` and
    /// `equipo_id` exists. Returns the new id, or None when skipped.
    async fn insert_unless_pending(&self, notification: NewNotification) -> NotificationResult<Option<i32>>;

    /// Equipment whose warranty ends within `[from, until]`
    async fn expiring_warranties(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> NotificationResult<Vec<WarrantyCandidate>>;

    /// `programado` orders scheduled before `today`
    async fn overdue_maintenance(&self, today: NaiveDate) -> NotificationResult<Vec<OverdueCandidate>>;
}

#[derive(Debug, Default)]
struct Store {
    notifications: Vec<Notification>,
    warranties: Vec<WarrantyCandidate>,
    pending_orders: Vec<OverdueCandidate>,
    next_id: i32,
}

/// In-memory implementation of NotificationRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotificationRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose agents scan the given warranties and pending orders
    pub fn with_sources(warranties: Vec<WarrantyCandidate>, pending_orders: Vec<OverdueCandidate>) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                warranties,
                pending_orders,
                ..Default::default()
            })),
        }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn list(&self, leida: bool, limit: u64) -> NotificationResult<Vec<Notification>> {
        let store = self.store.read().await;
        let mut rows: Vec<Notification> = store
            .notifications
            .iter()
            .filter(|n| n.leida == leida)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }

    async fn mark_read(&self, id: i32) -> NotificationResult<bool> {
        let mut store = self.store.write().await;
        match store.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.leida = true;
                tracing::info!(notification_id = id, "Marked notification as read");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_unless_pending(&self, notification: NewNotification) -> NotificationResult<Option<i32>> {
        let mut store = self.store.write().await;
        let tipo = notification.tipo.to_string();

        let pending = store
            .notifications
            .iter()
            .any(|n| !n.leida && n.tipo == tipo && n.equipo_id == notification.equipo_id);
        if pending {
            return Ok(None);
        }

        store.next_id += 1;
        let id = store.next_id;
        store.notifications.push(Notification {
            id,
            tipo,
            titulo: notification.titulo,
            mensaje: notification.mensaje,
            equipo_id: notification.equipo_id,
            leida: false,
            fecha_creacion: Utc::now(),
        });

        tracing::info!(notification_id = id, "Created notification");
        Ok(Some(id))
    }

    async fn expiring_warranties(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> NotificationResult<Vec<WarrantyCandidate>> {
        let store = self.store.read().await;
        Ok(store
            .warranties
            .iter()
            .filter(|w| w.fecha_garantia_fin >= from && w.fecha_garantia_fin <= until)
            .cloned()
            .collect())
    }

    async fn overdue_maintenance(&self, today: NaiveDate) -> NotificationResult<Vec<OverdueCandidate>> {
        let store = self.store.read().await;
        Ok(store
            .pending_orders
            .iter()
            .filter(|o| o.fecha_programada < today)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;

    fn warranty_alert(equipo_id: i32) -> NewNotification {
        NewNotification {
            tipo: NotificationKind::Garantia,
            titulo: "Garantía por vencer".into(),
            mensaje: "x".into(),
            equipo_id: Some(equipo_id),
        }
    }

    #[tokio::test]
    async fn test_pending_notification_blocks_duplicate_until_read() {
        let repo = InMemoryNotificationRepository::new();

        let first = repo.insert_unless_pending(warranty_alert(1)).await.unwrap();
        assert_eq!(first, Some(1));
        assert_eq!(repo.insert_unless_pending(warranty_alert(1)).await.unwrap(), None);
        assert_eq!(repo.insert_unless_pending(warranty_alert(2)).await.unwrap(), Some(2));

        assert!(repo.mark_read(1).await.unwrap());
        assert_eq!(repo.insert_unless_pending(warranty_alert(1)).await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_list_newest_first_with_limit() {
        let repo = InMemoryNotificationRepository::new();
        for equipo_id in 1..=12 {
            repo.insert_unless_pending(warranty_alert(equipo_id)).await.unwrap();
        }

        let rows = repo.list(false, 10).await.unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].id, 12);
        assert_eq!(rows[9].id, 3);
        assert!(repo.list(true, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_read_missing() {
        let repo = InMemoryNotificationRepository::new();
        assert!(!repo.mark_read(7).await.unwrap());
    }
}
