use chrono::NaiveDate;
use std::sync::Arc;

use crate::agents::{Agent, default_agents};
use crate::error::{NotificationError, NotificationResult};
use crate::models::{AgentReport, AgentRunSummary, Notification, NotificationFilter};
use crate::repository::NotificationRepository;

/// Rows returned by the notification feed
pub const FEED_LIMIT: u64 = 10;

/// Service layer for the notification feed and the agents that fill it
#[derive(Clone)]
pub struct NotificationService<R: NotificationRepository> {
    repository: Arc<R>,
    agents: Arc<Vec<Box<dyn Agent>>>,
}

impl<R: NotificationRepository> NotificationService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_agents(repository, default_agents())
    }

    pub fn with_agents(repository: R, agents: Vec<Box<dyn Agent>>) -> Self {
        Self {
            repository: Arc::new(repository),
            agents: Arc::new(agents),
        }
    }

    pub async fn list_notifications(
        &self,
        filter: NotificationFilter,
    ) -> NotificationResult<Vec<Notification>> {
        self.repository.list(filter.read(), FEED_LIMIT).await
    }

    pub async fn mark_read(&self, id: i32) -> NotificationResult<()> {
        if self.repository.mark_read(id).await? {
            Ok(())
        } else {
            Err(NotificationError::NotFound(id))
        }
    }

    /// Run every agent once and store what they find
    pub async fn run_all_agents(&self, today: NaiveDate) -> NotificationResult<AgentRunSummary> {
        let mut agentes = Vec::with_capacity(self.agents.len());

        for agent in self.agents.iter() {
            let found = agent
                .scan(self.repository.as_ref(), today)
                .await
                .map_err(|e| NotificationError::Agent {
                    agent: agent.name(),
                    message: e.to_string(),
                })?;

            let mut creadas = 0;
            for notification in found {
                if self.repository.insert_unless_pending(notification).await?.is_some() {
                    creadas += 1;
                }
            }

            tracing::info!(agent = agent.name(), created = creadas, "Agent finished");
            agentes.push(AgentReport {
                nombre: agent.name().to_string(),
                creadas,
            });
        }

        Ok(AgentRunSummary {
            message: "Agentes ejecutados".to_string(),
            notificaciones_creadas: agentes.iter().map(|a| a.creadas).sum(),
            agentes,
        })
    }
}
