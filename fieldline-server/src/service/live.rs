//! Live Change Feed
//!
//! In-process notification bus behind the live board stream. Services
//! publish a company id after every successful write; each subscriber
//! re-queries that company's job list and pushes the fresh snapshot to its
//! connected client.

use fieldline_core::domain::job::Job;
use sqlx::PgPool;
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

use crate::repository::job_repository;

const FEED_CAPACITY: usize = 256;

/// Notification that a company's jobs changed
#[derive(Debug, Clone, Copy)]
pub struct JobChange {
    pub company_id: Uuid,
}

/// Broadcast bus for job change notifications
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<JobChange>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Notify subscribers that a company's jobs changed
    pub fn publish(&self, company_id: Uuid) {
        // Send only fails when nobody is subscribed
        let _ = self.tx.send(JobChange { company_id });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobChange> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Watch one company's job list
///
/// Sends the current list immediately, then a fresh snapshot after every
/// published change for that company. The background task stops once the
/// last receiver is dropped.
pub async fn watch_company(
    pool: PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
) -> Result<watch::Receiver<Vec<Job>>, sqlx::Error> {
    let initial = job_repository::list_for_company(&pool, company_id).await?;
    let (tx, rx) = watch::channel(initial);
    let mut changes = feed.subscribe();

    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) if change.company_id != company_id => continue,
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    match job_repository::list_for_company(&pool, company_id).await {
                        Ok(jobs) => {
                            if tx.send(jobs).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            tracing::warn!(
                                "Live feed query failed for company {}: {}",
                                company_id,
                                err
                            );
                        }
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    Ok(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();
        let company_id = Uuid::new_v4();

        feed.publish(company_id);

        let change = rx.recv().await.unwrap();
        assert_eq!(change.company_id, company_id);
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let feed = ChangeFeed::new();

        feed.publish(Uuid::new_v4());
    }
}
