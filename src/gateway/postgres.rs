/// Postgres 게이트웨이
/// 매물 쓰기가 성공하면 변경 이벤트를 Kafka 로 발행한다.
/// Kafka 가 없으면 로컬 구독 채널로 바로 전달한다.
// region:    --- Imports
use super::{queries, ChangeEvent, Gateway, ListingQuery, CHANGE_CHANNEL_CAPACITY};
use crate::announcement::{Announcement, NewAnnouncement};
use crate::auction::model::ListingRow;
use crate::auction::{AuctionStatus, Listing};
use crate::error::GatewayError;
use crate::message_broker::KafkaProducer;
use crate::notification::model::{NewNotification, Notification};
use crate::profile::UserSummary;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

// endregion: --- Imports

pub struct PostgresGateway {
    pool: Arc<PgPool>,
    producer: Option<Arc<KafkaProducer>>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl PostgresGateway {
    pub fn new(pool: Arc<PgPool>, producer: Option<Arc<KafkaProducer>>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            pool,
            producer,
            changes,
        }
    }

    /// Kafka 컨슈머가 이벤트를 밀어 넣을 송신측
    pub fn change_sink(&self) -> broadcast::Sender<ChangeEvent> {
        self.changes.clone()
    }

    /// 쓰기는 이미 커밋되었으므로 발행 실패는 기록만 한다
    async fn publish(&self, event: ChangeEvent) {
        match &self.producer {
            Some(producer) => {
                if let Err(e) = producer.publish_change(&event).await {
                    error!(
                        "{:<12} --> 변경 이벤트 발행 실패 id={}: {}",
                        "Gateway",
                        event.listing_id(),
                        e
                    );
                }
            }
            None => {
                let _ = self.changes.send(event);
            }
        }
    }
}

#[async_trait]
impl Gateway for PostgresGateway {
    async fn fetch_listing(&self, id: &str) -> Result<Option<Listing>, GatewayError> {
        let row = sqlx::query_as::<_, ListingRow>(queries::GET_LISTING)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(Listing::try_from).transpose()
    }

    async fn select_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, GatewayError> {
        let statuses: Vec<String> = query
            .statuses
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        let rows = sqlx::query_as::<_, ListingRow>(queries::SELECT_LISTINGS)
            .bind(statuses)
            .bind(query.ended_before)
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(Listing::try_from).collect()
    }

    async fn update_status(
        &self,
        id: &str,
        expected: AuctionStatus,
        next: AuctionStatus,
    ) -> Result<bool, GatewayError> {
        let row = sqlx::query_as::<_, ListingRow>(queries::UPDATE_STATUS)
            .bind(id)
            .bind(expected.as_str())
            .bind(next.as_str())
            .fetch_optional(&*self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(false);
        };
        let listing = Listing::try_from(row)?;
        info!(
            "{:<12} --> 상태 변경 id={}: {} -> {}",
            "Gateway", id, expected, next
        );
        self.publish(ChangeEvent::Updated { listing }).await;
        Ok(true)
    }

    async fn delete_listing(
        &self,
        id: &str,
        expected: AuctionStatus,
    ) -> Result<bool, GatewayError> {
        let result = sqlx::query(queries::DELETE_LISTING)
            .bind(id)
            .bind(expected.as_str())
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }
        info!("{:<12} --> 매물 삭제 id={}", "Gateway", id);
        self.publish(ChangeEvent::Deleted { id: id.to_string() })
            .await;
        Ok(true)
    }

    async fn count_bids(&self, listing_id: &str) -> Result<u64, GatewayError> {
        let count: i64 = sqlx::query_scalar(queries::COUNT_BIDS)
            .bind(listing_id)
            .fetch_one(&*self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn recipients_except(&self, excluded: &str) -> Result<Vec<String>, GatewayError> {
        let ids: Vec<String> = sqlx::query_scalar(queries::SELECT_RECIPIENTS)
            .bind(excluded)
            .fetch_all(&*self.pool)
            .await?;
        Ok(ids)
    }

    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, GatewayError> {
        let id: i64 = sqlx::query_scalar(queries::INSERT_NOTIFICATION)
            .bind(&notification.livestock_id)
            .bind(notification.seller_id.as_deref())
            .bind(&notification.message)
            .bind(notification.notification_type.as_str())
            .bind(notification.created_at)
            .fetch_one(&*self.pool)
            .await?;
        Ok(Notification::from_new(id, notification))
    }

    async fn insert_recipients(
        &self,
        notification_id: i64,
        recipient_ids: &[String],
    ) -> Result<usize, GatewayError> {
        let result = sqlx::query(queries::INSERT_RECIPIENTS)
            .bind(notification_id)
            .bind(recipient_ids)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() as usize)
    }

    async fn select_announcements(&self) -> Result<Vec<Announcement>, GatewayError> {
        let rows = sqlx::query_as::<_, Announcement>(queries::SELECT_ANNOUNCEMENTS)
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_announcement(
        &self,
        announcement: NewAnnouncement,
        created_at: DateTime<Utc>,
    ) -> Result<Announcement, GatewayError> {
        let row = sqlx::query_as::<_, Announcement>(queries::INSERT_ANNOUNCEMENT)
            .bind(&announcement.title)
            .bind(&announcement.content)
            .bind(created_at)
            .fetch_one(&*self.pool)
            .await?;
        Ok(row)
    }

    async fn select_users(&self) -> Result<Vec<UserSummary>, GatewayError> {
        let rows = sqlx::query_as::<_, UserSummary>(queries::SELECT_USERS)
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows)
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }
}
