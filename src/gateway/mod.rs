/// 백엔드 데이터 게이트웨이
/// 원격 저장소의 livestock, bids, notifications, notification_bidders, profiles,
/// announcements 컬렉션에 대한 조회, 변경, 변경 구독을 추상화한다.
// region:    --- Imports
use crate::announcement::{Announcement, NewAnnouncement};
use crate::auction::{AuctionStatus, Listing};
use crate::error::GatewayError;
use crate::notification::model::{NewNotification, Notification};
use crate::profile::UserSummary;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// endregion: --- Imports

// region:    --- Modules
pub mod memory;
pub mod postgres;
pub mod queries;

pub use memory::{FailurePlan, MemoryGateway};
pub use postgres::PostgresGateway;

// endregion: --- Modules

/// 변경 구독 채널 버퍼 크기
pub const CHANGE_CHANNEL_CAPACITY: usize = 256;

// region:    --- Change Event
/// livestock 컬렉션 행 변경 이벤트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeEvent {
    Inserted { listing: Listing },
    Updated { listing: Listing },
    Deleted { id: String },
}

impl ChangeEvent {
    pub fn listing_id(&self) -> &str {
        match self {
            ChangeEvent::Inserted { listing } | ChangeEvent::Updated { listing } => &listing.id,
            ChangeEvent::Deleted { id } => id,
        }
    }
}
// endregion: --- Change Event

// region:    --- Listing Query
/// 매물 조회 조건
/// 비어 있는 statuses 는 전체 상태를 뜻한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub statuses: Vec<AuctionStatus>,
    pub ended_before: Option<DateTime<Utc>>,
}

impl ListingQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_statuses(statuses: &[AuctionStatus]) -> Self {
        Self {
            statuses: statuses.to_vec(),
            ended_before: None,
        }
    }

    pub fn ended_before(mut self, at: DateTime<Utc>) -> Self {
        self.ended_before = Some(at);
        self
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        let status_ok = self.statuses.is_empty() || self.statuses.contains(&listing.status);
        let end_ok = self
            .ended_before
            .map_or(true, |at| listing.auction_end < at);
        status_ok && end_ok
    }
}
// endregion: --- Listing Query

// region:    --- Gateway Trait
#[async_trait]
pub trait Gateway: Send + Sync {
    /// 매물 단건 조회
    async fn fetch_listing(&self, id: &str) -> Result<Option<Listing>, GatewayError>;

    /// 매물 목록 조회 (auction_start 오름차순)
    async fn select_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, GatewayError>;

    /// 상태가 `expected` 일 때만 `next` 로 변경, 적용 여부 반환
    async fn update_status(
        &self,
        id: &str,
        expected: AuctionStatus,
        next: AuctionStatus,
    ) -> Result<bool, GatewayError>;

    /// 상태가 `expected` 일 때만 삭제, 적용 여부 반환
    async fn delete_listing(&self, id: &str, expected: AuctionStatus)
        -> Result<bool, GatewayError>;

    /// 매물에 달린 입찰 수
    async fn count_bids(&self, listing_id: &str) -> Result<u64, GatewayError>;

    /// `excluded` 를 제외한 알림 수신자 전체
    async fn recipients_except(&self, excluded: &str) -> Result<Vec<String>, GatewayError>;

    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, GatewayError>;

    /// 팬아웃 행 일괄 추가
    async fn insert_recipients(
        &self,
        notification_id: i64,
        recipient_ids: &[String],
    ) -> Result<usize, GatewayError>;

    /// 공지 목록 (created_at 내림차순)
    async fn select_announcements(&self) -> Result<Vec<Announcement>, GatewayError>;

    async fn insert_announcement(
        &self,
        announcement: NewAnnouncement,
        created_at: DateTime<Utc>,
    ) -> Result<Announcement, GatewayError>;

    /// 사용자 목록 (id 오름차순, 판매자/입찰자 여부 포함)
    async fn select_users(&self) -> Result<Vec<UserSummary>, GatewayError>;

    /// livestock 변경 구독
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}
// endregion: --- Gateway Trait
