/// 메모리 게이트웨이
/// Postgres 게이트웨이와 같은 조건부 갱신 의미를 가지며,
/// 테스트와 GATEWAY_BACKEND=memory 실행에 사용한다.
// region:    --- Imports
use super::{ChangeEvent, Gateway, ListingQuery, CHANGE_CHANNEL_CAPACITY};
use crate::announcement::{Announcement, NewAnnouncement};
use crate::auction::{AuctionStatus, Bid, Listing};
use crate::error::{AdminError, GatewayError};
use crate::notification::model::{NewNotification, Notification, NotificationRecipient};
use crate::profile::{Profile, UserSummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tokio::sync::{broadcast, RwLock};

// endregion: --- Imports

// region:    --- Failure Plan
/// 장애 주입 설정
#[derive(Debug, Clone, Default)]
pub struct FailurePlan {
    pub select_listings: bool,
    pub status_updates: HashSet<String>,
    /// 조건부 갱신 직전에 다른 작업이 먼저 상태를 바꾼 것처럼 처리
    /// (매물 id -> 그 작업이 쓴 상태)
    pub lost_updates: HashMap<String, AuctionStatus>,
    pub bid_lookups: HashSet<String>,
    pub deletes: HashSet<String>,
    pub recipient_lookup: bool,
    pub notification_insert: bool,
    pub recipient_insert: bool,
    pub announcement_select: bool,
    pub announcement_insert: bool,
}

fn injected(what: &str) -> GatewayError {
    GatewayError::Unavailable(format!("injected failure: {what}"))
}
// endregion: --- Failure Plan

// region:    --- Memory Gateway
#[derive(Default)]
struct Tables {
    listings: Vec<Listing>,
    bids: Vec<Bid>,
    profiles: Vec<Profile>,
    notifications: Vec<Notification>,
    recipients: Vec<NotificationRecipient>,
    announcements: Vec<Announcement>,
    next_notification_id: i64,
    next_announcement_id: i64,
    failures: FailurePlan,
}

pub struct MemoryGateway {
    tables: RwLock<Tables>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            tables: RwLock::new(Tables::default()),
            changes,
        }
    }

    /// 쓰기 잠금을 잡은 채로 호출해 매물별 이벤트 순서를 유지한다
    fn publish(&self, event: ChangeEvent) {
        // 구독자가 없으면 버린다
        let _ = self.changes.send(event);
    }

    /// 판매자 등록 매물 추가 (외부 경로)
    pub async fn insert_listing(&self, listing: Listing) -> Result<(), AdminError> {
        listing.check_invariants()?;
        let mut tables = self.tables.write().await;
        if tables.listings.iter().any(|l| l.id == listing.id) {
            return Err(AdminError::Validation(format!(
                "listing {} already exists",
                listing.id
            )));
        }
        tables.listings.push(listing.clone());
        self.publish(ChangeEvent::Inserted { listing });
        Ok(())
    }

    /// 외부에서 매물이 갱신된 경우 (예: 낙찰 처리)
    pub async fn replace_listing(&self, listing: Listing) -> Result<(), AdminError> {
        listing.check_invariants()?;
        let mut tables = self.tables.write().await;
        let slot = tables
            .listings
            .iter_mut()
            .find(|l| l.id == listing.id)
            .ok_or_else(|| AdminError::NotFound(format!("listing {}", listing.id)))?;
        *slot = listing.clone();
        self.publish(ChangeEvent::Updated { listing });
        Ok(())
    }

    pub async fn add_bid(&self, livestock_id: &str, bidder_id: &str) {
        self.tables.write().await.bids.push(Bid {
            livestock_id: livestock_id.to_string(),
            bidder_id: bidder_id.to_string(),
        });
    }

    pub async fn add_profile(&self, user_id: &str) {
        self.insert_profile(Profile::bare(user_id)).await;
    }

    pub async fn insert_profile(&self, profile: Profile) {
        self.tables.write().await.profiles.push(profile);
    }

    pub async fn set_failures(&self, plan: FailurePlan) {
        self.tables.write().await.failures = plan;
    }

    pub async fn listing(&self, id: &str) -> Option<Listing> {
        self.tables
            .read()
            .await
            .listings
            .iter()
            .find(|l| l.id == id)
            .cloned()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.tables.read().await.notifications.clone()
    }

    pub async fn recipients(&self) -> Vec<NotificationRecipient> {
        self.tables.read().await.recipients.clone()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn fetch_listing(&self, id: &str) -> Result<Option<Listing>, GatewayError> {
        Ok(self.listing(id).await)
    }

    async fn select_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, GatewayError> {
        let tables = self.tables.read().await;
        if tables.failures.select_listings {
            return Err(injected("select livestock"));
        }
        let mut rows: Vec<Listing> = tables
            .listings
            .iter()
            .filter(|l| query.matches(l))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.auction_start.cmp(&b.auction_start));
        Ok(rows)
    }

    async fn update_status(
        &self,
        id: &str,
        expected: AuctionStatus,
        next: AuctionStatus,
    ) -> Result<bool, GatewayError> {
        let mut tables = self.tables.write().await;
        if tables.failures.status_updates.contains(id) {
            return Err(injected(&format!("update livestock {id}")));
        }
        let competing = tables.failures.lost_updates.get(id).copied();
        let Some(listing) = tables
            .listings
            .iter_mut()
            .find(|l| l.id == id && l.status == expected)
        else {
            return Ok(false);
        };
        listing.status = competing.unwrap_or(next);
        let updated = listing.clone();
        self.publish(ChangeEvent::Updated { listing: updated });
        // 경합 재현: 변경은 다른 작업의 것이므로 이 호출은 실패로 본다
        Ok(competing.is_none())
    }

    async fn delete_listing(
        &self,
        id: &str,
        expected: AuctionStatus,
    ) -> Result<bool, GatewayError> {
        let mut tables = self.tables.write().await;
        if tables.failures.deletes.contains(id) {
            return Err(injected(&format!("delete livestock {id}")));
        }
        let before = tables.listings.len();
        tables
            .listings
            .retain(|l| !(l.id == id && l.status == expected));
        let removed = tables.listings.len() < before;
        if removed {
            self.publish(ChangeEvent::Deleted { id: id.to_string() });
        }
        Ok(removed)
    }

    async fn count_bids(&self, listing_id: &str) -> Result<u64, GatewayError> {
        let tables = self.tables.read().await;
        if tables.failures.bid_lookups.contains(listing_id) {
            return Err(injected(&format!("select bids for {listing_id}")));
        }
        Ok(tables
            .bids
            .iter()
            .filter(|b| b.livestock_id == listing_id)
            .count() as u64)
    }

    async fn recipients_except(&self, excluded: &str) -> Result<Vec<String>, GatewayError> {
        let tables = self.tables.read().await;
        if tables.failures.recipient_lookup {
            return Err(injected("select profiles"));
        }
        Ok(tables
            .profiles
            .iter()
            .filter(|p| p.id != excluded)
            .map(|p| p.id.clone())
            .collect())
    }

    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, GatewayError> {
        let mut tables = self.tables.write().await;
        if tables.failures.notification_insert {
            return Err(injected("insert notifications"));
        }
        tables.next_notification_id += 1;
        let row = Notification::from_new(tables.next_notification_id, notification);
        tables.notifications.push(row.clone());
        Ok(row)
    }

    async fn insert_recipients(
        &self,
        notification_id: i64,
        recipient_ids: &[String],
    ) -> Result<usize, GatewayError> {
        let mut tables = self.tables.write().await;
        if tables.failures.recipient_insert {
            return Err(injected("insert notification_bidders"));
        }
        tables
            .recipients
            .extend(recipient_ids.iter().map(|id| NotificationRecipient {
                notification_id,
                recipient_id: id.clone(),
                is_read: false,
            }));
        Ok(recipient_ids.len())
    }

    async fn select_announcements(&self) -> Result<Vec<Announcement>, GatewayError> {
        let tables = self.tables.read().await;
        if tables.failures.announcement_select {
            return Err(injected("select announcements"));
        }
        let mut rows = tables.announcements.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn insert_announcement(
        &self,
        announcement: NewAnnouncement,
        created_at: DateTime<Utc>,
    ) -> Result<Announcement, GatewayError> {
        let mut tables = self.tables.write().await;
        if tables.failures.announcement_insert {
            return Err(injected("insert announcements"));
        }
        tables.next_announcement_id += 1;
        let row = Announcement {
            id: tables.next_announcement_id,
            title: announcement.title,
            content: announcement.content,
            created_at,
        };
        tables.announcements.push(row.clone());
        Ok(row)
    }

    async fn select_users(&self) -> Result<Vec<UserSummary>, GatewayError> {
        let tables = self.tables.read().await;
        let mut users: Vec<UserSummary> = tables
            .profiles
            .iter()
            .map(|profile| UserSummary {
                is_bidder: tables.bids.iter().any(|b| b.bidder_id == profile.id),
                is_seller: tables.listings.iter().any(|l| l.owner_id == profile.id),
                profile: profile.clone(),
            })
            .collect();
        users.sort_by(|a, b| a.profile.id.cmp(&b.profile.id));
        Ok(users)
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }
}
// endregion: --- Memory Gateway
