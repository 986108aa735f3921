/// 심사 알림 발송
/// 1. 신규 경매 공지 (판매자 제외 전체 팬아웃)
/// 2. 판매자 직접 알림
/// 알림은 추가만 하며, 수정하거나 삭제하지 않는다.
// region:    --- Imports
use crate::auction::Category;
use crate::clock::Clock;
use crate::error::{AdminError, BatchReport};
use crate::gateway::Gateway;
use model::{NewNotification, Notification, NotificationType};
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

pub mod model;

// region:    --- Messages
pub fn new_auction_message(category: Category) -> String {
    format!("A new {category} auction is now open for bidding.")
}

pub fn approved_message(category: Category) -> String {
    format!("Your {category} listing has been approved and is now open for bidding.")
}

pub fn disapproved_message(category: Category) -> String {
    format!("Your {category} listing was not approved.")
}
// endregion: --- Messages

// region:    --- Fan Out
/// 신규 경매 공지 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOut {
    /// 수신자가 없으면 None
    pub notification: Option<Notification>,
    pub recipients: usize,
}
// endregion: --- Fan Out

// region:    --- Dispatcher
pub struct NotificationDispatcher {
    gateway: Arc<dyn Gateway>,
    clock: Arc<dyn Clock>,
}

impl NotificationDispatcher {
    pub fn new(gateway: Arc<dyn Gateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }

    /// 신규 경매 공지
    /// 알림 행 생성 후 수신자 행 추가가 실패하면 알림 행은 남겨 두고
    /// PartialFailure 로 보고한다.
    pub async fn notify_new_auction(
        &self,
        listing_id: &str,
        category: Category,
        seller_id: &str,
    ) -> Result<FanOut, AdminError> {
        let recipients = self.gateway.recipients_except(seller_id).await?;
        if recipients.is_empty() {
            info!(
                "{:<12} --> 신규 경매 공지 수신자 없음 id={}",
                "Notify", listing_id
            );
            return Ok(FanOut {
                notification: None,
                recipients: 0,
            });
        }

        let notification = self
            .gateway
            .insert_notification(NewNotification {
                livestock_id: listing_id.to_string(),
                seller_id: None,
                message: new_auction_message(category),
                notification_type: NotificationType::NewAuction,
                created_at: self.clock.now(),
            })
            .await?;

        match self
            .gateway
            .insert_recipients(notification.id, &recipients)
            .await
        {
            Ok(inserted) => {
                info!(
                    "{:<12} --> 신규 경매 공지 id={}, 수신자 {}명",
                    "Notify", listing_id, inserted
                );
                Ok(FanOut {
                    notification: Some(notification),
                    recipients: inserted,
                })
            }
            Err(e) => {
                warn!(
                    "{:<12} --> 수신자 추가 실패, 알림 {} 은 남음: {}",
                    "Notify", notification.id, e
                );
                let mut report = BatchReport::new("notification fan-out");
                report.succeeded.push(format!("notification:{}", notification.id));
                for recipient in &recipients {
                    report.record_failure(recipient.clone(), &e);
                }
                Err(AdminError::PartialFailure(report))
            }
        }
    }

    /// 판매자 직접 알림
    pub async fn notify_seller(
        &self,
        listing_id: &str,
        seller_id: &str,
        notification_type: NotificationType,
        message: String,
    ) -> Result<Notification, AdminError> {
        let notification = self
            .gateway
            .insert_notification(NewNotification {
                livestock_id: listing_id.to_string(),
                seller_id: Some(seller_id.to_string()),
                message,
                notification_type,
                created_at: self.clock.now(),
            })
            .await?;
        info!(
            "{:<12} --> 판매자 알림 {} id={}, seller={}",
            "Notify", notification_type, listing_id, seller_id
        );
        Ok(notification)
    }
}
// endregion: --- Dispatcher
