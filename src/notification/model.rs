use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    NewAuction,
    AuctionApproved,
    AuctionDisapproved,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::NewAuction => "NEW_AUCTION",
            NotificationType::AuctionApproved => "AUCTION_APPROVED",
            NotificationType::AuctionDisapproved => "AUCTION_DISAPPROVED",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW_AUCTION" => Ok(NotificationType::NewAuction),
            "AUCTION_APPROVED" => Ok(NotificationType::AuctionApproved),
            "AUCTION_DISAPPROVED" => Ok(NotificationType::AuctionDisapproved),
            other => Err(format!("unknown notification type: {other}")),
        }
    }
}

/// 저장 전 알림
/// seller_id 가 None 이면 전체 공지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub livestock_id: String,
    pub seller_id: Option<String>,
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: DateTime<Utc>,
}

/// notifications 테이블 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub livestock_id: String,
    pub seller_id: Option<String>,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_new(id: i64, new: NewNotification) -> Self {
        Self {
            id,
            livestock_id: new.livestock_id,
            seller_id: new.seller_id,
            message: new.message,
            notification_type: new.notification_type,
            is_read: false,
            created_at: new.created_at,
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.seller_id.is_none()
    }
}

/// notification_bidders 테이블 행 (팬아웃)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecipient {
    pub notification_id: i64,
    pub recipient_id: String,
    pub is_read: bool,
}
