/// 관리자 공지
/// 최신순 조회와 새 공지 등록. 등록 실패는 호출자에게 그대로 전달한다.
// region:    --- Imports
use crate::clock::Clock;
use crate::error::AdminError;
use crate::gateway::Gateway;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

/// 제목 최대 길이 (문자 수)
pub const MAX_TITLE_CHARS: usize = 200;

// region:    --- Model
/// announcements 테이블 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// 등록 요청
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
}

impl NewAnnouncement {
    /// 앞뒤 공백 제거 후 검증
    pub fn normalized(self) -> Result<Self, AdminError> {
        let title = self.title.trim().to_string();
        let content = self.content.trim().to_string();
        if title.is_empty() {
            return Err(AdminError::Validation(
                "announcement title must not be empty".to_string(),
            ));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AdminError::Validation(format!(
                "announcement title is longer than {MAX_TITLE_CHARS} characters"
            )));
        }
        if content.is_empty() {
            return Err(AdminError::Validation(
                "announcement content must not be empty".to_string(),
            ));
        }
        Ok(Self { title, content })
    }
}
// endregion: --- Model

// region:    --- Announcement Board
pub struct AnnouncementBoard {
    gateway: Arc<dyn Gateway>,
    clock: Arc<dyn Clock>,
}

impl AnnouncementBoard {
    pub fn new(gateway: Arc<dyn Gateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }

    /// 최신순 공지 목록
    pub async fn list(&self) -> Result<Vec<Announcement>, AdminError> {
        Ok(self.gateway.select_announcements().await?)
    }

    pub async fn post(&self, announcement: NewAnnouncement) -> Result<Announcement, AdminError> {
        let announcement = announcement.normalized()?;
        let saved = self
            .gateway
            .insert_announcement(announcement, self.clock.now())
            .await?;
        info!("{:<12} --> 공지 등록 id={}", "Announce", saved.id);
        Ok(saved)
    }
}
// endregion: --- Announcement Board
