/// 경매 상태 엔진
/// 1. 승인 (PENDING -> AVAILABLE, 신규 경매 공지 + 판매자 알림)
/// 2. 반려 (PENDING -> DISAPPROVED, 판매자 알림)
/// 호출 전에 확인 절차는 이미 끝났다고 가정한다.
// region:    --- Imports
use super::model::Listing;
use super::status::{AuctionStatus, ModerationAction};
use crate::error::AdminError;
use crate::gateway::Gateway;
use crate::notification::model::NotificationType;
use crate::notification::{approved_message, disapproved_message, NotificationDispatcher};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Transition
/// 심사 결과
/// applied 가 false 면 이미 목표 상태여서 아무 것도 하지 않은 경우
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub listing: Listing,
    pub applied: bool,
}
// endregion: --- Transition

// region:    --- Status Engine
pub struct StatusEngine {
    gateway: Arc<dyn Gateway>,
    dispatcher: NotificationDispatcher,
}

impl StatusEngine {
    pub fn new(gateway: Arc<dyn Gateway>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            gateway,
            dispatcher,
        }
    }

    pub async fn apply(
        &self,
        listing_id: &str,
        action: ModerationAction,
    ) -> Result<Transition, AdminError> {
        match action {
            ModerationAction::Approve => self.approve(listing_id).await,
            ModerationAction::Disapprove => self.disapprove(listing_id).await,
        }
    }

    /// 1. 승인
    pub async fn approve(&self, listing_id: &str) -> Result<Transition, AdminError> {
        info!("{:<12} --> 승인 요청 id={}", "Engine", listing_id);
        let transition = self
            .transition(listing_id, ModerationAction::Approve)
            .await?;
        if !transition.applied {
            return Ok(transition);
        }

        let listing = &transition.listing;
        let broadcast = self
            .dispatcher
            .notify_new_auction(&listing.id, listing.category, &listing.owner_id)
            .await;
        let seller = self
            .dispatcher
            .notify_seller(
                &listing.id,
                &listing.owner_id,
                NotificationType::AuctionApproved,
                approved_message(listing.category),
            )
            .await;

        // 상태는 이미 반영됨, 알림 실패만 호출자에게 전달
        broadcast?;
        seller?;
        Ok(transition)
    }

    /// 2. 반려
    pub async fn disapprove(&self, listing_id: &str) -> Result<Transition, AdminError> {
        info!("{:<12} --> 반려 요청 id={}", "Engine", listing_id);
        let transition = self
            .transition(listing_id, ModerationAction::Disapprove)
            .await?;
        if !transition.applied {
            return Ok(transition);
        }

        let listing = &transition.listing;
        self.dispatcher
            .notify_seller(
                &listing.id,
                &listing.owner_id,
                NotificationType::AuctionDisapproved,
                disapproved_message(listing.category),
            )
            .await?;
        Ok(transition)
    }

    /// PENDING 에서 목표 상태로 조건부 변경
    /// 이미 목표 상태면 no-op, 그 밖의 상태는 InvalidTransition
    async fn transition(
        &self,
        listing_id: &str,
        action: ModerationAction,
    ) -> Result<Transition, AdminError> {
        let target = action.target_status();
        let listing = self.load(listing_id).await?;

        match listing.status {
            AuctionStatus::Pending => {}
            status if status == target => {
                info!(
                    "{:<12} --> 이미 {} 상태, 건너뜀 id={}",
                    "Engine", target, listing_id
                );
                return Ok(Transition {
                    listing,
                    applied: false,
                });
            }
            from => {
                return Err(AdminError::InvalidTransition {
                    id: listing_id.to_string(),
                    from,
                    action,
                })
            }
        }

        let applied = self
            .gateway
            .update_status(listing_id, AuctionStatus::Pending, target)
            .await?;

        if applied {
            info!(
                "{:<12} --> 상태 변경 완료 id={}: PENDING -> {}",
                "Engine", listing_id, target
            );
            return Ok(Transition {
                listing: Listing {
                    status: target,
                    ..listing
                },
                applied: true,
            });
        }

        // 조회와 변경 사이에 다른 작업이 먼저 상태를 바꾼 경우
        let current = self.load(listing_id).await?;
        warn!(
            "{:<12} --> 경합 감지 id={}: 현재 상태 {}",
            "Engine", listing_id, current.status
        );
        if current.status == target {
            Ok(Transition {
                listing: current,
                applied: false,
            })
        } else {
            Err(AdminError::InvalidTransition {
                id: listing_id.to_string(),
                from: current.status,
                action,
            })
        }
    }

    async fn load(&self, listing_id: &str) -> Result<Listing, AdminError> {
        self.gateway
            .fetch_listing(listing_id)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("listing {listing_id}")))
    }
}
// endregion: --- Status Engine
