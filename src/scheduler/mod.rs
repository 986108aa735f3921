/// 경매 정리 스케줄러
/// 1. 만료 처리: AVAILABLE 이고 종료 시각이 지난 매물 -> AUCTION_ENDED (알림 없음)
/// 2. 정리: 입찰이 하나도 없는 AUCTION_ENDED 매물 삭제
/// 두 작업 모두 반복/동시 실행해도 안전하며, 한 매물의 실패가 나머지를 막지 않는다.
// region:    --- Imports
use crate::auction::AuctionStatus;
use crate::clock::Clock;
use crate::error::{AdminError, BatchReport};
use crate::gateway::{ChangeEvent, Gateway, ListingQuery};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant};
use tracing::{debug, error, info, warn};

// endregion: --- Imports

// region:    --- Sweep Outcome
/// 단일 매물 정리 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneOutcome {
    Removed,
    Retained,
    /// 이미 삭제되었거나 상태가 바뀐 경우
    Gone,
}

/// run_once 결과
#[derive(Debug, Serialize)]
pub struct SweepSummary {
    pub expire: Result<BatchReport, String>,
    pub prune: Result<BatchReport, String>,
}

impl SweepSummary {
    pub fn log(&self) {
        log_report(&self.expire);
        log_report(&self.prune);
    }
}

fn flatten(result: Result<BatchReport, AdminError>) -> Result<BatchReport, String> {
    match result {
        Ok(report) => Ok(report),
        Err(AdminError::PartialFailure(report)) => Ok(report),
        Err(e) => Err(e.to_string()),
    }
}
// endregion: --- Sweep Outcome

// region:    --- Auction Sweeper
pub struct AuctionSweeper {
    gateway: Arc<dyn Gateway>,
    clock: Arc<dyn Clock>,
}

impl AuctionSweeper {
    pub fn new(gateway: Arc<dyn Gateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }

    /// 1. 만료 처리
    pub async fn expire_pass(&self) -> Result<BatchReport, AdminError> {
        let now = self.clock.now();
        let candidates = self
            .gateway
            .select_listings(
                &ListingQuery::with_statuses(&[AuctionStatus::Available]).ended_before(now),
            )
            .await?;

        let mut report = BatchReport::new("expire");
        for listing in candidates {
            // 게이트웨이 조건과 별개로 종료 시각을 다시 확인
            if !listing.has_ended_before(now) {
                report.skipped.push(listing.id);
                continue;
            }
            match self
                .gateway
                .update_status(
                    &listing.id,
                    AuctionStatus::Available,
                    AuctionStatus::AuctionEnded,
                )
                .await
            {
                Ok(true) => {
                    info!("{:<12} --> 경매 종료 처리 id={}", "Scheduler", listing.id);
                    report.succeeded.push(listing.id);
                }
                Ok(false) => {
                    debug!(
                        "{:<12} --> 이미 상태가 바뀐 매물 id={}",
                        "Scheduler", listing.id
                    );
                    report.skipped.push(listing.id);
                }
                Err(e) => {
                    warn!(
                        "{:<12} --> 경매 종료 처리 실패 id={}: {}",
                        "Scheduler", listing.id, e
                    );
                    report.record_failure(listing.id, e);
                }
            }
        }
        report.into_result()
    }

    /// 2. 입찰 없는 종료 매물 정리
    pub async fn prune_pass(&self) -> Result<BatchReport, AdminError> {
        let ended = self
            .gateway
            .select_listings(&ListingQuery::with_statuses(&[AuctionStatus::AuctionEnded]))
            .await?;

        let mut report = BatchReport::new("prune");
        for listing in ended {
            match self.prune_listing(&listing.id).await {
                Ok(PruneOutcome::Removed) => report.succeeded.push(listing.id),
                Ok(PruneOutcome::Retained) | Ok(PruneOutcome::Gone) => {
                    report.skipped.push(listing.id)
                }
                Err(e) => {
                    warn!(
                        "{:<12} --> 매물 정리 실패 id={}, 다음 매물로 진행: {}",
                        "Scheduler", listing.id, e
                    );
                    report.record_failure(listing.id, e);
                }
            }
        }
        report.into_result()
    }

    /// 단일 AUCTION_ENDED 매물 정리
    pub async fn prune_listing(&self, listing_id: &str) -> Result<PruneOutcome, AdminError> {
        let bids = self.gateway.count_bids(listing_id).await?;
        if bids > 0 {
            debug!(
                "{:<12} --> 입찰 {}건 있음, 유지 id={}",
                "Scheduler", bids, listing_id
            );
            return Ok(PruneOutcome::Retained);
        }

        let removed = self
            .gateway
            .delete_listing(listing_id, AuctionStatus::AuctionEnded)
            .await?;
        if removed {
            info!("{:<12} --> 입찰 없는 매물 삭제 id={}", "Scheduler", listing_id);
            Ok(PruneOutcome::Removed)
        } else {
            Ok(PruneOutcome::Gone)
        }
    }

    /// 만료 처리 후 정리
    pub async fn run_once(&self) -> SweepSummary {
        let expire = flatten(self.expire_pass().await);
        let prune = flatten(self.prune_pass().await);
        SweepSummary { expire, prune }
    }

    /// 주기 실행 시작
    /// 첫 실행은 한 주기 뒤 (시작 시 정리는 호출자가 run_once 로 한다)
    pub fn start(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let sweeper = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                sweeper.run_once().await.log();
            }
        })
    }

    /// 변경 구독: AUCTION_ENDED 로 바뀐 매물은 즉시 정리 시도
    pub fn watch_changes(self: &Arc<Self>) -> JoinHandle<()> {
        let sweeper = Arc::clone(self);
        let mut changes = self.gateway.subscribe();
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(ChangeEvent::Updated { listing })
                        if listing.status == AuctionStatus::AuctionEnded =>
                    {
                        if let Err(e) = sweeper.prune_listing(&listing.id).await {
                            warn!(
                                "{:<12} --> 변경 이벤트 정리 실패 id={}: {}",
                                "Scheduler", listing.id, e
                            );
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        // 놓친 이벤트는 전체 정리로 보정
                        warn!(
                            "{:<12} --> 변경 이벤트 {}건 누락, 전체 정리 실행",
                            "Scheduler", skipped
                        );
                        log_report(&flatten(sweeper.prune_pass().await));
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

fn log_report(result: &Result<BatchReport, String>) {
    match result {
        Ok(report) if report.is_clean() => debug!(
            "{:<12} --> {} 완료: 처리 {}건",
            "Scheduler",
            report.operation,
            report.succeeded.len()
        ),
        Ok(report) => warn!(
            "{:<12} --> {} 부분 실패: 처리 {}건, 실패 {}건",
            "Scheduler",
            report.operation,
            report.succeeded.len(),
            report.failed.len()
        ),
        Err(e) => error!("{:<12} --> 정리 작업 중단: {}", "Scheduler", e),
    }
}
// endregion: --- Auction Sweeper
