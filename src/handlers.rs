// region:    --- Imports
use crate::announcement::{Announcement, AnnouncementBoard, NewAnnouncement};
use crate::auction::{AuctionStatus, ModerationAction, StatusEngine, Transition};
use crate::clock::Clock;
use crate::error::AdminError;
use crate::gateway::{Gateway, ListingQuery};
use crate::notification::NotificationDispatcher;
use crate::profile::UserSummary;
use crate::report::{
    species_report, weekly_report, DashboardMetrics, SpeciesReportRow, WeeklyReport,
};
use crate::scheduler::{AuctionSweeper, SweepSummary};
use crate::view::export::EXPORT_FILENAME;
use crate::view::{
    PendingAction, StatusTab, TransactionPage, TransactionParams, TransactionRequest,
    TransactionView,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- App State
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
    pub clock: Arc<dyn Clock>,
    pub engine: Arc<StatusEngine>,
    pub sweeper: Arc<AuctionSweeper>,
    pub announcements: Arc<AnnouncementBoard>,
    pub view: Arc<Mutex<TransactionView>>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, clock: Arc<dyn Clock>, page_size: usize) -> Self {
        let dispatcher = NotificationDispatcher::new(Arc::clone(&gateway), Arc::clone(&clock));
        let engine = Arc::new(StatusEngine::new(Arc::clone(&gateway), dispatcher));
        let sweeper = Arc::new(AuctionSweeper::new(Arc::clone(&gateway), Arc::clone(&clock)));
        let announcements = Arc::new(AnnouncementBoard::new(
            Arc::clone(&gateway),
            Arc::clone(&clock),
        ));
        Self {
            gateway,
            clock,
            engine,
            sweeper,
            announcements,
            view: Arc::new(Mutex::new(TransactionView::new(page_size))),
        }
    }

    /// 변경 구독을 화면 사본에 반영
    pub fn spawn_view_sync(&self) -> JoinHandle<()> {
        let mut changes = self.gateway.subscribe();
        let gateway = Arc::clone(&self.gateway);
        let view = Arc::clone(&self.view);
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(event) => view.lock().await.apply_change(event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            "{:<12} --> 변경 이벤트 {}건 누락, 목록 다시 조회",
                            "View", skipped
                        );
                        let mut view = view.lock().await;
                        let tab = view.active_tab();
                        if let Err(e) = view.reload(gateway.as_ref(), tab).await {
                            warn!("{:<12} --> 목록 다시 조회 실패: {}", "View", e);
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
// endregion: --- App State

// region:    --- Router
pub fn routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/transactions", get(handle_list_transactions))
        .route("/transactions/export", get(handle_export_transactions))
        .route("/transactions/:id/approve", post(handle_request_approve))
        .route("/transactions/:id/disapprove", post(handle_request_disapprove))
        .route("/confirmation/confirm", post(handle_confirm))
        .route("/confirmation/cancel", post(handle_cancel))
        .route("/sweep", post(handle_sweep))
        .route("/reports/species", get(handle_species_report))
        .route("/reports/weekly", get(handle_weekly_report))
        .route("/dashboard", get(handle_dashboard))
        .route(
            "/announcements",
            get(handle_list_announcements).post(handle_post_announcement),
        )
        .route("/users", get(handle_list_users))
        .layer(cors)
        .with_state(state)
}
// endregion: --- Router

// region:    --- Transaction Handlers

/// 탭이 바뀌었으면 다시 조회
async fn ensure_tab(
    state: &AppState,
    view: &mut TransactionView,
    tab: Option<StatusTab>,
) -> Result<(), AdminError> {
    if view.active_tab() != tab || view.listings().is_empty() {
        view.reload(state.gateway.as_ref(), tab).await?;
    }
    Ok(())
}

/// 거래 목록 조회
pub async fn handle_list_transactions(
    State(state): State<AppState>,
    Query(params): Query<TransactionParams>,
) -> Result<Json<TransactionPage>, AdminError> {
    info!("{:<12} --> 거래 목록 조회: {:?}", "Handler", params);
    let request = TransactionRequest::try_from(params)?;
    let mut view = state.view.lock().await;
    ensure_tab(&state, &mut view, request.filter.tab).await?;
    Ok(Json(view.page(&request)?))
}

/// 거래 목록 CSV 내보내기
pub async fn handle_export_transactions(
    State(state): State<AppState>,
    Query(params): Query<TransactionParams>,
) -> Result<impl IntoResponse, AdminError> {
    info!("{:<12} --> 거래 목록 내보내기: {:?}", "Handler", params);
    let request = TransactionRequest::try_from(params)?;
    let mut view = state.view.lock().await;
    ensure_tab(&state, &mut view, request.filter.tab).await?;
    let csv = view.export(&request)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    ))
}

async fn request_action(
    state: &AppState,
    listing_id: &str,
    action: ModerationAction,
) -> Result<Json<PendingAction>, AdminError> {
    info!(
        "{:<12} --> 확인 대기 등록: {} id={}",
        "Handler", action, listing_id
    );
    let mut view = state.view.lock().await;
    Ok(Json(view.gate_mut().request(listing_id, action)?))
}

/// 승인 확인 요청
pub async fn handle_request_approve(
    State(state): State<AppState>,
    Path(listing_id): Path<String>,
) -> Result<Json<PendingAction>, AdminError> {
    request_action(&state, &listing_id, ModerationAction::Approve).await
}

/// 반려 확인 요청
pub async fn handle_request_disapprove(
    State(state): State<AppState>,
    Path(listing_id): Path<String>,
) -> Result<Json<PendingAction>, AdminError> {
    request_action(&state, &listing_id, ModerationAction::Disapprove).await
}

/// 확인: 대기 동작 실행
pub async fn handle_confirm(
    State(state): State<AppState>,
) -> Result<Json<Transition>, AdminError> {
    let pending = state.view.lock().await.gate_mut().confirm()?;
    info!(
        "{:<12} --> 확인됨: {} id={}",
        "Handler", pending.action, pending.target_id
    );

    // 엔진 호출 동안에는 화면 잠금을 잡지 않는다
    let result = state.engine.apply(&pending.target_id, pending.action).await;

    let mut view = state.view.lock().await;
    view.gate_mut().complete(&pending.target_id);
    let transition = result?;
    view.record_transition(&transition);
    Ok(Json(transition))
}

/// 취소: 대기 동작 폐기
pub async fn handle_cancel(State(state): State<AppState>) -> impl IntoResponse {
    let cancelled = state.view.lock().await.gate_mut().cancel();
    info!("{:<12} --> 확인 취소: {:?}", "Handler", cancelled);
    Json(serde_json::json!({ "cancelled": cancelled }))
}

// endregion: --- Transaction Handlers

// region:    --- Maintenance / Report Handlers

/// 만료 처리 + 정리 즉시 실행
pub async fn handle_sweep(State(state): State<AppState>) -> Json<SweepSummary> {
    info!("{:<12} --> 정리 작업 수동 실행", "Handler");
    let summary = state.sweeper.run_once().await;
    summary.log();
    Json(summary)
}

/// 종류별 거래 보고서
pub async fn handle_species_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpeciesReportRow>>, AdminError> {
    info!("{:<12} --> 종류별 보고서 조회", "Handler");
    let listings = state.gateway.select_listings(&ListingQuery::all()).await?;
    Ok(Json(species_report(&listings)))
}

/// 주간 판매 보고서
pub async fn handle_weekly_report(
    State(state): State<AppState>,
) -> Result<Json<WeeklyReport>, AdminError> {
    info!("{:<12} --> 주간 보고서 조회", "Handler");
    let listings = state
        .gateway
        .select_listings(&ListingQuery::with_statuses(&[AuctionStatus::Sold]))
        .await?;
    Ok(Json(weekly_report(&listings)))
}

/// 대시보드 지표
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardMetrics>, AdminError> {
    info!("{:<12} --> 대시보드 조회", "Handler");
    let listings = state.gateway.select_listings(&ListingQuery::all()).await?;
    Ok(Json(DashboardMetrics::compute(&listings, state.clock.now())))
}

// endregion: --- Maintenance / Report Handlers

// region:    --- Announcement / User Handlers

/// 공지 목록 (최신순)
pub async fn handle_list_announcements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, AdminError> {
    info!("{:<12} --> 공지 목록 조회", "Handler");
    Ok(Json(state.announcements.list().await?))
}

/// 공지 등록
pub async fn handle_post_announcement(
    State(state): State<AppState>,
    payload: Result<Json<NewAnnouncement>, JsonRejection>,
) -> Result<(StatusCode, Json<Announcement>), AdminError> {
    info!("{:<12} --> 공지 등록 요청", "Handler");
    let Json(announcement) = payload.map_err(|e| AdminError::Validation(e.body_text()))?;
    let saved = state.announcements.post(announcement).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// 사용자 목록
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, AdminError> {
    info!("{:<12} --> 사용자 목록 조회", "Handler");
    Ok(Json(state.gateway.select_users().await?))
}

// endregion: --- Announcement / User Handlers
