/// 관리자 패널 에러 분류
/// 단건 작업(승인/반려/판매자 알림)은 호출자에게 그대로 전달하고,
/// 다건 작업(스윕/팬아웃)은 항목별 실패를 모아 PartialFailure 로 보고한다.
// region:    --- Imports
use crate::auction::status::{AuctionStatus, ModerationAction};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Gateway Error
/// 백엔드 게이트웨이 호출 실패
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("message broker error: {0}")]
    Broker(String),

    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    #[error("malformed row: {0}")]
    Decode(String),
}
// endregion: --- Gateway Error

// region:    --- Batch Report
/// 다건 작업에서 실패한 단일 항목
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ItemFailure {
    pub id: String,
    pub reason: String,
}

/// 다건 작업 결과 보고서
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BatchReport {
    pub operation: String,
    pub succeeded: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<ItemFailure>,
}

impl BatchReport {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Self::default()
        }
    }

    pub fn record_failure(&mut self, id: impl Into<String>, reason: impl ToString) {
        self.failed.push(ItemFailure {
            id: id.into(),
            reason: reason.to_string(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// 실패 항목이 하나라도 있으면 PartialFailure 로 변환
    pub fn into_result(self) -> Result<BatchReport, AdminError> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(AdminError::PartialFailure(self))
        }
    }
}
// endregion: --- Batch Report

// region:    --- Admin Error
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("persistence error: {0}")]
    Persistence(#[from] GatewayError),

    #[error("{}", summarize(.0))]
    PartialFailure(BatchReport),

    #[error("cannot {action} listing {id} in status {from}")]
    InvalidTransition {
        id: String,
        from: AuctionStatus,
        action: ModerationAction,
    },

    #[error("an action for listing {0} is still in flight")]
    ActionInFlight(String),

    #[error("no action is awaiting confirmation")]
    NoPendingConfirmation,
}

fn summarize(report: &BatchReport) -> String {
    let total = report.failed.len() + report.succeeded.len() + report.skipped.len();
    format!(
        "{} failed for {} of {} items",
        report.operation,
        report.failed.len(),
        total
    )
}

impl AdminError {
    /// 응답 본문에 실리는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AdminError::NotFound(_) => "NOT_FOUND",
            AdminError::Validation(_) => "VALIDATION_ERROR",
            AdminError::Persistence(_) => "PERSISTENCE_ERROR",
            AdminError::PartialFailure(_) => "PARTIAL_FAILURE",
            AdminError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AdminError::ActionInFlight(_) => "ACTION_IN_FLIGHT",
            AdminError::NoPendingConfirmation => "NO_PENDING_CONFIRMATION",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AdminError::NotFound(_) => StatusCode::NOT_FOUND,
            AdminError::Validation(_) => StatusCode::BAD_REQUEST,
            AdminError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AdminError::PartialFailure(_) => StatusCode::MULTI_STATUS,
            AdminError::InvalidTransition { .. }
            | AdminError::ActionInFlight(_)
            | AdminError::NoPendingConfirmation => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        if let AdminError::PartialFailure(report) = &self {
            body["report"] = serde_json::to_value(report).unwrap_or_default();
        }
        (status, Json(body)).into_response()
    }
}
// endregion: --- Admin Error
