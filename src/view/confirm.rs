/// 상태 변경 확인 절차
/// 요청 -> (확인 | 취소). 확인된 동작만 엔진으로 넘어가고,
/// 엔진 호출이 끝날 때까지 같은 매물에 대한 새 요청은 거부한다.
// region:    --- Imports
use crate::auction::ModerationAction;
use crate::error::AdminError;
use serde::Serialize;
use std::collections::HashSet;

// endregion: --- Imports

/// 확인 대기 중인 동작
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingAction {
    pub target_id: String,
    pub action: ModerationAction,
}

#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<PendingAction>,
    in_flight: HashSet<String>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 확인 요청 등록 (이전 대기 요청은 대체된다)
    pub fn request(
        &mut self,
        target_id: &str,
        action: ModerationAction,
    ) -> Result<PendingAction, AdminError> {
        if self.in_flight.contains(target_id) {
            return Err(AdminError::ActionInFlight(target_id.to_string()));
        }
        let pending = PendingAction {
            target_id: target_id.to_string(),
            action,
        };
        self.pending = Some(pending.clone());
        Ok(pending)
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// 취소: 대기 동작을 버린다
    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    /// 확인: 대기 동작을 꺼내고 진행 중으로 표시
    pub fn confirm(&mut self) -> Result<PendingAction, AdminError> {
        let pending = self
            .pending
            .take()
            .ok_or(AdminError::NoPendingConfirmation)?;
        if !self.in_flight.insert(pending.target_id.clone()) {
            return Err(AdminError::ActionInFlight(pending.target_id));
        }
        Ok(pending)
    }

    /// 엔진 호출 종료
    pub fn complete(&mut self, target_id: &str) {
        self.in_flight.remove(target_id);
    }

    pub fn is_in_flight(&self, target_id: &str) -> bool {
        self.in_flight.contains(target_id)
    }
}
