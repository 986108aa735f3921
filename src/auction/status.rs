/// 경매 상태 머신
/// PENDING -> AVAILABLE | DISAPPROVED
/// AVAILABLE -> AUCTION_ENDED | SOLD
/// 상태 문자열은 이 모듈에서만 정의한다.
// region:    --- Imports
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// endregion: --- Imports

// region:    --- Auction Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    Pending,
    Available,
    Disapproved,
    AuctionEnded,
    Sold,
}

impl AuctionStatus {
    pub const ALL: [AuctionStatus; 5] = [
        AuctionStatus::Pending,
        AuctionStatus::Available,
        AuctionStatus::Disapproved,
        AuctionStatus::AuctionEnded,
        AuctionStatus::Sold,
    ];

    /// 저장소에 기록되는 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Pending => "PENDING",
            AuctionStatus::Available => "AVAILABLE",
            AuctionStatus::Disapproved => "DISAPPROVED",
            AuctionStatus::AuctionEnded => "AUCTION_ENDED",
            AuctionStatus::Sold => "SOLD",
        }
    }

    /// 상태 전이 허용 여부
    pub fn can_transition_to(&self, next: AuctionStatus) -> bool {
        matches!(
            (self, next),
            (AuctionStatus::Pending, AuctionStatus::Available)
                | (AuctionStatus::Pending, AuctionStatus::Disapproved)
                | (AuctionStatus::Available, AuctionStatus::AuctionEnded)
                | (AuctionStatus::Available, AuctionStatus::Sold)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AuctionStatus::Disapproved | AuctionStatus::AuctionEnded | AuctionStatus::Sold
        )
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuctionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown auction status: {s}"))
    }
}
// endregion: --- Auction Status

// region:    --- Moderation Action
/// 관리자가 수행하는 심사 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Disapprove,
}

impl ModerationAction {
    /// 심사 결과 상태
    pub fn target_status(&self) -> AuctionStatus {
        match self {
            ModerationAction::Approve => AuctionStatus::Available,
            ModerationAction::Disapprove => AuctionStatus::Disapproved,
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModerationAction::Approve => f.write_str("approve"),
            ModerationAction::Disapprove => f.write_str("disapprove"),
        }
    }
}
// endregion: --- Moderation Action

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings_round_trip() {
        for status in AuctionStatus::ALL {
            assert_eq!(status.as_str().parse::<AuctionStatus>(), Ok(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert!("Pending".parse::<AuctionStatus>().is_err());
    }

    #[test]
    fn only_pending_can_be_moderated() {
        for status in AuctionStatus::ALL {
            let allowed = status == AuctionStatus::Pending;
            assert_eq!(status.can_transition_to(AuctionStatus::Available), allowed);
            assert_eq!(status.can_transition_to(AuctionStatus::Disapproved), allowed);
        }
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        for from in AuctionStatus::ALL.into_iter().filter(|s| s.is_terminal()) {
            assert!(AuctionStatus::ALL
                .into_iter()
                .all(|to| !from.can_transition_to(to)));
        }
    }
}
