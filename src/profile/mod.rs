/// 사용자 목록
/// 판매자/입찰자 여부는 저장하지 않고 livestock, bids 에서 계산한다.
use serde::{Deserialize, Serialize};

/// profiles 테이블 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub location: String,
    pub phone: String,
}

impl Profile {
    /// 이름 등 부가 정보가 없는 프로필
    pub fn bare(id: &str) -> Self {
        Self {
            id: id.to_string(),
            full_name: String::new(),
            location: String::new(),
            phone: String::new(),
        }
    }
}

/// 사용자 화면 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub profile: Profile,
    /// 입찰 기록이 있음
    pub is_bidder: bool,
    /// 등록한 매물이 있음
    pub is_seller: bool,
}
