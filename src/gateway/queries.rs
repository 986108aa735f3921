/// livestock 조회 컬럼
macro_rules! listing_columns {
    () => {
        "id, category, breed, age, gender, weight, starting_price, current_bid, owner_id, location, auction_start, auction_end, proof_of_ownership, vet_certificate, status"
    };
}

/// 매물 조회
pub const GET_LISTING: &str = concat!("SELECT ", listing_columns!(), " FROM livestock WHERE id = $1");

/// 매물 목록 조회
/// $1 이 빈 배열이면 상태 조건 없음, $2 가 NULL 이면 종료 시각 조건 없음
pub const SELECT_LISTINGS: &str = concat!(
    "SELECT ",
    listing_columns!(),
    " FROM livestock
    WHERE (cardinality($1::text[]) = 0 OR status = ANY($1::text[]))
      AND ($2::timestamptz IS NULL OR auction_end < $2)
    ORDER BY auction_start ASC"
);

/// 조건부 상태 변경
pub const UPDATE_STATUS: &str = concat!(
    "UPDATE livestock SET status = $3 WHERE id = $1 AND status = $2 RETURNING ",
    listing_columns!()
);

/// 조건부 삭제
pub const DELETE_LISTING: &str = "DELETE FROM livestock WHERE id = $1 AND status = $2";

/// 매물 입찰 수 조회
pub const COUNT_BIDS: &str = "SELECT COUNT(*) FROM bids WHERE livestock_id = $1";

/// 알림 수신자 조회
pub const SELECT_RECIPIENTS: &str = "SELECT id FROM profiles WHERE id <> $1 ORDER BY id";

/// 알림 추가
pub const INSERT_NOTIFICATION: &str = r#"
    INSERT INTO notifications (livestock_id, seller_id, message, notification_type, is_read, created_at)
    VALUES ($1, $2, $3, $4, FALSE, $5)
    RETURNING id
"#;

/// 알림 수신자 일괄 추가
pub const INSERT_RECIPIENTS: &str = r#"
    INSERT INTO notification_bidders (notification_id, bidder_id, is_read)
    SELECT $1, recipient, FALSE FROM UNNEST($2::text[]) AS recipient
"#;

/// 공지 목록 (최신순)
pub const SELECT_ANNOUNCEMENTS: &str =
    "SELECT id, title, content, created_at FROM announcements ORDER BY created_at DESC, id DESC";

/// 공지 추가
pub const INSERT_ANNOUNCEMENT: &str = r#"
    INSERT INTO announcements (title, content, created_at)
    VALUES ($1, $2, $3)
    RETURNING id, title, content, created_at
"#;

/// 사용자 목록, 판매자/입찰자 여부 계산
pub const SELECT_USERS: &str = r#"
    SELECT p.id, p.full_name, p.location, p.phone,
           EXISTS (SELECT 1 FROM bids b WHERE b.bidder_id = p.id) AS is_bidder,
           EXISTS (SELECT 1 FROM livestock l WHERE l.owner_id = p.id) AS is_seller
    FROM profiles p
    ORDER BY p.id
"#;
