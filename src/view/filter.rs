/// 거래 목록 필터 / 정렬 / 페이지
// region:    --- Imports
use crate::auction::{AuctionStatus, Category, Listing};
use crate::error::AdminError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// endregion: --- Imports

// region:    --- Status Tab
/// 거래 화면 탭
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTab {
    Pending,
    Ongoing,
    Finished,
}

impl StatusTab {
    pub fn statuses(&self) -> &'static [AuctionStatus] {
        match self {
            StatusTab::Pending => &[AuctionStatus::Pending],
            StatusTab::Ongoing => &[AuctionStatus::Available],
            StatusTab::Finished => &[
                AuctionStatus::AuctionEnded,
                AuctionStatus::Sold,
                AuctionStatus::Disapproved,
            ],
        }
    }

    pub fn contains(&self, status: AuctionStatus) -> bool {
        self.statuses().contains(&status)
    }
}

impl FromStr for StatusTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(StatusTab::Pending),
            "ongoing" => Ok(StatusTab::Ongoing),
            "finished" => Ok(StatusTab::Finished),
            other => Err(format!("unknown tab: {other}")),
        }
    }
}
// endregion: --- Status Tab

// region:    --- Sort Order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// auction_start 기준 안정 정렬
pub fn sort_by_auction_start(listings: &mut [Listing], order: SortOrder) {
    match order {
        SortOrder::Ascending => listings.sort_by(|a, b| a.auction_start.cmp(&b.auction_start)),
        SortOrder::Descending => listings.sort_by(|a, b| b.auction_start.cmp(&a.auction_start)),
    }
}
// endregion: --- Sort Order

// region:    --- Pagination
/// 1부터 시작하는 페이지, 범위를 넘으면 빈 슬라이스
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Result<&[T], AdminError> {
    if page == 0 {
        return Err(AdminError::Validation("page index starts at 1".to_string()));
    }
    if page_size == 0 {
        return Err(AdminError::Validation("page size must be positive".to_string()));
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return Ok(&[]);
    }
    let end = start.saturating_add(page_size).min(items.len());
    Ok(&items[start..end])
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    }
}
// endregion: --- Pagination

// region:    --- Transaction Filter
/// 모든 조건은 AND, 비어 있는 조건은 항상 참
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub tab: Option<StatusTab>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    pub fn validate(&self) -> Result<(), AdminError> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(AdminError::Validation(format!(
                    "date range start {start} is after end {end}"
                )));
            }
        }
        Ok(())
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_search(listing)
            && self.category.map_or(true, |c| listing.category == c)
            && self.tab.map_or(true, |t| t.contains(listing.status))
            && self.start.map_or(true, |s| s <= listing.auction_start)
            && self.end.map_or(true, |e| listing.auction_start <= e)
    }

    /// 매물 id 또는 종류에 대한 대소문자 무시 부분 일치
    fn matches_search(&self, listing: &Listing) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        listing.id.to_lowercase().contains(&term)
            || listing.category.as_str().to_lowercase().contains(&term)
    }

    pub fn apply<'a>(&self, listings: impl IntoIterator<Item = &'a Listing>) -> Vec<Listing> {
        listings
            .into_iter()
            .filter(|l| self.matches(l))
            .cloned()
            .collect()
    }
}
// endregion: --- Transaction Filter

// region:    --- Query Params
/// 쿼리 문자열 원본
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tab: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub order: Option<String>,
    /// 숫자 검증은 TryFrom 에서 (잘못된 값도 VALIDATION_ERROR 로 응답)
    pub page: Option<String>,
}

/// 검증된 조회 요청
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    pub filter: TransactionFilter,
    pub order: SortOrder,
    pub page: usize,
}

impl TryFrom<TransactionParams> for TransactionRequest {
    type Error = AdminError;

    fn try_from(params: TransactionParams) -> Result<Self, Self::Error> {
        let filter = TransactionFilter {
            search: params.search.filter(|s| !s.trim().is_empty()),
            category: parse_opt::<Category>(params.category)?,
            tab: parse_opt::<StatusTab>(params.tab)?,
            start: params
                .start
                .filter(|s| !s.trim().is_empty())
                .map(|s| parse_bound(&s, Bound::Start))
                .transpose()?,
            end: params
                .end
                .filter(|s| !s.trim().is_empty())
                .map(|s| parse_bound(&s, Bound::End))
                .transpose()?,
        };
        filter.validate()?;

        let page = parse_page(params.page)?;

        Ok(TransactionRequest {
            filter,
            order: parse_opt::<SortOrder>(params.order)?.unwrap_or_default(),
            page,
        })
    }
}

/// 1 부터 시작하는 페이지 번호, 없으면 1
fn parse_page(value: Option<String>) -> Result<usize, AdminError> {
    let Some(value) = value.filter(|s| !s.trim().is_empty()) else {
        return Ok(1);
    };
    match value.trim().parse::<usize>() {
        Ok(0) => Err(AdminError::Validation("page index starts at 1".to_string())),
        Ok(page) => Ok(page),
        Err(_) => Err(AdminError::Validation(format!("malformed page: {value}"))),
    }
}

fn parse_opt<T>(value: Option<String>) -> Result<Option<T>, AdminError>
where
    T: FromStr<Err = String>,
{
    value
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<T>().map_err(AdminError::Validation))
        .transpose()
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// RFC 3339 또는 YYYY-MM-DD (시작은 그날 00:00, 끝은 그날 23:59:59.999 UTC)
fn parse_bound(value: &str, bound: Bound) -> Result<DateTime<Utc>, AdminError> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AdminError::Validation(format!("malformed date: {value}")))?;
    let time = match bound {
        Bound::Start => NaiveTime::MIN,
        Bound::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| AdminError::Validation("invalid end of day".to_string()))?,
    };
    Ok(date.and_time(time).and_utc())
}
// endregion: --- Query Params
