/// 보고서 / 대시보드 집계
/// 이미 조회한 매물 목록에 대한 단순 집계이며 데이터를 바꾸지 않는다.
// region:    --- Imports
use crate::auction::{AuctionStatus, Category, Listing};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

// endregion: --- Imports

/// 종류별 거래 보고 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesReportRow {
    pub category: Category,
    pub registered: usize,
    pub sold: usize,
    pub unsold: usize,
}

/// 종류별 거래 보고서 (모든 종류 포함, 종류 순서 고정)
/// registered 는 승인된 적 있는 매물 (AVAILABLE, AUCTION_ENDED, SOLD)
pub fn species_report(listings: &[Listing]) -> Vec<SpeciesReportRow> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let rows = listings.iter().filter(|l| l.category == category);
            let mut row = SpeciesReportRow {
                category,
                registered: 0,
                sold: 0,
                unsold: 0,
            };
            for listing in rows {
                match listing.status {
                    AuctionStatus::Available => row.registered += 1,
                    AuctionStatus::Sold => {
                        row.registered += 1;
                        row.sold += 1;
                    }
                    AuctionStatus::AuctionEnded => {
                        row.registered += 1;
                        row.unsold += 1;
                    }
                    AuctionStatus::Pending | AuctionStatus::Disapproved => {}
                }
            }
            row
        })
        .collect()
}

/// 대시보드 주요 지표
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub pending_review: usize,
    pub upcoming: usize,
    pub live: usize,
    pub completed: usize,
}

impl DashboardMetrics {
    pub fn compute(listings: &[Listing], now: DateTime<Utc>) -> Self {
        let mut metrics = Self::default();
        for listing in listings {
            match listing.status {
                AuctionStatus::Pending => metrics.pending_review += 1,
                AuctionStatus::Available if listing.auction_start > now => metrics.upcoming += 1,
                AuctionStatus::Available if listing.auction_end >= now => metrics.live += 1,
                AuctionStatus::Sold => metrics.completed += 1,
                _ => {}
            }
        }
        metrics
    }
}

// region:    --- Weekly Report
/// 종류별 판매 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// 한 주 (월요일 시작, UTC) 판매 집계
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReportRow {
    pub week_start: NaiveDate,
    pub counts: Vec<CategoryCount>,
    pub total: usize,
    pub income: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReport {
    pub weeks: Vec<WeeklyReportRow>,
    pub totals: Vec<CategoryCount>,
    pub total: usize,
    pub income: i64,
}

#[derive(Default)]
struct Tally {
    counts: BTreeMap<Category, usize>,
    total: usize,
    income: i64,
}

impl Tally {
    fn add(&mut self, listing: &Listing) {
        *self.counts.entry(listing.category).or_default() += 1;
        self.total += 1;
        // 낙찰가, 없으면 시작가
        self.income += listing.current_bid.unwrap_or(listing.starting_price);
    }

    fn counts(&self) -> Vec<CategoryCount> {
        Category::ALL
            .into_iter()
            .map(|category| CategoryCount {
                category,
                count: self.counts.get(&category).copied().unwrap_or(0),
            })
            .collect()
    }
}

fn week_start(at: DateTime<Utc>) -> NaiveDate {
    let day = at.date_naive();
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// 주간 판매 보고서
/// SOLD 매물을 경매 종료 주로 묶는다. 판매가 없는 주는 행이 없다.
pub fn weekly_report(listings: &[Listing]) -> WeeklyReport {
    let mut weeks: BTreeMap<NaiveDate, Tally> = BTreeMap::new();
    let mut overall = Tally::default();
    for listing in listings.iter().filter(|l| l.status == AuctionStatus::Sold) {
        weeks.entry(week_start(listing.auction_end)).or_default().add(listing);
        overall.add(listing);
    }

    WeeklyReport {
        weeks: weeks
            .iter()
            .map(|(week_start, tally)| WeeklyReportRow {
                week_start: *week_start,
                counts: tally.counts(),
                total: tally.total,
                income: tally.income,
            })
            .collect(),
        totals: overall.counts(),
        total: overall.total,
        income: overall.income,
    }
}
// endregion: --- Weekly Report
