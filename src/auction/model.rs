// region:    --- Imports
use super::status::AuctionStatus;
use crate::error::{AdminError, GatewayError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// endregion: --- Imports

// region:    --- Category
/// 가축 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Carabao,
    Cattle,
    Horse,
    Goat,
    Pig,
    Sheep,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Carabao,
        Category::Cattle,
        Category::Horse,
        Category::Goat,
        Category::Pig,
        Category::Sheep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Carabao => "Carabao",
            Category::Cattle => "Cattle",
            Category::Horse => "Horse",
            Category::Goat => "Goat",
            Category::Pig => "Pig",
            Category::Sheep => "Sheep",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 대소문자 구분 없이 파싱
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}
// endregion: --- Category

// region:    --- Listing
/// 경매 매물
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub category: Category,
    pub breed: String,
    pub age: i32,
    pub gender: String,
    pub weight: f64,
    pub starting_price: i64,
    pub current_bid: Option<i64>,
    pub owner_id: String,
    pub location: String,
    pub auction_start: DateTime<Utc>,
    pub auction_end: DateTime<Utc>,
    pub proof_of_ownership_ref: String,
    pub vet_certificate_ref: String,
    pub status: AuctionStatus,
}

impl Listing {
    /// 매물 불변식 검사
    pub fn check_invariants(&self) -> Result<(), AdminError> {
        if self.auction_end <= self.auction_start {
            return Err(AdminError::Validation(format!(
                "listing {}: auction_end must be after auction_start",
                self.id
            )));
        }
        if let Some(bid) = self.current_bid {
            if bid < self.starting_price {
                return Err(AdminError::Validation(format!(
                    "listing {}: current_bid {} is below starting_price {}",
                    self.id, bid, self.starting_price
                )));
            }
        }
        Ok(())
    }

    /// 경매 기간이 `now` 이전에 끝났는지
    pub fn has_ended_before(&self, now: DateTime<Utc>) -> bool {
        self.auction_end < now
    }
}

/// livestock 테이블 행
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListingRow {
    pub id: String,
    pub category: String,
    pub breed: String,
    pub age: i32,
    pub gender: String,
    pub weight: f64,
    pub starting_price: i64,
    pub current_bid: Option<i64>,
    pub owner_id: String,
    pub location: String,
    pub auction_start: DateTime<Utc>,
    pub auction_end: DateTime<Utc>,
    pub proof_of_ownership: String,
    pub vet_certificate: String,
    pub status: String,
}

impl TryFrom<ListingRow> for Listing {
    type Error = GatewayError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse::<Category>()
            .map_err(GatewayError::Decode)?;
        let status = row
            .status
            .parse::<AuctionStatus>()
            .map_err(GatewayError::Decode)?;
        Ok(Listing {
            id: row.id,
            category,
            breed: row.breed,
            age: row.age,
            gender: row.gender,
            weight: row.weight,
            starting_price: row.starting_price,
            current_bid: row.current_bid,
            owner_id: row.owner_id,
            location: row.location,
            auction_start: row.auction_start,
            auction_end: row.auction_end,
            proof_of_ownership_ref: row.proof_of_ownership,
            vet_certificate_ref: row.vet_certificate,
            status,
        })
    }
}
// endregion: --- Listing

// region:    --- Bid
/// 입찰 (읽기 전용)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub livestock_id: String,
    pub bidder_id: String,
}
// endregion: --- Bid
