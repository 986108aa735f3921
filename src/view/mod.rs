/// 거래 심사 화면 상태
/// 게이트웨이에서 받은 매물 사본을 들고 필터/정렬/페이지/내보내기를 처리하고,
/// 변경 구독 이벤트로 사본을 맞춘다. 사본은 권위 있는 데이터가 아니다.
// region:    --- Imports
use crate::auction::{AuctionStatus, Listing, Transition};
use crate::error::AdminError;
use crate::gateway::{ChangeEvent, Gateway, ListingQuery};
use serde::Serialize;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Modules
pub mod confirm;
pub mod export;
pub mod filter;

pub use confirm::{ConfirmationGate, PendingAction};
pub use filter::{
    SortOrder, StatusTab, TransactionFilter, TransactionParams, TransactionRequest,
};

// endregion: --- Modules

/// 한 페이지 결과
#[derive(Debug, Clone, Serialize)]
pub struct TransactionPage {
    pub items: Vec<Listing>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

// region:    --- Transaction View
pub struct TransactionView {
    listings: Vec<Listing>,
    active_tab: Option<StatusTab>,
    page_size: usize,
    gate: ConfirmationGate,
}

impl TransactionView {
    pub fn new(page_size: usize) -> Self {
        Self {
            listings: Vec::new(),
            active_tab: None,
            page_size,
            gate: ConfirmationGate::new(),
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn active_tab(&self) -> Option<StatusTab> {
        self.active_tab
    }

    pub fn gate(&self) -> &ConfirmationGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut ConfirmationGate {
        &mut self.gate
    }

    fn in_scope(&self, listing: &Listing) -> bool {
        self.active_tab.map_or(true, |tab| tab.contains(listing.status))
    }

    /// 탭 기준으로 다시 조회
    pub async fn reload(
        &mut self,
        gateway: &dyn Gateway,
        tab: Option<StatusTab>,
    ) -> Result<(), AdminError> {
        let query = match tab {
            Some(tab) => ListingQuery::with_statuses(tab.statuses()),
            None => ListingQuery::all(),
        };
        self.listings = gateway.select_listings(&query).await?;
        self.active_tab = tab;
        info!(
            "{:<12} --> 거래 목록 조회 tab={:?}, {}건",
            "View",
            tab,
            self.listings.len()
        );
        Ok(())
    }

    /// 변경 이벤트 반영
    pub fn apply_change(&mut self, event: ChangeEvent) {
        debug!(
            "{:<12} --> 변경 이벤트 반영 id={}",
            "View",
            event.listing_id()
        );
        match event {
            ChangeEvent::Inserted { listing } | ChangeEvent::Updated { listing } => {
                self.upsert(listing)
            }
            ChangeEvent::Deleted { id } => self.listings.retain(|l| l.id != id),
        }
    }

    fn upsert(&mut self, listing: Listing) {
        let in_scope = self.in_scope(&listing);
        match self.listings.iter().position(|l| l.id == listing.id) {
            Some(index) if in_scope => self.listings[index] = listing,
            Some(index) => {
                self.listings.remove(index);
            }
            None if in_scope => self.listings.push(listing),
            None => {}
        }
    }

    /// 엔진 결과를 사본에 반영
    /// 사본이 아직 PENDING 일 때만 덮어쓴다. 그 사이 변경 구독으로 더 새로운
    /// 상태(종료, 삭제)가 들어왔으면 그것을 유지한다.
    pub fn record_transition(&mut self, transition: &Transition) {
        let listing = &transition.listing;
        let still_pending = self
            .listings
            .iter()
            .any(|l| l.id == listing.id && l.status == AuctionStatus::Pending);
        if still_pending {
            self.upsert(listing.clone());
        } else {
            debug!(
                "{:<12} --> 사본이 이미 갱신됨, 엔진 결과 무시 id={}",
                "View", listing.id
            );
        }
    }

    /// 필터된 전체 목록 (정렬 포함)
    pub fn filtered(&self, filter: &TransactionFilter, order: SortOrder) -> Vec<Listing> {
        let mut rows = filter.apply(self.listings.iter().filter(|l| self.in_scope(l)));
        filter::sort_by_auction_start(&mut rows, order);
        rows
    }

    pub fn page(&self, request: &TransactionRequest) -> Result<TransactionPage, AdminError> {
        request.filter.validate()?;
        let rows = self.filtered(&request.filter, request.order);
        let items = filter::paginate(&rows, request.page, self.page_size)?.to_vec();
        Ok(TransactionPage {
            items,
            page: request.page,
            page_size: self.page_size,
            total_items: rows.len(),
            total_pages: filter::total_pages(rows.len(), self.page_size),
        })
    }

    /// 현재 페이지가 아닌 필터된 전체 목록을 CSV 로
    pub fn export(&self, request: &TransactionRequest) -> Result<String, AdminError> {
        request.filter.validate()?;
        Ok(export::to_csv(
            &self.filtered(&request.filter, request.order),
        ))
    }
}
// endregion: --- Transaction View
