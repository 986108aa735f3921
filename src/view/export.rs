/// 거래 목록 CSV 내보내기
use crate::auction::Listing;

pub const EXPORT_FILENAME: &str = "transactions.csv";

pub const EXPORT_COLUMNS: [&str; 15] = [
    "id",
    "category",
    "breed",
    "age",
    "gender",
    "weight",
    "starting_price",
    "current_bid",
    "owner_id",
    "location",
    "auction_start",
    "auction_end",
    "proof_of_ownership",
    "vet_certificate",
    "status",
];

/// 필터된 전체 목록을 CSV 로 (헤더 포함, CRLF 줄바꿈)
pub fn to_csv(listings: &[Listing]) -> String {
    let mut out = String::new();
    push_record(&mut out, EXPORT_COLUMNS.iter().map(|c| c.to_string()));
    for listing in listings {
        push_record(&mut out, record(listing).into_iter());
    }
    out
}

fn record(listing: &Listing) -> [String; 15] {
    [
        listing.id.clone(),
        listing.category.to_string(),
        listing.breed.clone(),
        listing.age.to_string(),
        listing.gender.clone(),
        listing.weight.to_string(),
        listing.starting_price.to_string(),
        listing
            .current_bid
            .map(|bid| bid.to_string())
            .unwrap_or_default(),
        listing.owner_id.clone(),
        listing.location.clone(),
        listing.auction_start.to_rfc3339(),
        listing.auction_end.to_rfc3339(),
        listing.proof_of_ownership_ref.clone(),
        listing.vet_certificate_ref.clone(),
        listing.status.to_string(),
    ]
}

fn push_record(out: &mut String, fields: impl Iterator<Item = String>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(&field));
    }
    out.push_str("\r\n");
}

/// 쉼표, 따옴표, 줄바꿈이 있으면 따옴표로 감싼다
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
