pub mod engine;
pub mod model;
pub mod status;

pub use engine::{StatusEngine, Transition};
pub use model::{Bid, Category, Listing};
pub use status::{AuctionStatus, ModerationAction};
