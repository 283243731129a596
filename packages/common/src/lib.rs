pub mod bid_status;
pub mod storage;

pub use bid_status::{BidStatus, ParseStatusError};
