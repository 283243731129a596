use chrono::{DateTime, Utc};
use ewakeel_common::BidStatus;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_text};

/// Request body for placing a bid on a legal query.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBidRequest {
    /// ID of the legal query being bid on.
    #[schema(example = 17)]
    pub query_id: i32,
    /// Display name of the bidding advocate.
    #[schema(example = "Ayesha Khan")]
    pub advocate_name: String,
    /// Proposed fee.
    #[schema(example = 25000.0)]
    pub bid_amount: f64,
    /// Years of relevant experience, free text.
    #[schema(example = "8 years in family courts")]
    pub experience: Option<String>,
    /// Expected time to resolution.
    #[schema(example = "3-4 months")]
    pub timeline: Option<String>,
    /// Proposed legal strategy.
    pub strategy: Option<String>,
    /// Advocate rating between 0 and 5.
    #[schema(example = 4.5)]
    pub rating: Option<f64>,
    #[schema(example = "Family Law")]
    pub specialization: Option<String>,
}

pub fn validate_create_bid(payload: &CreateBidRequest) -> Result<(), AppError> {
    validate_text(&payload.advocate_name, "advocate_name", 128)?;
    validate_bid_amount(payload.bid_amount)?;
    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
    }
    if let Some(specialization) = &payload.specialization {
        validate_text(specialization, "specialization", 128)?;
    }
    Ok(())
}

fn validate_bid_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::Validation(
            "bid_amount must be greater than zero".into(),
        ));
    }
    Ok(())
}

fn validate_rating(rating: f64) -> Result<(), AppError> {
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err(AppError::Validation("rating must be between 0 and 5".into()));
    }
    Ok(())
}

/// Request body for updating a bid.
///
/// Nullable fields distinguish "absent" (keep) from "null" (clear).
/// Bid status is never updatable here; use the accept endpoint.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateBidRequest {
    pub advocate_name: Option<String>,
    pub bid_amount: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub experience: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub timeline: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub strategy: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub specialization: Option<Option<String>>,
}

pub fn validate_update_bid(payload: &UpdateBidRequest) -> Result<(), AppError> {
    if let Some(name) = &payload.advocate_name {
        validate_text(name, "advocate_name", 128)?;
    }
    if let Some(amount) = payload.bid_amount {
        validate_bid_amount(amount)?;
    }
    if let Some(Some(rating)) = payload.rating {
        validate_rating(rating)?;
    }
    if let Some(Some(specialization)) = &payload.specialization {
        validate_text(specialization, "specialization", 128)?;
    }
    Ok(())
}

/// Sort key for bid listings.
#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BidSortBy {
    Rating,
    BidAmount,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query-string filters for listing bids.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ListBidsQuery {
    /// Restrict to bids on one legal query.
    pub query_id: Option<i32>,
    /// Exact-match filter on specialization.
    pub specialization: Option<String>,
    pub status: Option<BidStatus>,
    #[serde(default)]
    pub sort_by: BidSortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BidResponse {
    pub id: i32,
    pub query_id: i32,
    pub advocate_name: String,
    pub bid_amount: f64,
    pub experience: Option<String>,
    pub timeline: Option<String>,
    pub strategy: Option<String>,
    pub rating: Option<f64>,
    pub specialization: Option<String>,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::bid::Model> for BidResponse {
    fn from(m: crate::entity::bid::Model) -> Self {
        Self {
            id: m.id,
            query_id: m.query_id,
            advocate_name: m.advocate_name,
            bid_amount: m.bid_amount,
            experience: m.experience,
            timeline: m.timeline,
            strategy: m.strategy,
            rating: m.rating,
            specialization: m.specialization,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
