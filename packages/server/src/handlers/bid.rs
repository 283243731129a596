use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use ewakeel_common::BidStatus;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{bid, case, legal_query, notification};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::bid::{
    BidResponse, BidSortBy, CreateBidRequest, ListBidsQuery, SortOrder, UpdateBidRequest,
    validate_create_bid, validate_update_bid,
};
use crate::state::AppState;

/// List bids, optionally filtered and sorted.
#[utoipa::path(
    get,
    path = "/",
    tag = "Bids",
    operation_id = "listBids",
    params(ListBidsQuery),
    responses(
        (status = 200, description = "Matching bids", body = [BidResponse]),
    ),
)]
#[instrument(skip(state, params))]
pub async fn list_bids(
    State(state): State<AppState>,
    Query(params): Query<ListBidsQuery>,
) -> Result<Json<Vec<BidResponse>>, AppError> {
    let mut select = bid::Entity::find();

    if let Some(query_id) = params.query_id {
        select = select.filter(bid::Column::QueryId.eq(query_id));
    }
    if let Some(specialization) = &params.specialization {
        select = select.filter(bid::Column::Specialization.eq(specialization));
    }
    if let Some(status) = params.status {
        select = select.filter(bid::Column::Status.eq(status));
    }

    let column = match params.sort_by {
        BidSortBy::Rating => bid::Column::Rating,
        BidSortBy::BidAmount => bid::Column::BidAmount,
        BidSortBy::CreatedAt => bid::Column::CreatedAt,
    };
    let order = match params.sort_order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };

    let bids = select.order_by(column, order).all(&state.db).await?;

    Ok(Json(bids.into_iter().map(Into::into).collect()))
}

/// Place a bid on a legal query.
#[utoipa::path(
    post,
    path = "/",
    tag = "Bids",
    operation_id = "createBid",
    responses(
        (status = 201, description = "Bid created", body = BidResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Legal query not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(query_id = payload.query_id))]
pub async fn create_bid(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBidRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_bid(&payload)?;

    legal_query::Entity::find_by_id(payload.query_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Legal query not found".into()))?;

    let now = chrono::Utc::now();
    let bid = bid::ActiveModel {
        query_id: Set(payload.query_id),
        advocate_name: Set(payload.advocate_name.trim().to_string()),
        bid_amount: Set(payload.bid_amount),
        experience: Set(payload.experience),
        timeline: Set(payload.timeline),
        strategy: Set(payload.strategy),
        rating: Set(payload.rating),
        specialization: Set(payload.specialization),
        status: Set(BidStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(BidResponse::from(bid))))
}

/// Fetch a single bid.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Bids",
    operation_id = "getBid",
    params(("id" = i32, Path, description = "Bid ID")),
    responses(
        (status = 200, description = "The bid", body = BidResponse),
        (status = 404, description = "Bid not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_bid(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BidResponse>, AppError> {
    let bid = find_bid(&state.db, id).await?;
    Ok(Json(BidResponse::from(bid)))
}

/// Update a bid's details. The status field is deliberately not
/// updatable here; acceptance goes through the accept endpoint.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Bids",
    operation_id = "updateBid",
    params(("id" = i32, Path, description = "Bid ID")),
    responses(
        (status = 200, description = "Updated bid", body = BidResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Bid not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_bid(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateBidRequest>,
) -> Result<Json<BidResponse>, AppError> {
    validate_update_bid(&payload)?;

    let bid = find_bid(&state.db, id).await?;
    let mut active: bid::ActiveModel = bid.into();

    if let Some(name) = payload.advocate_name {
        active.advocate_name = Set(name.trim().to_string());
    }
    if let Some(amount) = payload.bid_amount {
        active.bid_amount = Set(amount);
    }
    if let Some(experience) = payload.experience {
        active.experience = Set(experience);
    }
    if let Some(timeline) = payload.timeline {
        active.timeline = Set(timeline);
    }
    if let Some(strategy) = payload.strategy {
        active.strategy = Set(strategy);
    }
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }
    if let Some(specialization) = payload.specialization {
        active.specialization = Set(specialization);
    }
    active.updated_at = Set(chrono::Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(BidResponse::from(updated)))
}

/// Withdraw a bid.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Bids",
    operation_id = "deleteBid",
    params(("id" = i32, Path, description = "Bid ID")),
    responses(
        (status = 204, description = "Bid deleted"),
        (status = 404, description = "Bid not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_bid(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = bid::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Bid not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Accept a bid on behalf of the query owner.
///
/// Runs in a transaction that locks the parent query row, so concurrent
/// accepts on sibling bids serialize. Accepting an already-accepted bid
/// is a no-op; accepting a rejected bid is a conflict. All sibling
/// pending bids are rejected, and if a case has been opened for the
/// query a notification is recorded on it.
#[utoipa::path(
    post,
    path = "/{id}/accept",
    tag = "Bids",
    operation_id = "acceptBid",
    params(("id" = i32, Path, description = "Bid ID")),
    responses(
        (status = 200, description = "Accepted bid", body = BidResponse),
        (status = 404, description = "Bid not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Bid was already rejected (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn accept_bid(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BidResponse>, AppError> {
    let txn = state.db.begin().await?;

    let bid = bid::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Bid not found".into()))?;

    // Serialize concurrent accepts on the same query.
    legal_query::Entity::find_by_id(bid.query_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Legal query not found".into()))?;

    // Re-read now that the lock is held; a concurrent accept may have
    // settled this bid between the first read and the lock.
    let bid = bid::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Bid not found".into()))?;

    match bid.status {
        BidStatus::Accepted => {
            txn.commit().await?;
            return Ok(Json(BidResponse::from(bid)));
        }
        BidStatus::Rejected => {
            txn.rollback().await?;
            return Err(AppError::Conflict(
                "Bid has already been rejected".into(),
            ));
        }
        BidStatus::Pending => {}
    }

    let now = chrono::Utc::now();
    let query_id = bid.query_id;
    let advocate_name = bid.advocate_name.clone();

    let mut active: bid::ActiveModel = bid.into();
    active.status = Set(BidStatus::Accepted);
    active.updated_at = Set(now);
    let accepted = active.update(&txn).await?;

    bid::Entity::update_many()
        .col_expr(bid::Column::Status, Expr::value(BidStatus::Rejected))
        .col_expr(bid::Column::UpdatedAt, Expr::value(now))
        .filter(bid::Column::QueryId.eq(query_id))
        .filter(bid::Column::Id.ne(id))
        .filter(bid::Column::Status.eq(BidStatus::Pending))
        .exec(&txn)
        .await?;

    if let Some(case) = case::Entity::find()
        .filter(case::Column::QueryId.eq(query_id))
        .one(&txn)
        .await?
    {
        notification::ActiveModel {
            case_id: Set(case.id),
            notification_type: Set(Some(notification::TYPE_BID_ACCEPTED.to_string())),
            content: Set(Some(format!("Bid by {} was accepted", advocate_name))),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(bid_id = id, query_id, "Bid accepted");
    Ok(Json(BidResponse::from(accepted)))
}

async fn find_bid<C: ConnectionTrait>(db: &C, id: i32) -> Result<bid::Model, AppError> {
    bid::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bid not found".into()))
}
