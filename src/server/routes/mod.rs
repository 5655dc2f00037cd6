mod categories;
mod questions;
mod quizzes;

use axum::extract::{FromRequest, FromRequestParts};
use axum::Json;
use serde::Deserialize;

use super::deserializers::deserialize_lenient_page;
use super::error::ApiError;
use crate::db::queries::questions::QUESTIONS_PER_PAGE;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::{quizzes_router, QUIZ_CATEGORY_ALL};

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// `axum::Json` whose rejections render as the 422 error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    page: Option<i64>,
}

impl Pagination {
    /// Row offset of the requested 1-based page, defaulting to the first page.
    /// Pages below 1 and pages too far out to address don't exist.
    pub fn offset(&self) -> Result<i64, ApiError> {
        match self.page.unwrap_or(1) {
            page if page < 1 => Err(ApiError::NotFound),
            page => page
                .checked_sub(1)
                .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
                .ok_or(ApiError::NotFound),
        }
    }
}
