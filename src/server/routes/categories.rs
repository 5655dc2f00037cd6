use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{categories::get_all_categories, questions::get_questions_page},
    server::{app::AppState, error::ApiError},
};

use super::{questions::QuestionsBody, ApiResponse, IdPath, Pagination, QueryParams};

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
}

// serialized as {"1": "Science", ...}
pub(super) async fn category_map(pool: &SqlitePool) -> sqlx::Result<BTreeMap<i64, String>> {
    Ok(get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect())
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesBody> {
    Ok(Json(CategoriesBody {
        success: true,
        categories: category_map(&pool).await?,
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
    QueryParams(pagination): QueryParams<Pagination>,
) -> ApiResponse<QuestionsBody> {
    let page = get_questions_page(&pool, Some(id), pagination.offset()?).await?;
    if page.questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsBody {
        success: true,
        questions: page.questions,
        total_questions: page.total,
        categories: None,
        current_category: Some(id),
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
}
