use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{self, get_question, get_questions_page, search_questions},
        Question,
    },
    server::{app::AppState, error::ApiError},
    telemetry::{CREATED_QUESTIONS_CNTR, DELETED_QUESTIONS_CNTR},
};

use super::{categories::category_map, ApiResponse, IdPath, JsonBody, Pagination, QueryParams};

#[derive(Serialize)]
pub(super) struct QuestionsBody {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<i64, String>>,
    pub current_category: Option<i64>,
}

// Nothing is validated here, the table constraints reject incomplete questions.
// The web client posts select values as strings, hence the lenient numbers.
#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    QueryParams(pagination): QueryParams<Pagination>,
) -> ApiResponse<QuestionsBody> {
    let page = get_questions_page(&pool, None, pagination.offset()?).await?;
    if page.questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsBody {
        success: true,
        questions: page.questions,
        total_questions: page.total,
        categories: Some(category_map(&pool).await?),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(new_question): JsonBody<NewQuestion>,
) -> ApiResponse<Created> {
    let id = questions::create_question(
        &pool,
        new_question.question.as_deref(),
        new_question.answer.as_deref(),
        new_question.difficulty,
        new_question.category,
    )
    .await?;
    CREATED_QUESTIONS_CNTR.inc();
    tracing::info!("Created question {id}");
    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
) -> ApiResponse<Deleted> {
    if get_question(&pool, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    questions::delete_question(&pool, id).await?;
    DELETED_QUESTIONS_CNTR.inc();
    tracing::info!("Deleted question {id}");
    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

// unlike the paginated listings an empty result here is still a success
async fn search(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<QuestionsBody> {
    let term = body.search_term.unwrap_or_default();
    let found = search_questions(&pool, &term).await?;
    Ok(Json(QuestionsBody {
        success: true,
        total_questions: found.len() as i64,
        questions: found,
        categories: None,
        current_category: None,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/search", post(search))
}
