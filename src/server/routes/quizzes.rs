use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{get_all_questions, get_questions_by_category},
        Question,
    },
    server::{app::AppState, deserializers::deserialize_ids},
    telemetry::QUIZ_QUESTIONS_CNTR,
};

use super::{ApiResponse, JsonBody};

/// `quiz_category.id` that plays across every category.
pub const QUIZ_CATEGORY_ALL: i64 = 0;

// the client also sends `type`, only the id matters
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: QuizCategory,
    #[serde(deserialize_with = "deserialize_ids")]
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizBody {
    success: bool,
    question: Option<Question>,
}

fn pick_unseen<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Option<Question> {
    let seen: HashSet<i64> = previous.iter().copied().collect();
    let eligible: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !seen.contains(&q.id))
        .collect();
    eligible.choose(rng).cloned()
}

async fn next_question(
    State(pool): State<SqlitePool>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> ApiResponse<QuizBody> {
    let category = request.quiz_category.id;
    let candidates = if category == QUIZ_CATEGORY_ALL {
        get_all_questions(&pool).await?
    } else {
        get_questions_by_category(&pool, category).await?
    };

    let question = pick_unseen(
        candidates,
        &request.previous_questions,
        &mut rand::thread_rng(),
    );
    match &question {
        Some(q) => {
            let label = if category == QUIZ_CATEGORY_ALL {
                "all".to_owned()
            } else {
                category.to_string()
            };
            QUIZ_QUESTIONS_CNTR.with_label_values(&[label.as_str()]).inc();
            tracing::debug!("Quiz question {} picked from category {label}", q.id);
        }
        None => tracing::debug!("Quiz over for category {category}"),
    }

    Ok(Json(QuizBody {
        success: true,
        question,
    }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}
