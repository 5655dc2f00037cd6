use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

pub const QUESTIONS_PER_PAGE: i64 = 10;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: i64,
}

/// One page of id-ordered questions together with the size of the whole
/// (optionally category-filtered) result set.
#[derive(Debug)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: i64,
}

/// Up to `QUESTIONS_PER_PAGE` questions starting at row `offset`.
pub async fn get_questions_page(
    pool: &SqlitePool,
    category: Option<i64>,
    offset: i64,
) -> sqlx::Result<QuestionPage> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, difficulty, category
FROM questions
WHERE ?1 IS NULL OR category = ?1
ORDER BY id
LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(category)
    .bind(QUESTIONS_PER_PAGE)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
SELECT COUNT(*) FROM questions WHERE ?1 IS NULL OR category = ?1
        "#,
    )
    .bind(category)
    .fetch_one(pool)
    .await?;

    Ok(QuestionPage { questions, total })
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, difficulty, category FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_by_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, difficulty, category
FROM questions
WHERE category = ?1
ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, difficulty, category FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Case-insensitive substring match on the question text, ordered by id. The
/// term is taken literally, so `%` and `_` carry no wildcard meaning.
// Folded in Rust, sqlite's lower() only knows ASCII.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let term = term.to_lowercase();
    Ok(get_all_questions(pool)
        .await?
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&term))
        .collect())
}

// Missing fields are bound as NULL and rejected by the NOT NULL constraints.
pub async fn create_question(
    pool: &SqlitePool,
    question: Option<&str>,
    answer: Option<&str>,
    difficulty: Option<i64>,
    category: Option<i64>,
) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(difficulty)
    .bind(category)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let mut conn = pool.acquire().await?;

    let deleted = sqlx::query(
        r#"
DELETE FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    Ok(deleted)
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for q in questions {
        sqlx::query(
            r#"
INSERT INTO questions (id, question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (id) DO UPDATE SET
    question = excluded.question,
    answer = excluded.answer,
    difficulty = excluded.difficulty,
    category = excluded.category
            "#,
        )
        .bind(q.id)
        .bind(q.question)
        .bind(q.answer)
        .bind(q.difficulty)
        .bind(q.category)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
