use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, import_categories};
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

fn write_to(path: &Path, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}

pub async fn export_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !dir.exists() {
        std::fs::create_dir_all(dir)?
    }
    tracing::info!(
        "Exporting {} categories and {} questions to {}",
        categories.len(),
        questions.len(),
        dir.display()
    );
    write_to(&dir.join(CATEGORIES_FILE), categories)?;
    write_to(&dir.join(QUESTIONS_FILE), questions)?;
    Ok(())
}

// categories go first, questions reference them
pub async fn import_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(&dir.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&dir.join(QUESTIONS_FILE))?;
    tracing::info!(
        "Importing {} categories and {} questions from {}",
        categories.len(),
        questions.len(),
        dir.display()
    );
    import_categories(pool, categories).await?;
    import_questions(pool, questions).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::db::{establish_connection, run_migrations};

    async fn fresh_db(dir: &TempDir, name: &str) -> SqlitePool {
        let url = format!("sqlite:{}", dir.path().join(name).display());
        let pool = establish_connection(&url).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn exported_data_imports_into_another_database() {
        let dir = TempDir::new().unwrap();
        let source = fresh_db(&dir, "source.db").await;
        crate::db::queries::questions::create_question(
            &source,
            Some("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?"),
            Some("Maya Angelou"),
            Some(2),
            Some(4),
        )
        .await
        .unwrap();

        let out = dir.path().join("dump");
        export_data(&source, &out).await.unwrap();
        assert!(out.join(CATEGORIES_FILE).is_file());
        assert!(out.join(QUESTIONS_FILE).is_file());

        let target = fresh_db(&dir, "target.db").await;
        import_data(&target, &out).await.unwrap();

        assert_eq!(
            get_all_questions(&target).await.unwrap(),
            get_all_questions(&source).await.unwrap()
        );
        assert_eq!(get_all_categories(&target).await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn missing_files_are_reported() {
        let dir = TempDir::new().unwrap();
        let pool = fresh_db(&dir, "trivia.db").await;
        let err = import_data(&pool, &dir.path().join("nowhere"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains(CATEGORIES_FILE));
    }
}
