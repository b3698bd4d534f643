//! Category repository: create, partial update, upsert, cascading delete.

use chrono::Utc;

use quiz_core::entities::{Category, CategoryRef};
use quiz_core::validate::require_text;

use crate::QuizDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, is_unique_violation, parse_datetime, query_count};
use crate::service::QuizService;
use crate::updates::category::CategoryUpdate;

pub(crate) const SELECT_COLS: &str = "id, slug, title, description, created_at, updated_at";

pub(crate) fn row_to_category(row: &libsql::Row) -> Result<Category, DatabaseError> {
    Ok(Category {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Result of an upsert-by-slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Created,
    /// The row existed and its title changed.
    Updated,
    /// The row existed with the same title; nothing was written.
    Unchanged,
}

pub(crate) async fn find_category(
    conn: &libsql::Connection,
    target: &CategoryRef,
) -> Result<Option<Category>, DatabaseError> {
    let mut rows = match target {
        CategoryRef::Id(id) => {
            conn.query(
                &format!("SELECT {SELECT_COLS} FROM categories WHERE id = ?1"),
                [*id],
            )
            .await?
        }
        CategoryRef::Slug(slug) => {
            conn.query(
                &format!("SELECT {SELECT_COLS} FROM categories WHERE slug = ?1"),
                [slug.as_str()],
            )
            .await?
        }
    };
    rows.next().await?.map(|row| row_to_category(&row)).transpose()
}

pub(crate) async fn require_category(
    conn: &libsql::Connection,
    target: &CategoryRef,
) -> Result<Category, DatabaseError> {
    find_category(conn, target)
        .await?
        .ok_or_else(|| DatabaseError::not_found("category", target))
}

pub(crate) async fn category_exists(
    conn: &libsql::Connection,
    id: i64,
) -> Result<bool, DatabaseError> {
    let count = query_count(conn, "SELECT COUNT(*) FROM categories WHERE id = ?1", [id]).await?;
    Ok(count > 0)
}

/// Whether `slug` belongs to any category other than `except_id`.
async fn slug_taken(
    conn: &libsql::Connection,
    slug: &str,
    except_id: Option<i64>,
) -> Result<bool, DatabaseError> {
    let count = query_count(
        conn,
        "SELECT COUNT(*) FROM categories WHERE slug = ?1 AND id != ?2",
        libsql::params![slug, except_id.unwrap_or(0)],
    )
    .await?;
    Ok(count > 0)
}

fn duplicate_slug(slug: &str) -> DatabaseError {
    DatabaseError::Conflict {
        field: "slug",
        value: slug.to_string(),
    }
}

/// Map a write failure, turning a slug UNIQUE violation into `Conflict`.
fn map_write_error(e: libsql::Error, slug: &str) -> DatabaseError {
    if is_unique_violation(&e) {
        duplicate_slug(slug)
    } else {
        DatabaseError::LibSql(e)
    }
}

async fn insert_category(
    conn: &libsql::Connection,
    slug: &str,
    title: &str,
    description: Option<&str>,
) -> Result<Category, DatabaseError> {
    if slug_taken(conn, slug, None).await? {
        return Err(duplicate_slug(slug));
    }

    let now = Utc::now();
    conn.execute(
        "INSERT INTO categories (slug, title, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![slug, title, description, now.to_rfc3339(), now.to_rfc3339()],
    )
    .await
    .map_err(|e| map_write_error(e, slug))?;

    Ok(Category {
        id: conn.last_insert_rowid(),
        slug: slug.to_string(),
        title: title.to_string(),
        description: description.filter(|d| !d.is_empty()).map(String::from),
        created_at: now,
        updated_at: now,
    })
}

async fn apply_category_update(
    conn: &libsql::Connection,
    target: &CategoryRef,
    update: &CategoryUpdate,
) -> Result<Category, DatabaseError> {
    let current = require_category(conn, target).await?;
    if update.is_empty() {
        return Ok(current);
    }

    let mut sets = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();
    let mut idx = 1usize;

    if let Some(ref title) = update.title {
        sets.push(format!("title = ?{idx}"));
        params.push(title.clone().into());
        idx += 1;
    }
    if let Some(ref slug) = update.slug {
        if slug_taken(conn, slug, Some(current.id)).await? {
            return Err(duplicate_slug(slug));
        }
        sets.push(format!("slug = ?{idx}"));
        params.push(slug.clone().into());
        idx += 1;
    }
    if let Some(ref description) = update.description {
        sets.push(format!("description = ?{idx}"));
        params.push(description.clone().map_or(libsql::Value::Null, Into::into));
        idx += 1;
    }

    sets.push(format!("updated_at = ?{idx}"));
    params.push(Utc::now().to_rfc3339().into());
    idx += 1;

    params.push(current.id.into());
    let sql = format!("UPDATE categories SET {} WHERE id = ?{idx}", sets.join(", "));
    conn.execute(&sql, libsql::params_from_iter(params))
        .await
        .map_err(|e| map_write_error(e, update.slug.as_deref().unwrap_or(&current.slug)))?;

    require_category(conn, &CategoryRef::Id(current.id)).await
}

/// Counts of rows removed by a cascading delete.
struct Removed {
    category: Category,
    questions: u64,
    answers: u64,
}

async fn delete_category_tree(
    conn: &libsql::Connection,
    target: &CategoryRef,
) -> Result<Removed, DatabaseError> {
    let category = require_category(conn, target).await?;

    let answers = conn
        .execute(
            "DELETE FROM answers WHERE question_id IN
             (SELECT id FROM questions WHERE category_id = ?1)",
            [category.id],
        )
        .await?;
    let questions = conn
        .execute("DELETE FROM questions WHERE category_id = ?1", [category.id])
        .await?;
    conn.execute("DELETE FROM categories WHERE id = ?1", [category.id])
        .await?;

    Ok(Removed {
        category,
        questions,
        answers,
    })
}

async fn upsert_by_slug(
    conn: &libsql::Connection,
    slug: &str,
    title: &str,
) -> Result<(Category, Upserted), DatabaseError> {
    let existing = find_category(conn, &CategoryRef::Slug(slug.to_string())).await?;
    match existing {
        None => Ok((insert_category(conn, slug, title, None).await?, Upserted::Created)),
        Some(current) if current.title == title => Ok((current, Upserted::Unchanged)),
        Some(current) => {
            conn.execute(
                "UPDATE categories SET title = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![title, Utc::now().to_rfc3339(), current.id],
            )
            .await?;
            let updated = require_category(conn, &CategoryRef::Id(current.id)).await?;
            Ok((updated, Upserted::Updated))
        }
    }
}

impl QuizService {
    /// Create a category. The slug check and the insert share one transaction.
    pub async fn create_category(
        &self,
        slug: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<Category, DatabaseError> {
        require_text("slug", slug)?;
        require_text("title", title)?;

        let conn = self.db().acquire().await;
        let tx = QuizDb::begin(&conn).await?;
        let result = insert_category(&tx, slug, title, description).await;
        let category = QuizDb::finish(tx, result).await?;

        tracing::debug!(id = category.id, slug = %category.slug, "created category");
        Ok(category)
    }

    pub async fn get_category(
        &self,
        target: impl Into<CategoryRef>,
    ) -> Result<Category, DatabaseError> {
        let conn = self.db().acquire().await;
        require_category(&conn, &target.into()).await
    }

    /// Apply a partial update. Only supplied fields change; a new slug is
    /// re-checked for uniqueness against every other category.
    pub async fn update_category(
        &self,
        target: impl Into<CategoryRef>,
        update: CategoryUpdate,
    ) -> Result<Category, DatabaseError> {
        let target = target.into();
        update.validate()?;

        let conn = self.db().acquire().await;
        let tx = QuizDb::begin(&conn).await?;
        let result = apply_category_update(&tx, &target, &update).await;
        let category = QuizDb::finish(tx, result).await?;

        tracing::debug!(id = category.id, %target, "updated category");
        Ok(category)
    }

    /// Delete a category with all of its questions and their answers.
    ///
    /// All three deletes run in one transaction; on any failure nothing is
    /// removed.
    pub async fn delete_category(
        &self,
        target: impl Into<CategoryRef>,
    ) -> Result<(), DatabaseError> {
        let target = target.into();

        let conn = self.db().acquire().await;
        let tx = QuizDb::begin(&conn).await?;
        let result = delete_category_tree(&tx, &target).await;
        let removed = QuizDb::finish(tx, result).await?;

        tracing::debug!(
            id = removed.category.id,
            slug = %removed.category.slug,
            questions = removed.questions,
            answers = removed.answers,
            "deleted category"
        );
        Ok(())
    }

    /// Create the category keyed by `slug`, or refresh its title if it exists.
    pub async fn upsert_category(
        &self,
        slug: &str,
        title: &str,
    ) -> Result<(Category, Upserted), DatabaseError> {
        require_text("slug", slug)?;
        require_text("title", title)?;

        let conn = self.db().acquire().await;
        let tx = QuizDb::begin(&conn).await?;
        let result = upsert_by_slug(&tx, slug, title).await;
        let (category, outcome) = QuizDb::finish(tx, result).await?;

        tracing::debug!(id = category.id, slug, ?outcome, "upserted category");
        Ok((category, outcome))
    }
}
