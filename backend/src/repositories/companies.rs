use sqlx::PgPool;

use crate::models::company::Company;

const COMPANY_COLUMNS: &str = "id, name, slug, status, created_at, updated_at";

pub async fn list_companies(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(&format!(
        "SELECT {COMPANY_COLUMNS} FROM companies ORDER BY created_at"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_company_by_id(
    pool: &PgPool,
    company_id: &str,
) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(&format!(
        "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
    ))
    .bind(company_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_company_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(&format!(
        "SELECT {COMPANY_COLUMNS} FROM companies WHERE slug = $1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await
}

pub async fn insert_company(pool: &PgPool, company: &Company) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO companies (id, name, slug, status, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&company.id)
    .bind(&company.name)
    .bind(&company.slug)
    .bind(company.status)
    .bind(company.created_at)
    .bind(company.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn update_company(pool: &PgPool, company: &Company) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE companies SET name = $2, slug = $3, status = $4, updated_at = $5 WHERE id = $1",
    )
    .bind(&company.id)
    .bind(&company.name)
    .bind(&company.slug)
    .bind(company.status)
    .bind(company.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn delete_company(pool: &PgPool, company_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM companies WHERE id = $1")
        .bind(company_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn slug_taken(
    pool: &PgPool,
    slug: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM companies WHERE slug = $1 AND ($2::TEXT IS NULL OR id <> $2))",
    )
    .bind(slug)
    .bind(exclude_id)
    .fetch_one(pool)
    .await
}
