use sqlx::PgPool;

use crate::models::job::Job;

const JOB_COLUMNS: &str = "id, company_id, title, slug, description, location, department, \
                           employment_type, status, posted_at, created_at, updated_at";

/// Lists a company's jobs. Public callers see only active postings; company
/// staff and admins also see drafts, closed, and archived ones.
pub async fn list_jobs_for_company(
    pool: &PgPool,
    company_id: &str,
    include_nonpublic: bool,
) -> Result<Vec<Job>, sqlx::Error> {
    if include_nonpublic {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE company_id = $1 ORDER BY posted_at DESC"
        ))
        .bind(company_id)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE company_id = $1 AND status = 'active' \
             ORDER BY posted_at DESC"
        ))
        .bind(company_id)
        .fetch_all(pool)
        .await
    }
}

pub async fn find_job(
    pool: &PgPool,
    company_id: &str,
    job_id: &str,
) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>(&format!(
        "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 AND company_id = $2"
    ))
    .bind(job_id)
    .bind(company_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_job(pool: &PgPool, job: &Job) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO jobs (id, company_id, title, slug, description, location, department, \
         employment_type, status, posted_at, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
    )
    .bind(&job.id)
    .bind(&job.company_id)
    .bind(&job.title)
    .bind(&job.slug)
    .bind(&job.description)
    .bind(&job.location)
    .bind(&job.department)
    .bind(&job.employment_type)
    .bind(job.status)
    .bind(job.posted_at)
    .bind(job.created_at)
    .bind(job.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn update_job(pool: &PgPool, job: &Job) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE jobs SET title = $2, description = $3, location = $4, department = $5, \
         employment_type = $6, status = $7, updated_at = $8 WHERE id = $1",
    )
    .bind(&job.id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.location)
    .bind(&job.department)
    .bind(&job.employment_type)
    .bind(job.status)
    .bind(job.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn delete_job(pool: &PgPool, company_id: &str, job_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND company_id = $2")
        .bind(job_id)
        .bind(company_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn slug_taken_for_company(
    pool: &PgPool,
    company_id: &str,
    slug: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM jobs WHERE company_id = $1 AND slug = $2)",
    )
    .bind(company_id)
    .bind(slug)
    .fetch_one(pool)
    .await
}
