use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::{OptionalExtension, Row};
use shared_types::{posted_days_ago, Job, NewJob, UpdateJobRequest};

use crate::database::{nullable_text, text, update_columns, AsyncDbConnection};

const JOB_COLUMNS: &str = "id, company_id, title, slug, location, work_policy, department,
    employment_type, experience_level, job_type, salary_range, description, application_url,
    created_at";

fn enum_column<T: std::str::FromStr>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Row mapper; `posted_days_ago` is derived from `now_ms`, never stored.
fn map_job(row: &Row, now_ms: i64) -> rusqlite::Result<Job> {
    let created_at: i64 = row.get(13)?;
    Ok(Job {
        id: row.get(0)?,
        company_id: row.get(1)?,
        title: row.get(2)?,
        slug: row.get(3)?,
        location: row.get(4)?,
        work_policy: enum_column(row, 5)?,
        department: row.get(6)?,
        employment_type: enum_column(row, 7)?,
        experience_level: enum_column(row, 8)?,
        job_type: enum_column(row, 9)?,
        salary_range: row.get(10)?,
        description: row.get(11)?,
        application_url: row.get(12)?,
        created_at,
        posted_days_ago: posted_days_ago(created_at, now_ms),
    })
}

pub async fn insert_job(conn: AsyncDbConnection, job: &NewJob) -> Result<Job> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp_millis();
    let id = uuid::Uuid::new_v4().to_string();

    conn.execute(
        "INSERT INTO jobs
         (id, company_id, title, slug, location, work_policy, department, employment_type,
          experience_level, job_type, salary_range, description, application_url,
          created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            &id,
            &job.company_id,
            &job.title,
            &job.slug,
            &job.location,
            job.work_policy.as_str(),
            &job.department,
            job.employment_type.as_str(),
            job.experience_level.as_str(),
            job.job_type.as_str(),
            job.salary_range.as_ref(),
            &job.description,
            job.application_url.as_ref(),
            now,
            now
        ],
    )?;

    Ok(Job {
        id,
        company_id: job.company_id.clone(),
        title: job.title.clone(),
        slug: job.slug.clone(),
        location: job.location.clone(),
        work_policy: job.work_policy,
        department: job.department.clone(),
        employment_type: job.employment_type,
        experience_level: job.experience_level,
        job_type: job.job_type,
        salary_range: job.salary_range.clone(),
        description: job.description.clone(),
        application_url: job.application_url.clone(),
        created_at: now,
        posted_days_ago: 0,
    })
}

pub async fn get_job(conn: AsyncDbConnection, id: &str) -> Result<Option<Job>> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp_millis();
    let job = conn
        .query_row(
            &format!("SELECT {} FROM jobs WHERE id = ?", JOB_COLUMNS),
            [id],
            |row| map_job(row, now),
        )
        .optional()?;
    Ok(job)
}

pub async fn get_job_by_slug(
    conn: AsyncDbConnection,
    company_id: &str,
    slug: &str,
) -> Result<Option<Job>> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp_millis();
    let job = conn
        .query_row(
            &format!(
                "SELECT {} FROM jobs WHERE company_id = ? AND slug = ?",
                JOB_COLUMNS
            ),
            [company_id, slug],
            |row| map_job(row, now),
        )
        .optional()?;
    Ok(job)
}

/// Jobs of one company, newest first.
pub async fn list_jobs(conn: AsyncDbConnection, company_id: &str) -> Result<Vec<Job>> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp_millis();
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM jobs WHERE company_id = ? ORDER BY created_at DESC, rowid DESC",
        JOB_COLUMNS
    ))?;
    let jobs = stmt
        .query_map([company_id], |row| map_job(row, now))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(jobs)
}

fn job_changes(patch: &UpdateJobRequest) -> Vec<(&'static str, Value)> {
    let mut changes = Vec::new();
    let text_fields = [
        ("title", &patch.title),
        ("slug", &patch.slug),
        ("location", &patch.location),
        ("department", &patch.department),
    ];
    for (column, value) in text_fields {
        if let Some(value) = value {
            changes.push((column, text(value.trim())));
        }
    }
    if let Some(value) = patch.work_policy {
        changes.push(("work_policy", text(value.as_str())));
    }
    if let Some(value) = patch.employment_type {
        changes.push(("employment_type", text(value.as_str())));
    }
    if let Some(value) = patch.experience_level {
        changes.push(("experience_level", text(value.as_str())));
    }
    if let Some(value) = patch.job_type {
        changes.push(("job_type", text(value.as_str())));
    }
    if let Some(value) = &patch.salary_range {
        changes.push(("salary_range", nullable_text(value)));
    }
    if let Some(value) = &patch.description {
        changes.push(("description", text(value.as_str())));
    }
    if let Some(value) = &patch.application_url {
        changes.push(("application_url", nullable_text(value)));
    }
    changes
}

pub async fn update_job(
    conn: AsyncDbConnection,
    id: &str,
    patch: &UpdateJobRequest,
) -> Result<Option<Job>> {
    {
        let locked = conn.lock().await?;
        let now = chrono::Utc::now().timestamp_millis();
        if update_columns(&locked, "jobs", id, job_changes(patch), now)? == 0 {
            return Ok(None);
        }
    }
    get_job(conn, id).await
}

/// Returns whether a row was deleted.
pub async fn delete_job(conn: AsyncDbConnection, id: &str) -> Result<bool> {
    let conn = conn.lock().await?;
    let deleted = conn.execute("DELETE FROM jobs WHERE id = ?", [id])?;
    Ok(deleted > 0)
}

/// `(id, description)` of every stored job.
pub async fn list_descriptions(conn: AsyncDbConnection) -> Result<Vec<(String, String)>> {
    let conn = conn.lock().await?;
    let mut stmt = conn.prepare("SELECT id, description FROM jobs ORDER BY created_at ASC")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
