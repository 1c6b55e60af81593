use anyhow::Result;
use rusqlite::{OptionalExtension, Row};
use rusqlite::types::Value;
use shared_types::{BrandConfig, Company, PageSection, UpdateCompanyRequest};

use crate::database::{json_column, text, update_columns, AsyncDbConnection};

const COMPANY_COLUMNS: &str = "id, slug, name, brand_config, page_sections";

fn map_company(row: &Row) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get(0)?,
        slug: row.get(1)?,
        name: row.get(2)?,
        brand_config: json_column(row, 3)?,
        page_sections: json_column(row, 4)?,
    })
}

pub async fn insert_company(
    conn: AsyncDbConnection,
    name: &str,
    slug: &str,
    brand_config: &BrandConfig,
    page_sections: &[PageSection],
) -> Result<Company> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp_millis();
    let id = uuid::Uuid::new_v4().to_string();

    conn.execute(
        "INSERT INTO companies (id, slug, name, brand_config, page_sections, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            &id,
            slug,
            name,
            serde_json::to_string(brand_config)?,
            serde_json::to_string(page_sections)?,
            now,
            now
        ],
    )?;

    Ok(Company {
        id,
        slug: slug.to_string(),
        name: name.to_string(),
        brand_config: brand_config.clone(),
        page_sections: page_sections.to_vec(),
    })
}

pub async fn get_company(conn: AsyncDbConnection, id: &str) -> Result<Option<Company>> {
    let conn = conn.lock().await?;
    let company = conn
        .query_row(
            &format!("SELECT {} FROM companies WHERE id = ?", COMPANY_COLUMNS),
            [id],
            map_company,
        )
        .optional()?;
    Ok(company)
}

pub async fn get_company_by_slug(conn: AsyncDbConnection, slug: &str) -> Result<Option<Company>> {
    let conn = conn.lock().await?;
    let company = conn
        .query_row(
            &format!("SELECT {} FROM companies WHERE slug = ?", COMPANY_COLUMNS),
            [slug],
            map_company,
        )
        .optional()?;
    Ok(company)
}

pub async fn list_companies(conn: AsyncDbConnection) -> Result<Vec<Company>> {
    let conn = conn.lock().await?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM companies ORDER BY created_at ASC",
        COMPANY_COLUMNS
    ))?;
    let companies = stmt
        .query_map([], map_company)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(companies)
}

/// Column values for the fields present in `patch`.
fn company_changes(patch: &UpdateCompanyRequest) -> Result<Vec<(&'static str, Value)>> {
    let mut changes = Vec::new();
    if let Some(name) = &patch.name {
        changes.push(("name", text(name.trim())));
    }
    if let Some(slug) = &patch.slug {
        changes.push(("slug", text(slug.trim())));
    }
    if let Some(brand_config) = &patch.brand_config {
        changes.push(("brand_config", text(serde_json::to_string(brand_config)?)));
    }
    if let Some(page_sections) = &patch.page_sections {
        changes.push(("page_sections", text(serde_json::to_string(page_sections)?)));
    }
    Ok(changes)
}

/// Returns the updated company, or `None` when no row has this id.
pub async fn update_company(
    conn: AsyncDbConnection,
    id: &str,
    patch: &UpdateCompanyRequest,
) -> Result<Option<Company>> {
    let changes = company_changes(patch)?;
    {
        let locked = conn.lock().await?;
        let now = chrono::Utc::now().timestamp_millis();
        if update_columns(&locked, "companies", id, changes, now)? == 0 {
            return Ok(None);
        }
    }
    get_company(conn, id).await
}
