use anyhow::Result;
use rusqlite::OptionalExtension;
use shared_types::{AdminCompanySummary, AdminProfile};

use crate::database::AsyncDbConnection;

pub async fn get_admin_profile(
    conn: AsyncDbConnection,
    user_id: &str,
) -> Result<Option<AdminProfile>> {
    let conn = conn.lock().await?;

    let profile = conn
        .query_row(
            "SELECT a.id, a.email, a.full_name, a.company_id, c.id, c.name, c.slug
             FROM admin_users a
             LEFT JOIN companies c ON c.id = a.company_id
             WHERE a.id = ?",
            [user_id],
            |row| {
                let company = match row.get::<_, Option<String>>(4)? {
                    Some(id) => Some(AdminCompanySummary {
                        id,
                        name: row.get(5)?,
                        slug: row.get(6)?,
                    }),
                    None => None,
                };
                Ok(AdminProfile {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    full_name: row.get(2)?,
                    company_id: row.get(3)?,
                    company,
                })
            },
        )
        .optional()?;

    Ok(profile)
}

/// Creates or refreshes a profile. A `None` company keeps any existing link.
pub async fn upsert_admin_profile(
    conn: AsyncDbConnection,
    user_id: &str,
    email: &str,
    full_name: &str,
    company_id: Option<&str>,
) -> Result<()> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp_millis();

    conn.execute(
        "INSERT INTO admin_users (id, email, full_name, company_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)
         ON CONFLICT(id) DO UPDATE SET
            email = excluded.email,
            full_name = excluded.full_name,
            company_id = COALESCE(excluded.company_id, admin_users.company_id),
            updated_at = excluded.updated_at",
        rusqlite::params![user_id, email, full_name, company_id, now],
    )?;

    Ok(())
}

/// Returns whether a profile with this id existed.
pub async fn link_admin_to_company(
    conn: AsyncDbConnection,
    user_id: &str,
    company_id: &str,
) -> Result<bool> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp_millis();
    let updated = conn.execute(
        "UPDATE admin_users SET company_id = ?, updated_at = ? WHERE id = ?",
        rusqlite::params![company_id, now, user_id],
    )?;
    Ok(updated > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::companies::insert_company;
    use crate::database::test_database;
    use shared_types::BrandConfig;

    #[tokio::test]
    async fn test_profile_without_company() {
        let (_dir, db) = test_database();
        let conn = db.async_connection.clone();

        upsert_admin_profile(conn.clone(), "u1", "ada@acme.test", "Ada", None)
            .await
            .unwrap();
        let profile = get_admin_profile(conn.clone(), "u1").await.unwrap().unwrap();
        assert_eq!(profile.full_name, "Ada");
        assert!(profile.company.is_none());
        assert!(get_admin_profile(conn, "u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_link_and_upsert_keeps_link() {
        let (_dir, db) = test_database();
        let conn = db.async_connection.clone();
        let company = insert_company(conn.clone(), "Acme", "acme", &BrandConfig::default(), &[])
            .await
            .unwrap();

        upsert_admin_profile(conn.clone(), "u1", "ada@acme.test", "Ada", None)
            .await
            .unwrap();
        assert!(link_admin_to_company(conn.clone(), "u1", &company.id).await.unwrap());
        assert!(!link_admin_to_company(conn.clone(), "nobody", &company.id).await.unwrap());

        upsert_admin_profile(conn.clone(), "u1", "ada@acme.test", "Ada L.", None)
            .await
            .unwrap();
        let profile = get_admin_profile(conn, "u1").await.unwrap().unwrap();
        assert_eq!(profile.full_name, "Ada L.");
        assert_eq!(
            profile.company,
            Some(AdminCompanySummary {
                id: company.id.clone(),
                name: "Acme".to_string(),
                slug: "acme".to_string(),
            })
        );
        assert_eq!(profile.company_id, Some(company.id));
    }
}
