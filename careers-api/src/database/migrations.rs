use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS companies (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            brand_config TEXT NOT NULL,
            page_sections TEXT NOT NULL DEFAULT '[]',
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS jobs (
            id TEXT PRIMARY KEY,
            company_id TEXT NOT NULL,
            title TEXT NOT NULL,
            slug TEXT NOT NULL,
            location TEXT NOT NULL,
            work_policy TEXT NOT NULL CHECK (work_policy IN ('Remote', 'Hybrid', 'On-site')),
            department TEXT NOT NULL,
            employment_type TEXT NOT NULL
                CHECK (employment_type IN ('Full-time', 'Part-time', 'Contract', 'Internship')),
            experience_level TEXT NOT NULL
                CHECK (experience_level IN ('Junior', 'Mid-level', 'Senior', 'Lead', 'Executive')),
            job_type TEXT NOT NULL CHECK (job_type IN ('Permanent', 'Temporary')),
            salary_range TEXT,
            description TEXT NOT NULL DEFAULT '',
            application_url TEXT,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL,
            UNIQUE (company_id, slug),
            FOREIGN KEY (company_id) REFERENCES companies (id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_jobs_company_created
            ON jobs(company_id, created_at)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS admin_users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            full_name TEXT NOT NULL,
            company_id TEXT,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL,
            FOREIGN KEY (company_id) REFERENCES companies (id)
        )",
        [],
    )?;

    Ok(())
}
