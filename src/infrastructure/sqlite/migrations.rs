use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS search_cache (
            id TEXT PRIMARY KEY,
            platform TEXT NOT NULL,
            query TEXT NOT NULL,
            ads TEXT NOT NULL DEFAULT '[]',
            ad_count INTEGER NOT NULL DEFAULT 0,
            last_updated TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS profiles (
            id TEXT PRIMARY KEY,
            credits INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS credit_ledger (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            amount INTEGER NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_cache_key ON search_cache(platform, query, last_updated);
        CREATE INDEX IF NOT EXISTS idx_ledger_user ON credit_ledger(user_id);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
