use crate::config::AppConfig;
use rusqlite::Connection;

/// Open a connection against the configured sqlite file.
pub fn open(config: &AppConfig) -> rusqlite::Result<Connection> {
    Connection::open(config.db_path())
}

/// Create the schema if it does not exist yet. Called once at startup.
pub fn init(config: &AppConfig) -> rusqlite::Result<()> {
    let conn = open(config)?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS logos (
            id TEXT PRIMARY KEY,
            club_name TEXT NOT NULL,
            club_city TEXT,
            club_type TEXT,
            club_website TEXT,
            has_svg INTEGER DEFAULT 0,
            has_png INTEGER DEFAULT 0,
            primary_format TEXT DEFAULT 'png',
            file_size_svg INTEGER,
            file_size_png INTEGER,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}
