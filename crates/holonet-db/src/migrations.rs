use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (catalog and favorites)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                email       TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                is_active   INTEGER NOT NULL DEFAULT 1,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE characters (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                gender      TEXT,
                birth_year  TEXT,
                height      TEXT,
                hair_color  TEXT,
                eye_color   TEXT
            );

            CREATE TABLE planets (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                climate     TEXT,
                terrain     TEXT,
                population  TEXT,
                diameter    TEXT
            );

            CREATE TABLE character_favorites (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id       INTEGER NOT NULL REFERENCES users(id),
                character_id  INTEGER NOT NULL REFERENCES characters(id),
                created_at    TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(user_id, character_id)
            );

            CREATE INDEX idx_character_favorites_character
                ON character_favorites(character_id);

            CREATE TABLE planet_favorites (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL REFERENCES users(id),
                planet_id   INTEGER NOT NULL REFERENCES planets(id),
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(user_id, planet_id)
            );

            CREATE INDEX idx_planet_favorites_planet
                ON planet_favorites(planet_id);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rerun_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
