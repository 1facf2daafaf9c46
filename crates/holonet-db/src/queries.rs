use crate::Database;
use crate::models::{CharacterRow, NewCharacter, NewPlanet, PlanetRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row};

const USER_COLUMNS: &str = "id, email, password, is_active, created_at";
const CHARACTER_COLUMNS: &str = "id, name, gender, birth_year, height, hair_color, eye_color";
const PLANET_COLUMNS: &str = "id, name, climate, terrain, population, diameter";

impl Database {
    // -- Users --

    pub fn create_user(&self, email: &str, password_hash: &str, is_active: bool) -> Result<i64> {
        self.with_conn(|conn| Ok(insert_user(conn, email, password_hash, is_active)?))
    }

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
            let rows = stmt
                .query_map([], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| Ok(query_user_by_id(conn, id)?))
    }

    // -- Characters --

    pub fn create_character(&self, character: &NewCharacter) -> Result<i64> {
        self.with_conn(|conn| Ok(insert_character(conn, character)?))
    }

    pub fn list_characters(&self) -> Result<Vec<CharacterRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {CHARACTER_COLUMNS} FROM characters ORDER BY id"))?;
            let rows = stmt
                .query_map([], character_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_character(&self, id: i64) -> Result<Option<CharacterRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {CHARACTER_COLUMNS} FROM characters WHERE id = ?1"),
                    [id],
                    character_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    // -- Planets --

    pub fn create_planet(&self, planet: &NewPlanet) -> Result<i64> {
        self.with_conn(|conn| Ok(insert_planet(conn, planet)?))
    }

    pub fn list_planets(&self) -> Result<Vec<PlanetRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {PLANET_COLUMNS} FROM planets ORDER BY id"))?;
            let rows = stmt
                .query_map([], planet_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_planet(&self, id: i64) -> Result<Option<PlanetRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {PLANET_COLUMNS} FROM planets WHERE id = ?1"),
                    [id],
                    planet_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }
}

pub(crate) fn query_user_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<UserRow>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [id],
        user_from_row,
    )
    .optional()
}

pub(crate) fn insert_user(
    conn: &Connection,
    email: &str,
    password_hash: &str,
    is_active: bool,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (email, password, is_active) VALUES (?1, ?2, ?3)",
        rusqlite::params![email, password_hash, is_active],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn insert_character(conn: &Connection, c: &NewCharacter) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO characters (name, gender, birth_year, height, hair_color, eye_color)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![c.name, c.gender, c.birth_year, c.height, c.hair_color, c.eye_color],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn insert_planet(conn: &Connection, p: &NewPlanet) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO planets (name, climate, terrain, population, diameter)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![p.name, p.climate, p.terrain, p.population, p.diameter],
    )?;
    Ok(conn.last_insert_rowid())
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password: row.get(2)?,
        is_active: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn character_from_row(row: &Row<'_>) -> rusqlite::Result<CharacterRow> {
    Ok(CharacterRow {
        id: row.get(0)?,
        name: row.get(1)?,
        gender: row.get(2)?,
        birth_year: row.get(3)?,
        height: row.get(4)?,
        hair_color: row.get(5)?,
        eye_color: row.get(6)?,
    })
}

fn planet_from_row(row: &Row<'_>) -> rusqlite::Result<PlanetRow> {
    Ok(PlanetRow {
        id: row.get(0)?,
        name: row.get(1)?,
        climate: row.get(2)?,
        terrain: row.get(3)?,
        population: row.get(4)?,
        diameter: row.get(5)?,
    })
}
