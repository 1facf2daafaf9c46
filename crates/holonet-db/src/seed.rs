use anyhow::{Result, anyhow};
use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use tracing::info;

use crate::Database;
use crate::models::{NewCharacter, NewPlanet};
use crate::queries::{insert_character, insert_planet, insert_user};

const DEMO_EMAIL: &str = "luke@holonet.example";
const DEMO_PASSWORD: &str = "may-the-force-be-with-you";

fn opt(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn demo_characters() -> Vec<NewCharacter> {
    [
        ("Luke Skywalker", "male", "19BBY", "172", "blond", "blue"),
        ("C-3PO", "n/a", "112BBY", "167", "n/a", "yellow"),
        ("R2-D2", "n/a", "33BBY", "96", "n/a", "red"),
        ("Darth Vader", "male", "41.9BBY", "202", "none", "yellow"),
        ("Leia Organa", "female", "19BBY", "150", "brown", "brown"),
    ]
    .into_iter()
    .map(|(name, gender, birth_year, height, hair, eyes)| NewCharacter {
        id: 0,
        name: name.to_string(),
        gender: opt(gender),
        birth_year: opt(birth_year),
        height: opt(height),
        hair_color: opt(hair),
        eye_color: opt(eyes),
    })
    .collect()
}

fn demo_planets() -> Vec<NewPlanet> {
    [
        ("Tatooine", "arid", "desert", "200000", "10465"),
        ("Alderaan", "temperate", "grasslands, mountains", "2000000000", "12500"),
        ("Yavin IV", "temperate, tropical", "jungle, rainforests", "1000", "10200"),
        ("Hoth", "frozen", "tundra, ice caves, mountain ranges", "unknown", "7200"),
        ("Dagobah", "murky", "swamp, jungles", "unknown", "8900"),
    ]
    .into_iter()
    .map(|(name, climate, terrain, population, diameter)| NewPlanet {
        id: 0,
        name: name.to_string(),
        climate: opt(climate),
        terrain: opt(terrain),
        population: opt(population),
        diameter: opt(diameter),
    })
    .collect()
}

impl Database {
    /// Fills an empty database with one user and a small catalog.
    /// Returns false and touches nothing if any user already exists.
    pub fn seed_demo(&self) -> Result<bool> {
        // Hash before taking the write lock.
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
            .map_err(|e| anyhow!("Failed to hash demo password: {}", e))?
            .to_string();

        self.with_tx(|tx| {
            let users: i64 = tx.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
            if users > 0 {
                return Ok(false);
            }

            insert_user(tx, DEMO_EMAIL, &password_hash, true)?;
            for character in demo_characters() {
                insert_character(tx, &character)?;
            }
            for planet in demo_planets() {
                insert_planet(tx, &planet)?;
            }

            info!("Seeded demo catalog for {}", DEMO_EMAIL);
            Ok::<_, anyhow::Error>(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_once() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.seed_demo().unwrap());
        assert!(!db.seed_demo().unwrap());

        assert_eq!(db.list_users().unwrap().len(), 1);
        assert_eq!(db.list_characters().unwrap().len(), 5);
        assert_eq!(db.get_planet(4).unwrap().unwrap().name, "Hoth");
    }

    #[test]
    fn demo_password_is_hashed() {
        let db = Database::open_in_memory().unwrap();
        db.seed_demo().unwrap();

        let user = db.get_user(1).unwrap().unwrap();
        assert_ne!(user.password, DEMO_PASSWORD);
        assert!(user.password.starts_with("$argon2"));
    }
}
