use std::collections::BTreeMap;
use std::path::Path;

use chrono::Local;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::CloneError;
use crate::model::{Ingredient, RawRecipe, Recipe, Statistics};

/// Owns the cookbook schema: recipes plus their ingredients, with
/// duplicate suppression keyed on the recipe title.
pub struct RecipeStore {
    conn: Connection,
}

impl RecipeStore {
    pub fn open(path: &Path) -> Result<Self, CloneError> {
        let conn = Connection::open(path)?;
        let store = RecipeStore { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, CloneError> {
        let conn = Connection::open_in_memory()?;
        let store = RecipeStore { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), CloneError> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

             CREATE TABLE IF NOT EXISTS recipes (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 title TEXT NOT NULL UNIQUE,
                 imageUrl TEXT,
                 description TEXT,
                 steps TEXT,
                 durationInMinutes INTEGER,
                 type TEXT,
                 source TEXT,
                 cloned_at TEXT
             );

             CREATE TABLE IF NOT EXISTS ingredients (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 recipeId INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                 name TEXT NOT NULL,
                 isChecked INTEGER DEFAULT 0
             );

             CREATE INDEX IF NOT EXISTS idx_ingredients_recipe ON ingredients(recipeId);",
        )?;
        Ok(())
    }

    /// Insert a candidate and its ingredients as one transaction.
    ///
    /// Fails closed: a blank title or an already-stored title returns
    /// `Ok(false)` and writes nothing. The title pre-check and the insert
    /// run inside the same transaction, with the UNIQUE constraint on
    /// `title` backing them up, so a lost race surfaces as a caught
    /// conflict rather than a duplicate row.
    pub fn insert(&mut self, candidate: &RawRecipe, provenance: &str) -> Result<bool, CloneError> {
        let title = candidate.title.trim();
        if title.is_empty() {
            warn!("Skipping recipe: missing title");
            return Ok(false);
        }

        let tx = self.conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM recipes WHERE title = ?1",
                params![title],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            warn!("Recipe already exists: {title}");
            return Ok(false);
        }

        let steps_json = serde_json::to_string(&candidate.steps)?;
        let inserted = tx.execute(
            "INSERT INTO recipes
             (title, imageUrl, description, steps, durationInMinutes, type, source, cloned_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                title,
                candidate.image_url,
                candidate.description,
                steps_json,
                candidate.duration_in_minutes.max(0),
                candidate.recipe_type,
                provenance,
                Local::now().to_rfc3339(),
            ],
        );
        if let Err(e) = inserted {
            if is_constraint_violation(&e) {
                warn!("Recipe already exists: {title}");
                return Ok(false);
            }
            return Err(e.into());
        }

        let recipe_id = tx.last_insert_rowid();
        for name in &candidate.ingredients {
            tx.execute(
                "INSERT INTO ingredients (recipeId, name, isChecked) VALUES (?1, ?2, 0)",
                params![recipe_id, name],
            )?;
        }

        tx.commit()?;
        info!(
            "Recipe added: {title} (id {recipe_id}, {} ingredients)",
            candidate.ingredients.len()
        );
        Ok(true)
    }

    /// All stored recipes with their ingredients, ordered by insertion.
    pub fn list_all(&self) -> Result<Vec<Recipe>, CloneError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, imageUrl, description, steps, durationInMinutes,
                    type, source, cloned_at
             FROM recipes ORDER BY id",
        )?;
        let mut recipes = stmt
            .query_map([], |row| {
                let steps_json: String = row.get(4)?;
                Ok(Recipe {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    image_url: row.get(2)?,
                    description: row.get(3)?,
                    steps: serde_json::from_str(&steps_json).unwrap_or_default(),
                    duration_in_minutes: row.get(5)?,
                    recipe_type: row.get(6)?,
                    source: row.get(7)?,
                    cloned_at: row.get(8)?,
                    ingredients: Vec::new(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut ing_stmt = self.conn.prepare(
            "SELECT id, recipeId, name, isChecked FROM ingredients WHERE recipeId = ?1 ORDER BY id",
        )?;
        for recipe in &mut recipes {
            recipe.ingredients = ing_stmt
                .query_map(params![recipe.id], |row| {
                    Ok(Ingredient {
                        id: row.get(0)?,
                        recipe_id: row.get(1)?,
                        name: row.get(2)?,
                        is_checked: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
        }

        Ok(recipes)
    }

    /// Aggregate counts: totals plus per-type and per-provenance breakdowns.
    pub fn statistics(&self) -> Result<Statistics, CloneError> {
        let total_recipes: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        let total_ingredients: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM ingredients", [], |row| row.get(0))?;

        Ok(Statistics {
            total_recipes,
            by_type: self.grouped_counts("type")?,
            by_source: self.grouped_counts("source")?,
            total_ingredients,
        })
    }

    fn grouped_counts(&self, column: &str) -> Result<BTreeMap<String, i64>, CloneError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {column}, COUNT(*) FROM recipes GROUP BY {column}"
        ))?;
        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<BTreeMap<String, i64>, _>>()?;
        Ok(counts)
    }

    /// Delete every ingredient then every recipe. Irreversible; the caller
    /// is responsible for confirming with the user first.
    pub fn clear_all(&self) -> Result<(), CloneError> {
        self.conn
            .execute_batch("DELETE FROM ingredients; DELETE FROM recipes;")?;
        warn!("All recipes and ingredients have been deleted");
        Ok(())
    }
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
