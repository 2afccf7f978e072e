//! Database schema and operations

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::models::{Build, Category, Part};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Normalized catalog, one row per unique part
        CREATE TABLE IF NOT EXISTS parts (
            category TEXT NOT NULL,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            manufacturer TEXT,
            position INTEGER NOT NULL,
            data TEXT NOT NULL,
            PRIMARY KEY (category, name)
        );

        -- Current selection, at most one part per slot
        CREATE TABLE IF NOT EXISTS selection (
            category TEXT PRIMARY KEY,
            part_name TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_parts_category_position ON parts(category, position);
        "#,
    )?;
    Ok(())
}

/// Replace the stored catalog of one category, keeping the given order
pub fn replace_category(conn: &mut Connection, category: Category, parts: &[Part]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM parts WHERE category = ?1", [category.key()])?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO parts (category, name, price, manufacturer, position, data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (position, part) in parts.iter().enumerate() {
            let info = part.info();
            let data = serde_json::to_string(part)?;
            stmt.execute((
                category.key(),
                &info.name,
                info.price,
                &info.manufacturer,
                position as i64,
                data,
            ))?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Clear the whole catalog and the selection
pub fn clear_catalog(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM selection;
        DELETE FROM parts;
        "#,
    )?;
    Ok(())
}

fn decode(data: String) -> Result<Part> {
    Ok(serde_json::from_str(&data)?)
}

/// All parts of a category in catalog order
pub fn list_parts(conn: &Connection, category: Category) -> Result<Vec<Part>> {
    let mut stmt =
        conn.prepare("SELECT data FROM parts WHERE category = ?1 ORDER BY position")?;

    let rows = stmt.query_map([category.key()], |row| row.get::<_, String>(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(decode(row?)?);
    }
    Ok(results)
}

/// Look up a part by its exact (trimmed) name
pub fn find_part(conn: &Connection, category: Category, name: &str) -> Result<Option<Part>> {
    let data: Option<String> = conn
        .query_row(
            "SELECT data FROM parts WHERE category = ?1 AND name = ?2",
            (category.key(), name.trim()),
            |row| row.get(0),
        )
        .optional()?;
    data.map(decode).transpose()
}

/// Number of stored parts per category, in category order
pub fn count_parts(conn: &Connection) -> Result<Vec<(Category, usize)>> {
    let mut stmt = conn.prepare("SELECT COUNT(*) FROM parts WHERE category = ?1")?;
    let mut counts = Vec::new();
    for category in Category::ALL {
        let n: i64 = stmt.query_row([category.key()], |row| row.get(0))?;
        counts.push((category, n as usize));
    }
    Ok(counts)
}

/// Put a catalog part into the stored selection
pub fn select_part(conn: &Connection, category: Category, name: &str) -> Result<Part> {
    let part = find_part(conn, category, name)?.ok_or_else(|| Error::PartNotFound {
        category,
        name: name.to_string(),
    })?;
    conn.execute(
        "INSERT OR REPLACE INTO selection (category, part_name) VALUES (?1, ?2)",
        (category.key(), part.name()),
    )?;
    Ok(part)
}

pub fn remove_selection(conn: &Connection, category: Category) -> Result<()> {
    conn.execute("DELETE FROM selection WHERE category = ?1", [category.key()])?;
    Ok(())
}

pub fn clear_selection(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM selection", [])?;
    Ok(())
}

/// Rebuild the stored selection against the current catalog
///
/// Selections whose part is gone from the catalog are skipped.
pub fn load_build(conn: &Connection) -> Result<Build> {
    let mut stmt = conn.prepare("SELECT category, part_name FROM selection")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

    let mut build = Build::new();
    for row in rows {
        let (key, name) = row?;
        let category: Category = match key.parse() {
            Ok(category) => category,
            Err(_) => {
                tracing::warn!(category = %key, "ignoring selection with unknown category");
                continue;
            }
        };
        match find_part(conn, category, &name)? {
            Some(part) => build.select(part),
            None => tracing::warn!(%category, name = %name, "selected part no longer in catalog"),
        }
    }
    Ok(build)
}
