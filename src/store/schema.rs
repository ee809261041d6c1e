//! SQLite schema definition

/// SQL schema for the fact database
pub const SCHEMA_SQL: &str = r#"
-- Cat facts: text is unique within the category
CREATE TABLE IF NOT EXISTS cat_facts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fact TEXT NOT NULL UNIQUE
);

-- Metadata derived for each cat fact, one row per fact
CREATE TABLE IF NOT EXISTS cat_fact_metadata (
    cat_fact_id INTEGER PRIMARY KEY REFERENCES cat_facts(id),
    fact_length INTEGER NOT NULL,
    insertion_time TEXT NOT NULL
);

-- Dog facts: text is unique within the category
CREATE TABLE IF NOT EXISTS dog_facts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fact TEXT NOT NULL UNIQUE
);
"#;
