use crate::seeds::{SeedEntry, SeedSource};
use crate::ScrapeError;
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// A validated, optionally schema-qualified table name
///
/// Each part must be a plain identifier (`[A-Za-z0-9_]+`), which keeps the
/// name safe to splice into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    schema: Option<String>,
    table: String,
}

impl TableName {
    /// Parses `table` or `schema.table`
    ///
    /// # Examples
    ///
    /// ```
    /// use manomano_scraper::seeds::TableName;
    ///
    /// assert!(TableName::parse("filtered.manomano_category").is_some());
    /// assert!(TableName::parse("manomano_category").is_some());
    /// assert!(TableName::parse("a.b.c").is_none());
    /// assert!(TableName::parse("x; DROP TABLE y").is_none());
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let parts: Vec<&str> = name.split('.').collect();
        if !parts.iter().all(|part| is_identifier(part)) {
            return None;
        }

        match parts.as_slice() {
            [table] => Some(Self {
                schema: None,
                table: table.to_string(),
            }),
            [schema, table] => Some(Self {
                schema: Some(schema.to_string()),
                table: table.to_string(),
            }),
            _ => None,
        }
    }

    /// Schema the table lives in, if any other than `main`
    fn attached_schema(&self) -> Option<&str> {
        self.schema.as_deref().filter(|schema| *schema != "main")
    }

    fn qualified(&self) -> String {
        match &self.schema {
            Some(schema) => format!("\"{}\".\"{}\"", schema, self.table),
            None => format!("\"{}\"", self.table),
        }
    }
}

fn is_identifier(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Reads category URLs from the `url` column of a SQLite table
///
/// A schema-qualified name such as `filtered.manomano_category` treats the
/// database file as the `filtered` schema: the file is attached under that
/// name and the table is read from it. Rows come back in rowid order so a
/// given `[start, end)` slice is stable across runs; NULL and blank URLs
/// are skipped.
pub struct SqliteSeedSource {
    path: PathBuf,
    table: TableName,
}

impl SqliteSeedSource {
    pub fn new(path: &Path, table: TableName) -> Self {
        Self {
            path: path.to_path_buf(),
            table,
        }
    }

    fn connect(&self) -> Result<Connection, ScrapeError> {
        if !self.path.exists() {
            return Err(ScrapeError::Seeds(format!(
                "seed database {} does not exist",
                self.path.display()
            )));
        }

        match self.table.attached_schema() {
            Some(schema) => {
                let conn = Connection::open_in_memory()?;
                conn.execute(
                    &format!("ATTACH DATABASE ?1 AS \"{}\"", schema),
                    params![self.path.to_string_lossy().into_owned()],
                )?;
                Ok(conn)
            }
            None => Ok(Connection::open_with_flags(
                &self.path,
                OpenFlags::SQLITE_OPEN_READ_ONLY,
            )?),
        }
    }
}

impl SeedSource for SqliteSeedSource {
    fn load_seeds(&self) -> Result<Vec<SeedEntry>, ScrapeError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT url FROM {} ORDER BY rowid",
            self.table.qualified()
        ))?;

        let urls = stmt
            .query_map([], |row| row.get::<_, Option<String>>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let seeds: Vec<SeedEntry> = urls
            .into_iter()
            .flatten()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .map(|url| SeedEntry { url })
            .collect();

        tracing::info!(
            "Loaded {} seed URLs from {} ({})",
            seeds.len(),
            self.table.qualified(),
            self.path.display()
        );
        Ok(seeds)
    }
}
