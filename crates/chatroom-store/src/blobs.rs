use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{bad_column, decode_ts, encode_ts, Blob};

impl Database {
    pub fn insert_blob(&self, blob: &Blob) -> Result<()> {
        self.conn().execute(
            "INSERT INTO blobs (id, path, url, file_size, blake3_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                blob.id.to_string(),
                blob.path,
                blob.url,
                blob.file_size,
                blob.blake3_hash,
                encode_ts(&blob.created_at),
            ],
        )?;
        Ok(())
    }

    pub fn get_blob_by_path(&self, path: &str) -> Result<Blob> {
        self.conn()
            .query_row(
                "SELECT id, path, url, file_size, blake3_hash, created_at
                 FROM blobs
                 WHERE path = ?1",
                params![path],
                row_to_blob,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }
}

fn row_to_blob(row: &rusqlite::Row<'_>) -> rusqlite::Result<Blob> {
    let id_str: String = row.get(0)?;
    let path: String = row.get(1)?;
    let url: String = row.get(2)?;
    let file_size: i64 = row.get(3)?;
    let blake3_hash: String = row.get(4)?;
    let created_str: String = row.get(5)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| bad_column(0, e))?;
    let created_at = decode_ts(&created_str).map_err(|e| bad_column(5, e))?;

    Ok(Blob {
        id,
        path,
        url,
        file_size,
        blake3_hash,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_blob_catalogue() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        let blob = Blob {
            id: Uuid::new_v4(),
            path: "avatars/abc-me.png".into(),
            url: "file:///tmp/avatars/abc-me.png".into(),
            file_size: 42,
            blake3_hash: "00".repeat(32),
            created_at: Utc::now(),
        };
        db.insert_blob(&blob).unwrap();

        let stored = db.get_blob_by_path("avatars/abc-me.png").unwrap();
        assert_eq!(stored.id, blob.id);
        assert_eq!(stored.url, blob.url);
        assert_eq!(stored.file_size, 42);
        assert!(matches!(db.get_blob_by_path("nope"), Err(StoreError::NotFound)));
    }
}
