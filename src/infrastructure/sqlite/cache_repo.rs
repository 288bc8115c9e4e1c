use crate::domain::entities::ad::Ad;
use crate::domain::error::DomainError;
use crate::domain::ports::result_cache::{CacheEntry, CacheEntryInfo, ResultCache};
use crate::domain::values::platform::Platform;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub struct SqliteResultCache {
    conn: Mutex<Connection>,
}

impl SqliteResultCache {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl ResultCache for SqliteResultCache {
    fn read(&self, platform: Platform, query: &str) -> Result<Option<CacheEntry>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT ads, last_updated FROM search_cache
                 WHERE platform = ?1 AND query = ?2
                 ORDER BY last_updated DESC LIMIT 1",
            )
            .map_err(|e| DomainError::Store(format!("Cache read failed: {e}")))?;

        let row = stmt
            .query_row(params![platform.to_string(), query], |row| {
                let ads_json: String = row.get(0)?;
                let updated: String = row.get(1)?;
                Ok((ads_json, updated))
            })
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(DomainError::Store(format!("Cache read failed: {other}"))),
            })?;

        Ok(row.map(|(ads_json, updated)| {
            // An undeserializable payload degrades to an empty entry rather
            // than failing the lookup.
            let ads: Vec<Ad> = serde_json::from_str(&ads_json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, query, "stored cache payload unreadable");
                Vec::new()
            });
            CacheEntry {
                platform,
                query: query.to_string(),
                last_updated: parse_timestamp(&updated),
                ads,
            }
        }))
    }

    fn write(&self, platform: Platform, query: &str, ads: &[Ad]) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let payload = serde_json::to_string(ads)
            .map_err(|e| DomainError::Store(format!("Cache serialize failed: {e}")))?;
        conn.execute(
            "INSERT INTO search_cache (id, platform, query, ads, ad_count, last_updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                uuid::Uuid::new_v4().to_string(),
                platform.to_string(),
                query,
                payload,
                ads.len() as i64,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Store(format!("Cache write failed: {e}")))?;
        Ok(())
    }

    fn history(
        &self,
        platform: Option<Platform>,
        query: Option<&str>,
    ) -> Result<Vec<CacheEntryInfo>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut sql =
            String::from("SELECT platform, query, last_updated, ad_count FROM search_cache WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(p) = platform {
            sql.push_str(&format!(" AND platform = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(p.to_string()));
        }
        if let Some(q) = query {
            sql.push_str(&format!(" AND query = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(q.to_string()));
        }
        sql.push_str(" ORDER BY last_updated DESC");

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Store(format!("History query failed: {e}")))?;
        let rows = stmt
            .query_map(
                rusqlite::params_from_iter(params_vec.iter().map(|p| p.as_ref())),
                |row| {
                    let platform_str: String = row.get(0)?;
                    let query: String = row.get(1)?;
                    let updated: String = row.get(2)?;
                    let count: i64 = row.get(3)?;
                    Ok((platform_str, query, updated, count))
                },
            )
            .map_err(|e| DomainError::Store(format!("History query failed: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            let (platform_str, query, updated, count) =
                row.map_err(|e| DomainError::Store(format!("History row failed: {e}")))?;
            let platform = match platform_str.parse::<Platform>() {
                Ok(p) => p,
                Err(_) => {
                    tracing::warn!(platform = %platform_str, "skipping row with unknown platform");
                    continue;
                }
            };
            entries.push(CacheEntryInfo {
                platform,
                query,
                last_updated: parse_timestamp(&updated),
                ad_count: count.max(0) as usize,
            });
        }
        Ok(entries)
    }
}
