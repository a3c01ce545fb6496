//! Record store used by the analytics endpoint.

use async_trait::async_trait;
use tracing::debug;

use super::{dedup_by_id, EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{MatchRecord, Project};

/// Supplies match records and projects for one TCG.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// All match records in the TCG, across every project.
    async fn load_matches(&self, tcg_id: &str) -> Result<Vec<MatchRecord>, StorageError>;

    /// All projects in the TCG.
    async fn load_projects(&self, tcg_id: &str) -> Result<Vec<Project>, StorageError>;
}

/// [`MatchStore`] over the JSONL data lake.
#[derive(Debug, Clone)]
pub struct JsonlMatchStore {
    config: StorageConfig,
}

impl JsonlMatchStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Append records, skipping any whose id is already stored.
    pub fn append_matches(
        &self,
        tcg_id: &str,
        records: Vec<MatchRecord>,
    ) -> Result<usize, StorageError> {
        let existing =
            JsonlReader::<MatchRecord>::for_entity(&self.config, EntityType::Match, tcg_id)?
                .read_all()?;
        let fresh = new_only(existing, records, |r| r.id.as_str());

        JsonlWriter::for_entity(&self.config, EntityType::Match, tcg_id)?.append_batch(&fresh)
    }

    /// Append projects, skipping any whose id is already stored.
    pub fn append_projects(
        &self,
        tcg_id: &str,
        projects: Vec<Project>,
    ) -> Result<usize, StorageError> {
        let existing =
            JsonlReader::<Project>::for_entity(&self.config, EntityType::Project, tcg_id)?
                .read_all()?;
        let fresh = new_only(existing, projects, |p| p.id.as_str());

        JsonlWriter::for_entity(&self.config, EntityType::Project, tcg_id)?.append_batch(&fresh)
    }

    fn read_blocking<T>(&self, entity: EntityType, tcg_id: &str) -> Result<Vec<T>, StorageError>
    where
        T: serde::de::DeserializeOwned,
    {
        JsonlReader::<T>::for_entity(&self.config, entity, tcg_id)?.read_all()
    }
}

/// Items from `incoming` whose id appears neither in `existing` nor earlier in `incoming`.
fn new_only<T, F>(existing: Vec<T>, incoming: Vec<T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let skip = existing.len();
    let mut all = existing;
    all.extend(incoming);
    dedup_by_id(all, id).into_iter().skip(skip).collect()
}

#[async_trait]
impl MatchStore for JsonlMatchStore {
    async fn load_matches(&self, tcg_id: &str) -> Result<Vec<MatchRecord>, StorageError> {
        let store = self.clone();
        let tcg = tcg_id.to_string();
        let records = tokio::task::spawn_blocking(move || {
            store.read_blocking::<MatchRecord>(EntityType::Match, &tcg)
        })
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

        let records = dedup_by_id(records, |r| r.id.as_str());
        debug!("Loaded {} match records for {}", records.len(), tcg_id);
        Ok(records)
    }

    async fn load_projects(&self, tcg_id: &str) -> Result<Vec<Project>, StorageError> {
        let store = self.clone();
        let tcg = tcg_id.to_string();
        let projects = tokio::task::spawn_blocking(move || {
            store.read_blocking::<Project>(EntityType::Project, &tcg)
        })
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

        Ok(dedup_by_id(projects, |p| p.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchResult;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn record(deck: &str, hour: u32) -> MatchRecord {
        MatchRecord::new(
            "p1".into(),
            deck,
            "Jinx",
            MatchResult::Win,
            Utc.with_ymd_and_hms(2026, 10, 1, hour, 0, 0).unwrap(),
        )
    }

    fn store(dir: &TempDir) -> JsonlMatchStore {
        JsonlMatchStore::new(StorageConfig::new(dir.path().to_path_buf()))
    }

    #[tokio::test]
    async fn test_empty_tcg_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(store.load_matches("riftbound").await.unwrap().is_empty());
        assert!(store.load_projects("riftbound").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let added = store
            .append_matches("riftbound", vec![record("Ahri", 9), record("Annie", 10)])
            .unwrap();
        assert_eq!(added, 2);

        let loaded = store.load_matches("riftbound").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(store.load_matches("lorcana").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reimport_skips_known_ids() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.append_matches("riftbound", vec![record("Ahri", 9)]).unwrap();
        let added = store
            .append_matches(
                "riftbound",
                vec![record("Ahri", 9), record("Ahri", 11), record("Ahri", 11)],
            )
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(store.load_matches("riftbound").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_projects_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let project =
            Project::new("p1".into(), "riftbound".into(), "Locals").with_owners(vec!["u1".into()]);

        store
            .append_projects("riftbound", vec![project.clone(), project.clone()])
            .unwrap();

        assert_eq!(store.load_projects("riftbound").await.unwrap(), vec![project]);
    }

    #[tokio::test]
    async fn test_import_rows_without_id() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let file = dir.path().join("export.jsonl");
        let row = |deck: &str| {
            format!(
                concat!(
                    r#"{{"myDeckName":"{}","oppDeckName":"Jinx","result":"win","#,
                    r#""createdAt":"2026-10-01T09:00:00Z","ownerProjectId":"p1"}}"#,
                ),
                deck
            )
        };
        std::fs::write(&file, format!("{}\n{}\n", row("Ahri"), row("Annie"))).unwrap();

        let incoming = JsonlReader::<MatchRecord>::new(file.clone()).read_all().unwrap();
        assert_eq!(store.append_matches("riftbound", incoming).unwrap(), 2);

        // same file again adds nothing
        let again = JsonlReader::<MatchRecord>::new(file).read_all().unwrap();
        assert_eq!(store.append_matches("riftbound", again).unwrap(), 0);

        let loaded = store.load_matches("riftbound").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, record("Ahri", 9).id);
    }

    #[tokio::test]
    async fn test_escaping_tcg_id_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(matches!(
            store.append_matches("../outside", vec![record("Ahri", 9)]),
            Err(StorageError::InvalidTcgId(_))
        ));
        assert!(matches!(
            store.load_matches("../outside").await,
            Err(StorageError::InvalidTcgId(_))
        ));
        assert!(!dir.path().join("outside").exists());
    }

    #[test]
    fn test_new_only() {
        let fresh = new_only(
            vec!["a".to_string(), "b".to_string()],
            vec!["b".to_string(), "c".to_string(), "c".to_string()],
            |s| s.as_str(),
        );
        assert_eq!(fresh, vec!["c".to_string()]);
    }
}
