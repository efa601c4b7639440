//! Local-file attraction sources.
//!
//! A dump file holds the same keyed JSON object the endpoint returns, so a
//! saved response can stand in for the backend.

use crate::error::Result;
use crate::source::AttractionSource;
use async_trait::async_trait;
use data_loader::{ASSOC_ATTRACTIONS_FILE, Attraction, EH_PROPERTIES_FILE, parse_attractions};
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads one keyed attraction list from disk.
#[derive(Debug, Clone)]
pub struct FileAttractionSource {
    name: String,
    path: PathBuf,
}

impl FileAttractionSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Both dump files of a data directory.
    pub fn pair(data_dir: &Path) -> (Self, Self) {
        (
            Self::new("ehproperties", data_dir.join(EH_PROPERTIES_FILE)),
            Self::new("assocattractions", data_dir.join(ASSOC_ATTRACTIONS_FILE)),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AttractionSource for FileAttractionSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Attraction>> {
        let origin = self.path.display().to_string();
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| data_loader::DataLoadError::Io {
                path: origin.clone(),
                source,
            })?;
        let attractions = parse_attractions(&text, &origin)?;
        info!("Read {} attractions from {}", attractions.len(), origin);
        Ok(attractions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use data_loader::{DataLoadError, Ownership};
    use std::fs;

    #[tokio::test]
    async fn test_fetch_from_dump_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ASSOC_ATTRACTIONS_FILE),
            r#"{"77": {"name": "Chysauster", "ownership": "assocAttraction", "popular": true}}"#,
        )
        .unwrap();

        let (_, assoc) = FileAttractionSource::pair(dir.path());
        let attractions = assoc.fetch().await.unwrap();

        assert_eq!(assoc.name(), "assocattractions");
        assert_eq!(attractions.len(), 1);
        assert_eq!(attractions[0].ownership, Ownership::AssocAttraction);
        assert!(attractions[0].popular);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (eh, _) = FileAttractionSource::pair(dir.path());

        assert!(matches!(
            eh.fetch().await,
            Err(SourceError::Decode(DataLoadError::Io { .. }))
        ));
    }
}
