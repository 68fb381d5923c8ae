use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::catalog::Catalog;

/// Loads a catalog from a JSON file, or the built-in catalog when no path is
/// configured.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed reading catalog: {}", path.display()))?;
            let parsed: Catalog = serde_json::from_str(&data)
                .with_context(|| format!("failed parsing catalog JSON: {}", path.display()))?;
            info!(
                "loaded catalog from {} ({} questions, {} ministries)",
                path.display(),
                parsed.questions.len(),
                parsed.ministries.len()
            );
            parsed
        }
        None => Catalog::default(),
    };

    catalog.validate()?;
    for id in catalog.dangling_ministry_refs() {
        warn!("catalog references unknown ministry {id}; it will be ignored");
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::load_catalog;
    use crate::catalog::{Catalog, Gift};

    #[test]
    fn loads_builtin_without_path() {
        let catalog = load_catalog(None).expect("builtin catalog loads");
        assert_eq!(catalog, Catalog::default());
    }

    #[test]
    fn loads_substitute_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{
                "questions": [
                    {{"id": "q1", "text": "I like teaching", "kind": "likert",
                      "gift_weights": {{"teaching": 1.0}}}}
                ],
                "ministries": [
                    {{"id": "kids", "name": "Kids", "category": "next-generation"}}
                ]
            }}"#
        )
        .expect("write catalog");

        let catalog = load_catalog(Some(file.path())).expect("file catalog loads");
        assert_eq!(catalog.questions.len(), 1);
        assert_eq!(
            catalog.questions[0].gift_weights.get(&Gift::Teaching),
            Some(&1.0)
        );
        assert!(catalog.gift_ministries.is_empty());
    }

    #[test]
    fn rejects_empty_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"questions": [], "ministries": []}}"#).expect("write catalog");
        assert!(load_catalog(Some(file.path())).is_err());
    }
}
