use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::CatalogServiceId;
use crate::validation::FieldErrors;

/// An admin-curated service category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogService {
    pub id: CatalogServiceId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogServiceForm {
    pub name: String,
    pub description: String,
}

impl CatalogServiceForm {
    /// Trimmed copy; fails when the name is blank.
    pub fn normalized(&self) -> Result<CatalogServiceForm, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Service name is required");
        errors.into_result()?;
        Ok(CatalogServiceForm {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims() {
        let form = CatalogServiceForm {
            name: "  Mutation of Records ".into(),
            description: " Revenue record updates ".into(),
        };
        let form = form.normalized().unwrap();
        assert_eq!(form.name, "Mutation of Records");
        assert_eq!(form.description, "Revenue record updates");
    }

    #[test]
    fn test_blank_name_rejected() {
        let form = CatalogServiceForm {
            name: "   ".into(),
            description: String::new(),
        };
        assert!(form.normalized().unwrap_err().contains("name"));
    }
}
