//! Album entity

use chrono::{DateTime, Utc};
use kernel::id::{AlbumId, markers};
use serde::{Deserialize, Serialize};

use crate::domain::resource::{BuildContext, Resource};
use crate::error::CatalogResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    /// Running time in minutes
    pub length: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of both `POST /album` and `PUT /album/{id}`
#[derive(Debug, Deserialize)]
pub struct AlbumBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub length: i32,
}

/// Validated album fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumFields {
    pub name: String,
    pub length: i32,
}

impl AlbumBody {
    fn validate(self) -> Result<AlbumFields, Vec<String>> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.push("name is required".to_string());
        }
        if self.length <= 0 {
            errors.push("length must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(AlbumFields {
                name,
                length: self.length,
            })
        } else {
            Err(errors)
        }
    }
}

impl Resource for Album {
    type Marker = markers::Album;
    type CreateBody = AlbumBody;
    type UpdateBody = AlbumBody;
    type Create = AlbumFields;
    type Update = AlbumFields;
    type View = Album;

    const NAME: &'static str = "album";
    const PATH: &'static str = "/album";

    fn validate_create(body: AlbumBody) -> Result<AlbumFields, Vec<String>> {
        body.validate()
    }

    fn validate_update(body: AlbumBody) -> Result<AlbumFields, Vec<String>> {
        body.validate()
    }

    fn build(input: AlbumFields, _ctx: &BuildContext, now: DateTime<Utc>) -> CatalogResult<Self> {
        Ok(Self {
            id: AlbumId::new(),
            name: input.name,
            length: input.length,
            created_at: now,
            updated_at: now,
        })
    }

    fn apply(&mut self, input: AlbumFields, now: DateTime<Utc>) {
        self.name = input.name;
        self.length = input.length;
        self.updated_at = now;
    }

    fn id(&self) -> AlbumId {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn view(&self) -> Album {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, length: i32) -> AlbumBody {
        AlbumBody {
            name: name.to_string(),
            length,
        }
    }

    #[test]
    fn test_validate_trims_name() {
        let fields = Album::validate_create(body("  St. Anger ", 75)).unwrap();
        assert_eq!(fields.name, "St. Anger");
        assert_eq!(fields.length, 75);
    }

    #[test]
    fn test_validate_collects_errors() {
        let errors = Album::validate_create(body(" ", 0)).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "name is required".to_string(),
                "length must be greater than 0".to_string()
            ]
        );
    }

    #[test]
    fn test_apply_keeps_identity() {
        let created = Utc::now();
        let mut album = Album::build(
            Album::validate_create(body("Load", 78)).unwrap(),
            &BuildContext::default(),
            created,
        )
        .unwrap();
        let id = album.id;

        let later = created + chrono::Duration::minutes(5);
        album.apply(Album::validate_update(body("Reload", 76)).unwrap(), later);

        assert_eq!(album.id, id);
        assert_eq!(album.name, "Reload");
        assert_eq!(album.length, 76);
        assert_eq!(album.created_at, created);
        assert_eq!(album.updated_at, later);
    }

    #[test]
    fn test_missing_fields_default() {
        let body: AlbumBody = serde_json::from_str("{}").unwrap();
        assert_eq!(Album::validate_create(body).unwrap_err().len(), 2);
    }
}
