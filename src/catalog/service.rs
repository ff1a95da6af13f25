//! Catalog operations over the record store and the image store.
//!
//! Uploaded images are written before these operations run. The service owns
//! their cleanup: a failed create or update removes the new upload, a
//! successful image replacement removes the old file, and a delete removes
//! the record's image.

use std::sync::Arc;

use angle_catalog_common::{AngleId, Error, PageRequest, Result};
use angle_catalog_db::models::{timestamp_now, Angle};
use angle_catalog_db::queries::angles::{AngleFilter, Pagination};
use serde::Serialize;

use super::form::AngleForm;
use super::repository::AngleRepository;
use crate::config::CatalogConfig;
use crate::images::FileStore;

/// Behaviour switches for the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSettings {
    pub default_page_size: u32,
    pub purge_records_on_delete: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self::from(&CatalogConfig::default())
    }
}

impl From<&CatalogConfig> for CatalogSettings {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            default_page_size: config.default_page_size,
            purge_records_on_delete: config.purge_records_on_delete,
        }
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, Serialize)]
pub struct AnglePage {
    pub angles: Vec<Angle>,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
    #[serde(rename = "currentPage")]
    pub current_page: u32,
}

/// Angle operations with image-file lifecycle handling.
#[derive(Clone)]
pub struct AngleService {
    repo: Arc<dyn AngleRepository>,
    files: Arc<dyn FileStore>,
    settings: CatalogSettings,
}

impl AngleService {
    pub fn new(
        repo: Arc<dyn AngleRepository>,
        files: Arc<dyn FileStore>,
        settings: CatalogSettings,
    ) -> Self {
        Self {
            repo,
            files,
            settings,
        }
    }

    pub fn settings(&self) -> CatalogSettings {
        self.settings
    }

    pub fn files(&self) -> &Arc<dyn FileStore> {
        &self.files
    }

    /// Create a record from submitted fields and an already-stored upload.
    ///
    /// On any failure the upload is deleted before the error is returned.
    pub fn create(&self, form: AngleForm, upload: Option<String>) -> Result<Angle> {
        let result = form.into_new_angle().and_then(|mut angle| {
            angle.avatar_angle = upload.clone();
            self.repo.create(&angle)?;
            Ok(angle)
        });

        match result {
            Ok(angle) => {
                tracing::info!(id = %angle.id, image = ?angle.avatar_angle, "Created angle");
                Ok(angle)
            }
            Err(e) => {
                self.discard_upload(upload.as_deref());
                Err(e)
            }
        }
    }

    /// One page of the records matching `filter`.
    ///
    /// Pages past the end are empty rather than an error.
    pub fn list_page(&self, filter: &AngleFilter, page: PageRequest) -> Result<AnglePage> {
        let angles = self.repo.find(
            filter,
            Some(Pagination {
                offset: page.offset(),
                limit: page.limit(),
            }),
        )?;
        let count = self.repo.count(filter)?;

        Ok(AnglePage {
            angles,
            total_pages: page.total_pages(count),
            current_page: page.page(),
        })
    }

    /// Every record with status `available`, unpaginated.
    pub fn list_available(&self) -> Result<Vec<Angle>> {
        self.repo.find(&AngleFilter::available(), None)
    }

    pub fn get(&self, id: AngleId) -> Result<Angle> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found(format!("angle {}", id)))
    }

    /// Merge submitted fields over an existing record.
    ///
    /// With a new upload, the previous image file is deleted once the fields
    /// have been validated and before the record is saved. On any failure, including a missing record, the new
    /// upload is deleted.
    pub fn update(&self, id: AngleId, form: AngleForm, upload: Option<String>) -> Result<Angle> {
        match self.apply_update(id, form, upload.as_deref()) {
            Ok(angle) => {
                tracing::info!(id = %angle.id, image = ?angle.avatar_angle, "Updated angle");
                Ok(angle)
            }
            Err(e) => {
                self.discard_upload(upload.as_deref());
                Err(e)
            }
        }
    }

    fn apply_update(&self, id: AngleId, form: AngleForm, upload: Option<&str>) -> Result<Angle> {
        let mut angle = self.get(id)?;
        form.apply_to(&mut angle)?;

        if let (Some(_), Some(old)) = (upload, angle.avatar_angle.as_deref()) {
            if self.files.delete_if_exists(old)? {
                tracing::debug!(id = %id, file = old, "Removed replaced image");
            }
        }

        if let Some(new) = upload {
            angle.avatar_angle = Some(new.to_string());
        }
        angle.updated_at = timestamp_now();

        self.repo.update(&angle)?;
        Ok(angle)
    }

    /// Remove a record's image file.
    ///
    /// The record itself is only removed when `purge_records_on_delete` is
    /// set; otherwise it stays retrievable.
    pub fn delete(&self, id: AngleId) -> Result<()> {
        let angle = self.get(id)?;

        if let Some(ref image) = angle.avatar_angle {
            self.files.delete_if_exists(image)?;
        }

        if self.settings.purge_records_on_delete {
            self.repo.delete(id)?;
            tracing::info!(id = %id, "Deleted angle and its image");
        } else {
            tracing::info!(id = %id, "Deleted angle image; record retained");
        }

        Ok(())
    }

    fn discard_upload(&self, upload: Option<&str>) {
        let Some(name) = upload else {
            return;
        };

        match self.files.delete_if_exists(name) {
            Ok(true) => tracing::debug!(file = name, "Removed upload after failed request"),
            Ok(false) => {}
            Err(e) => tracing::warn!(file = name, error = %e, "Failed to remove upload"),
        }
    }
}
