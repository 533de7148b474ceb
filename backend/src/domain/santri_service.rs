use shared::{Entity, FormFields, FormMode, ListQuery, MutationResponse, Page, Santri, SantriForm};
use tracing::{info, warn};

use super::errors::{AdminError, AdminResult};
use crate::storage::Store;

/// Service for managing the santri roster
#[derive(Clone)]
pub struct SantriService {
    store: Store<Santri>,
}

impl SantriService {
    pub fn new(store: Store<Santri>) -> Self {
        Self { store }
    }

    pub async fn list_santri(&self, query: &ListQuery) -> Page<Santri> {
        info!("Listing santri: {:?}", query);
        let snapshot = self.store.snapshot().await;
        shared::list_page(&snapshot, query)
    }

    pub async fn get_santri(&self, santri_id: u64) -> AdminResult<Santri> {
        match self.store.get(santri_id).await {
            Some(santri) => Ok(santri),
            None => {
                warn!("Santri not found: {}", santri_id);
                Err(AdminError::NotFound { entity: Santri::KIND, id: santri_id })
            }
        }
    }

    pub async fn create_santri(&self, form: SantriForm) -> AdminResult<MutationResponse<Santri>> {
        info!("Creating santri: nis={}, name={}", form.nis, form.name);

        let santri = form.validate(FormMode::Add)?;
        self.ensure_unique_nis(&santri.nis, None).await?;

        let santri = self.store.add(santri).await;
        info!("Created santri: {} with ID: {}", santri.name, santri.id);

        Ok(MutationResponse {
            item: santri,
            success_message: "Santri berhasil ditambahkan".to_string(),
        })
    }

    pub async fn update_santri(&self, santri_id: u64, form: SantriForm) -> AdminResult<MutationResponse<Santri>> {
        info!("Updating santri: {}", santri_id);

        self.get_santri(santri_id).await?;
        let santri = form.validate(FormMode::Edit(santri_id))?;
        self.ensure_unique_nis(&santri.nis, Some(santri_id)).await?;

        let santri = self.store.update(santri_id, santri).await?;
        info!("Updated santri: {} with ID: {}", santri.name, santri.id);

        Ok(MutationResponse {
            item: santri,
            success_message: "Data santri berhasil diperbarui".to_string(),
        })
    }

    pub async fn delete_santri(&self, santri_id: u64) -> AdminResult<Santri> {
        info!("Deleting santri: {}", santri_id);
        let removed = self.store.remove(santri_id).await?;
        info!("Deleted santri: {} with ID: {}", removed.name, removed.id);
        Ok(removed)
    }

    async fn ensure_unique_nis(&self, nis: &str, except: Option<u64>) -> AdminResult<()> {
        let snapshot = self.store.snapshot().await;
        let taken = snapshot
            .iter()
            .any(|s| s.nis == nis && Some(s.id) != except);
        if taken {
            warn!("Duplicate NIS rejected: {}", nis);
            return Err(AdminError::Conflict(format!("NIS {} sudah terdaftar", nis)));
        }
        Ok(())
    }
}
