//! SPP and Syahriah class pricing.
//!
//! Both fee families live in one store and share every operation; each call
//! is scoped to a [`FeeKind`], and a class of the other kind is treated as
//! missing.

use shared::{Entity, FeeClass, FeeClassForm, FeeKind, FormFields, FormMode, ListQuery, MutationResponse, Page};
use tracing::{info, warn};

use super::errors::{AdminError, AdminResult};
use crate::storage::Store;

#[derive(Clone)]
pub struct FeeClassService {
    store: Store<FeeClass>,
}

impl FeeClassService {
    pub fn new(store: Store<FeeClass>) -> Self {
        Self { store }
    }

    pub async fn list_classes(&self, kind: FeeKind, query: &ListQuery) -> Page<FeeClass> {
        info!("Listing {} classes: {:?}", kind.label(), query);
        let of_kind: Vec<FeeClass> = self
            .store
            .snapshot()
            .await
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect();
        shared::list_page(&of_kind, query)
    }

    pub async fn get_class(&self, kind: FeeKind, class_id: u64) -> AdminResult<FeeClass> {
        match self.store.get(class_id).await {
            Some(class) if class.kind == kind => Ok(class),
            _ => {
                warn!("{} class not found: {}", kind.label(), class_id);
                Err(AdminError::NotFound { entity: FeeClass::KIND, id: class_id })
            }
        }
    }

    pub async fn create_class(&self, kind: FeeKind, form: FeeClassForm) -> AdminResult<MutationResponse<FeeClass>> {
        info!("Creating {} class: {}", kind.label(), form.name);

        let draft = form.validate(FormMode::Add)?;
        let class = self
            .store
            .add(FeeClass {
                id: 0,
                kind,
                name: draft.name,
                monthly: draft.monthly,
                term_amount: draft.term_amount,
            })
            .await;

        info!("Created {} class: {} with ID: {}", kind.label(), class.name, class.id);
        Ok(MutationResponse {
            item: class,
            success_message: format!("Kelas {} berhasil ditambahkan", kind.label()),
        })
    }

    pub async fn update_class(
        &self,
        kind: FeeKind,
        class_id: u64,
        form: FeeClassForm,
    ) -> AdminResult<MutationResponse<FeeClass>> {
        info!("Updating {} class: {}", kind.label(), class_id);

        self.get_class(kind, class_id).await?;
        let draft = form.validate(FormMode::Edit(class_id))?;
        let class = self
            .store
            .update(
                class_id,
                FeeClass {
                    id: class_id,
                    kind,
                    name: draft.name,
                    monthly: draft.monthly,
                    term_amount: draft.term_amount,
                },
            )
            .await?;

        info!("Updated {} class: {} with ID: {}", kind.label(), class.name, class.id);
        Ok(MutationResponse {
            item: class,
            success_message: format!("Kelas {} berhasil diperbarui", kind.label()),
        })
    }

    pub async fn delete_class(&self, kind: FeeKind, class_id: u64) -> AdminResult<FeeClass> {
        info!("Deleting {} class: {}", kind.label(), class_id);
        self.get_class(kind, class_id).await?;
        Ok(self.store.remove(class_id).await?)
    }
}
