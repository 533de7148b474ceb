use shared::{
    Entity, FormFields, FormMode, LaundryPaymentClass, LaundryPaymentClassForm, LaundryService, LaundryServiceForm,
    ListQuery, MutationResponse, Page,
};
use tracing::{info, warn};

use super::errors::{AdminError, AdminResult};
use crate::storage::Store;

/// Laundry services offered and the subscription classes for laundry
#[derive(Clone)]
pub struct LaundryCatalogService {
    services: Store<LaundryService>,
    payment_classes: Store<LaundryPaymentClass>,
}

impl LaundryCatalogService {
    pub fn new(services: Store<LaundryService>, payment_classes: Store<LaundryPaymentClass>) -> Self {
        Self { services, payment_classes }
    }

    pub async fn list_services(&self, query: &ListQuery) -> Page<LaundryService> {
        info!("Listing laundry services: {:?}", query);
        shared::list_page(&self.services.snapshot().await, query)
    }

    pub async fn get_service(&self, service_id: u64) -> AdminResult<LaundryService> {
        self.services.get(service_id).await.ok_or_else(|| {
            warn!("Laundry service not found: {}", service_id);
            AdminError::NotFound { entity: LaundryService::KIND, id: service_id }
        })
    }

    pub async fn create_service(&self, form: LaundryServiceForm) -> AdminResult<MutationResponse<LaundryService>> {
        info!("Creating laundry service: {}", form.name);
        let service = self.services.add(form.validate(FormMode::Add)?).await;
        info!("Created laundry service: {} with ID: {}", service.name, service.id);

        Ok(MutationResponse {
            item: service,
            success_message: "Layanan laundry berhasil ditambahkan".to_string(),
        })
    }

    pub async fn update_service(
        &self,
        service_id: u64,
        form: LaundryServiceForm,
    ) -> AdminResult<MutationResponse<LaundryService>> {
        info!("Updating laundry service: {}", service_id);
        self.get_service(service_id).await?;
        let service = form.validate(FormMode::Edit(service_id))?;
        let service = self.services.update(service_id, service).await?;

        Ok(MutationResponse {
            item: service,
            success_message: "Layanan laundry berhasil diperbarui".to_string(),
        })
    }

    pub async fn delete_service(&self, service_id: u64) -> AdminResult<LaundryService> {
        info!("Deleting laundry service: {}", service_id);
        Ok(self.services.remove(service_id).await?)
    }

    pub async fn list_payment_classes(&self, query: &ListQuery) -> Page<LaundryPaymentClass> {
        info!("Listing laundry payment classes: {:?}", query);
        shared::list_page(&self.payment_classes.snapshot().await, query)
    }

    pub async fn get_payment_class(&self, class_id: u64) -> AdminResult<LaundryPaymentClass> {
        self.payment_classes
            .get(class_id)
            .await
            .ok_or(AdminError::NotFound { entity: LaundryPaymentClass::KIND, id: class_id })
    }

    pub async fn create_payment_class(
        &self,
        form: LaundryPaymentClassForm,
    ) -> AdminResult<MutationResponse<LaundryPaymentClass>> {
        info!("Creating laundry payment class: {}", form.name);
        let class = self.payment_classes.add(form.validate(FormMode::Add)?).await;

        Ok(MutationResponse {
            item: class,
            success_message: "Kelas pembayaran laundry berhasil ditambahkan".to_string(),
        })
    }

    pub async fn update_payment_class(
        &self,
        class_id: u64,
        form: LaundryPaymentClassForm,
    ) -> AdminResult<MutationResponse<LaundryPaymentClass>> {
        info!("Updating laundry payment class: {}", class_id);
        self.get_payment_class(class_id).await?;
        let class = form.validate(FormMode::Edit(class_id))?;
        let class = self.payment_classes.update(class_id, class).await?;

        Ok(MutationResponse {
            item: class,
            success_message: "Kelas pembayaran laundry berhasil diperbarui".to_string(),
        })
    }

    pub async fn delete_payment_class(&self, class_id: u64) -> AdminResult<LaundryPaymentClass> {
        info!("Deleting laundry payment class: {}", class_id);
        Ok(self.payment_classes.remove(class_id).await?)
    }
}
