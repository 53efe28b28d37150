use thiserror::Error;

use super::model::{Order, OrderId, Principal, ServiceType, UserProfile, UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Actor not available")]
    Unavailable,
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),
    #[error("backend rejected the call: {0}")]
    Rejected(String),
}

/// Typed remote interface of the service-order backend.
///
/// Every call is independent and may fail on its own; callers surface the
/// failure and move on.
#[allow(async_fn_in_trait)]
pub trait OrderBackend {
    async fn create_order(
        &self,
        service_type: ServiceType,
        details: String,
    ) -> Result<OrderId, BackendError>;
    async fn my_orders(&self) -> Result<Vec<Order>, BackendError>;
    async fn all_orders(&self) -> Result<Vec<Order>, BackendError>;
    async fn order(&self, id: OrderId) -> Result<Option<Order>, BackendError>;
    async fn available_service_types(&self) -> Result<Vec<ServiceType>, BackendError>;
    async fn caller_profile(&self) -> Result<Option<UserProfile>, BackendError>;
    async fn save_caller_profile(&self, profile: UserProfile) -> Result<(), BackendError>;
    async fn user_profile(&self, user: &Principal) -> Result<Option<UserProfile>, BackendError>;
    async fn caller_role(&self) -> Result<UserRole, BackendError>;
    async fn assign_role(&self, user: &Principal, role: UserRole) -> Result<(), BackendError>;
    async fn is_caller_admin(&self) -> Result<bool, BackendError>;
}
