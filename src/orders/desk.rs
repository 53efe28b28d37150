use log::{info, warn};

use super::{
    backend::{BackendError, OrderBackend},
    draft::OrderDraft,
    model::{Order, OrderId, UserProfile, UserRole},
    notice::Notices,
};

pub const ORDER_CREATED: &str = "Order created successfully!";
pub const ORDER_FAILED: &str = "Failed to create order. Please try again.";
pub const ORDERS_LOAD_FAILED: &str = "Failed to load orders. Please try again.";
pub const PROFILE_SAVED: &str = "Profile saved";
pub const PROFILE_FAILED: &str = "Failed to save profile. Please try again.";

/// Cached result of one backend read.
#[derive(Debug, Clone)]
pub struct Query<T> {
    data: Option<T>,
    error: Option<String>,
    stale: bool,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            stale: true,
        }
    }
}

impl<T> Query<T> {
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    fn settle(&mut self, result: Result<T, String>) {
        self.stale = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }
}

/// Where the UI talks to the backend.
///
/// Each call stands alone: a failure becomes a notice or a query error and
/// nothing is retried.
#[derive(Debug)]
pub struct OrderDesk<B> {
    backend: Option<B>,
    orders: Query<Vec<Order>>,
    profile: Query<Option<UserProfile>>,
    role: Query<UserRole>,
    notices: Notices,
}

impl<B: OrderBackend> OrderDesk<B> {
    pub fn new(backend: Option<B>) -> Self {
        Self {
            backend,
            orders: Query::default(),
            profile: Query::default(),
            role: Query::default(),
            notices: Notices::default(),
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    /// Validates and submits the draft. Clears it on success.
    pub async fn submit(&mut self, draft: &mut OrderDraft) -> Option<OrderId> {
        let request = match draft.validate() {
            Ok(request) => request,
            Err(err) => {
                self.notices.error(err.to_string());
                return None;
            }
        };

        let result = match &self.backend {
            Some(backend) => {
                backend
                    .create_order(request.service_type, request.details)
                    .await
            }
            None => Err(BackendError::Unavailable),
        };

        match result {
            Ok(id) => {
                info!("created order {id}");
                self.notices.success(ORDER_CREATED);
                draft.clear();
                self.orders.invalidate();
                self.refresh_orders().await;
                Some(id)
            }
            Err(err) => {
                warn!("order creation failed: {err}");
                self.notices.error(ORDER_FAILED);
                None
            }
        }
    }

    pub async fn refresh_orders(&mut self) {
        let result = match &self.backend {
            Some(backend) => backend.my_orders().await,
            None => Ok(Vec::new()),
        };
        self.orders.settle(result.map_err(|err| {
            warn!("loading orders failed: {err}");
            ORDERS_LOAD_FAILED.to_string()
        }));
    }

    pub async fn load_profile(&mut self) {
        let result = match &self.backend {
            Some(backend) => backend.caller_profile().await,
            None => Err(BackendError::Unavailable),
        };
        self.profile.settle(result.map_err(|err| {
            warn!("loading profile failed: {err}");
            err.to_string()
        }));
    }

    pub async fn save_profile(&mut self, profile: UserProfile) -> bool {
        let result = match &self.backend {
            Some(backend) => backend.save_caller_profile(profile).await,
            None => Err(BackendError::Unavailable),
        };
        match result {
            Ok(()) => {
                self.notices.success(PROFILE_SAVED);
                self.profile.invalidate();
                self.load_profile().await;
                self.role.invalidate();
                self.load_role().await;
                true
            }
            Err(err) => {
                warn!("saving profile failed: {err}");
                self.notices.error(PROFILE_FAILED);
                false
            }
        }
    }

    pub async fn load_role(&mut self) {
        let result = match &self.backend {
            Some(backend) => backend.caller_role().await,
            None => Err(BackendError::Unavailable),
        };
        self.role.settle(result.map_err(|err| err.to_string()));
    }

    #[must_use]
    pub fn orders(&self) -> &Query<Vec<Order>> {
        &self.orders
    }

    #[must_use]
    pub fn profile(&self) -> &Query<Option<UserProfile>> {
        &self.profile
    }

    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.role.data().copied()
    }

    #[must_use]
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }
}
