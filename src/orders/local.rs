use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::Mutex;

use super::{
    backend::{BackendError, OrderBackend},
    model::{Order, OrderId, Principal, ServiceType, Time, UserProfile, UserRole},
};

#[derive(Debug, Default)]
struct Ledger {
    orders: Vec<Order>,
    profiles: HashMap<Principal, UserProfile>,
    roles: HashMap<Principal, UserRole>,
    next_id: u64,
}

impl Ledger {
    fn role_of(&self, principal: &Principal) -> UserRole {
        self.roles
            .get(principal)
            .copied()
            .unwrap_or(UserRole::Guest)
    }
}

/// In-process backend: one shared ledger, one handle per caller.
///
/// The principal that creates the ledger is its admin. Other callers start
/// as guests and become users when they first save a profile. Nothing
/// outlives the process.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    caller: Principal,
    ledger: Arc<Mutex<Ledger>>,
    clock: fn() -> Time,
}

fn wall_clock() -> Time {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

impl LocalBackend {
    #[must_use]
    pub fn new(owner: Principal) -> Self {
        let mut ledger = Ledger::default();
        ledger.roles.insert(owner.clone(), UserRole::Admin);
        Self {
            caller: owner,
            ledger: Arc::new(Mutex::new(ledger)),
            clock: wall_clock,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> Time) -> Self {
        self.clock = clock;
        self
    }

    /// Another caller's view of the same ledger.
    #[must_use]
    pub fn for_caller(&self, caller: Principal) -> Self {
        Self {
            caller,
            ledger: Arc::clone(&self.ledger),
            clock: self.clock,
        }
    }

    #[must_use]
    pub fn caller(&self) -> &Principal {
        &self.caller
    }
}

impl OrderBackend for LocalBackend {
    async fn create_order(
        &self,
        service_type: ServiceType,
        details: String,
    ) -> Result<OrderId, BackendError> {
        let mut ledger = self.ledger.lock().await;
        if ledger.role_of(&self.caller) == UserRole::Guest {
            return Err(BackendError::Unauthorized("only users can create orders"));
        }
        let id = OrderId(ledger.next_id);
        ledger.next_id += 1;
        ledger.orders.push(Order {
            id,
            service_type,
            owner: self.caller.clone(),
            timestamp: (self.clock)(),
            details,
        });
        Ok(id)
    }

    async fn my_orders(&self) -> Result<Vec<Order>, BackendError> {
        let ledger = self.ledger.lock().await;
        if ledger.role_of(&self.caller) == UserRole::Guest {
            return Err(BackendError::Unauthorized("only users can view orders"));
        }
        Ok(ledger
            .orders
            .iter()
            .filter(|order| order.owner == self.caller)
            .cloned()
            .collect())
    }

    async fn all_orders(&self) -> Result<Vec<Order>, BackendError> {
        let ledger = self.ledger.lock().await;
        if ledger.role_of(&self.caller) != UserRole::Admin {
            return Err(BackendError::Unauthorized("only admins can view all orders"));
        }
        Ok(ledger.orders.clone())
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>, BackendError> {
        let ledger = self.ledger.lock().await;
        let Some(order) = ledger.orders.iter().find(|order| order.id == id) else {
            return Ok(None);
        };
        if order.owner != self.caller && ledger.role_of(&self.caller) != UserRole::Admin {
            return Err(BackendError::Unauthorized("can only view your own orders"));
        }
        Ok(Some(order.clone()))
    }

    async fn available_service_types(&self) -> Result<Vec<ServiceType>, BackendError> {
        Ok(vec![
            ServiceType::Repair,
            ServiceType::Cleaning,
            ServiceType::ConsumableReplacement,
            ServiceType::Other(String::new()),
        ])
    }

    async fn caller_profile(&self) -> Result<Option<UserProfile>, BackendError> {
        let ledger = self.ledger.lock().await;
        Ok(ledger.profiles.get(&self.caller).cloned())
    }

    async fn save_caller_profile(&self, profile: UserProfile) -> Result<(), BackendError> {
        if profile.name.trim().is_empty() {
            return Err(BackendError::Rejected("profile name is empty".to_string()));
        }
        let mut ledger = self.ledger.lock().await;
        if ledger.role_of(&self.caller) == UserRole::Guest {
            ledger.roles.insert(self.caller.clone(), UserRole::User);
        }
        ledger.profiles.insert(self.caller.clone(), profile);
        Ok(())
    }

    async fn user_profile(&self, user: &Principal) -> Result<Option<UserProfile>, BackendError> {
        let ledger = self.ledger.lock().await;
        if *user != self.caller && ledger.role_of(&self.caller) != UserRole::Admin {
            return Err(BackendError::Unauthorized("can only view your own profile"));
        }
        Ok(ledger.profiles.get(user).cloned())
    }

    async fn caller_role(&self) -> Result<UserRole, BackendError> {
        Ok(self.ledger.lock().await.role_of(&self.caller))
    }

    async fn assign_role(&self, user: &Principal, role: UserRole) -> Result<(), BackendError> {
        let mut ledger = self.ledger.lock().await;
        if ledger.role_of(&self.caller) != UserRole::Admin {
            return Err(BackendError::Unauthorized("only admins can assign roles"));
        }
        ledger.roles.insert(user.clone(), role);
        Ok(())
    }

    async fn is_caller_admin(&self) -> Result<bool, BackendError> {
        Ok(self.ledger.lock().await.role_of(&self.caller) == UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_clock() -> Time {
        1_700_000_000_000_000_000
    }

    fn ledger() -> LocalBackend {
        LocalBackend::new(Principal::new("owner")).with_clock(fixed_clock)
    }

    #[tokio::test]
    async fn owner_is_admin_and_others_start_as_guests() {
        let owner = ledger();
        let visitor = owner.for_caller(Principal::new("visitor"));

        assert_eq!(owner.caller_role().await, Ok(UserRole::Admin));
        assert_eq!(visitor.caller_role().await, Ok(UserRole::Guest));
        assert_eq!(visitor.is_caller_admin().await, Ok(false));
    }

    #[tokio::test]
    async fn saving_a_profile_registers_a_guest_as_user() {
        let visitor = ledger().for_caller(Principal::new("visitor"));
        visitor
            .save_caller_profile(UserProfile {
                name: "Vera".to_string(),
            })
            .await
            .expect("save profile");

        assert_eq!(visitor.caller_role().await, Ok(UserRole::User));
        assert_eq!(
            visitor.caller_profile().await,
            Ok(Some(UserProfile {
                name: "Vera".to_string()
            }))
        );
    }

    #[tokio::test]
    async fn blank_profile_names_are_rejected() {
        let owner = ledger();
        let err = owner
            .save_caller_profile(UserProfile {
                name: "   ".to_string(),
            })
            .await
            .expect_err("blank name");
        assert!(matches!(err, BackendError::Rejected(_)));
    }

    #[tokio::test]
    async fn guests_cannot_create_orders() {
        let visitor = ledger().for_caller(Principal::new("visitor"));
        let err = visitor
            .create_order(ServiceType::Repair, "Leaky tap".to_string())
            .await
            .expect_err("guest");
        assert!(matches!(err, BackendError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn orders_are_numbered_and_scoped_to_their_owner() {
        let owner = ledger();
        let alice = owner.for_caller(Principal::new("alice"));
        owner
            .assign_role(alice.caller(), UserRole::User)
            .await
            .expect("assign");

        let first = owner
            .create_order(ServiceType::Cleaning, "Lobby".to_string())
            .await
            .expect("create");
        let second = alice
            .create_order(ServiceType::Other("Gutters".to_string()), "North".to_string())
            .await
            .expect("create");
        assert_eq!((first, second), (OrderId(0), OrderId(1)));

        let mine = alice.my_orders().await.expect("my orders");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].owner, Principal::new("alice"));
        assert_eq!(mine[0].timestamp, fixed_clock());

        assert_eq!(owner.all_orders().await.map(|o| o.len()), Ok(2));
        assert!(matches!(
            alice.all_orders().await,
            Err(BackendError::Unauthorized(_))
        ));
        assert!(matches!(
            alice.order(OrderId(0)).await,
            Err(BackendError::Unauthorized(_))
        ));
        assert_eq!(owner.order(OrderId(1)).await.map(|o| o.is_some()), Ok(true));
        assert_eq!(alice.order(OrderId(42)).await, Ok(None));
    }

    #[tokio::test]
    async fn only_admins_assign_roles() {
        let owner = ledger();
        let bob = owner.for_caller(Principal::new("bob"));
        let err = bob
            .assign_role(&Principal::new("bob"), UserRole::Admin)
            .await
            .expect_err("not admin");
        assert!(matches!(err, BackendError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn service_types_include_free_text_other() {
        let types = ledger()
            .available_service_types()
            .await
            .expect("service types");
        assert_eq!(types.len(), 4);
        assert!(matches!(types[3], ServiceType::Other(_)));
    }
}
