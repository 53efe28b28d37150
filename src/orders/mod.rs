//! Service-order boundary: domain types, the backend trait, and the call
//! site that turns backend results into notices.

pub mod backend;
pub mod desk;
pub mod draft;
pub mod local;
pub mod model;
pub mod notice;

pub use backend::{BackendError, OrderBackend};
pub use desk::OrderDesk;
pub use draft::{OrderDraft, ServiceChoice};
pub use local::LocalBackend;
pub use model::{Order, OrderId, Principal, ServiceType, UserProfile, UserRole};
pub use notice::{Notice, NoticeLevel, Notices};
