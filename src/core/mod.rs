pub mod admin;
pub mod binder;
pub mod date;

pub use crate::domain::model::{ElementHandle, PointInTime, ResourceId, ResourceKind};
pub use crate::domain::ports::{Browser, ConfigProvider, DeleteTransport};
pub use crate::utils::error::Result;
