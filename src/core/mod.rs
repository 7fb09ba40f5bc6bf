pub mod graphql;
pub mod runner;
pub mod scheduler;

pub use crate::domain::model::{CrmStatistics, CustomerRef, PendingOrder, RestockedProduct, TaskReport};
pub use crate::domain::ports::{ConfigProvider, LogSink, MaintenanceTask};
pub use crate::utils::error::Result;
