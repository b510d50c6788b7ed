//! Plain (non-polymorphic) wire entities: immutable records decoded from
//! one JSON object each, built through the same guarded constructors as
//! the family variants but resolved without a discriminator.

mod application;
mod health;
mod node;
mod service_error;

pub use application::{ApplicationInfo, ApplicationStatus};
pub use health::{HealthEvent, HealthState};
pub use node::{NodeInfo, NodeStatus};
pub use service_error::{ErrorEnvelope, ServiceError};
