//! An in-process test double for a service-registry HTTP API.
//!
//! The double answers the registry's register, update, list, lookup,
//! delete and ping endpoints from an in-memory store, and health checks a
//! service when it is registered.
//!
//! ```no_run
//! use registry_double::RegistryDouble;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let double = RegistryDouble::new();
//! let running = double.start().await?;
//! println!("registry double at {}", running.url());
//! running.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod health;
pub mod registration;
pub mod routes;
pub mod server;
pub mod store;

pub use config::{DoubleConfig, UnmatchedRoutes};
pub use envelope::{BaseResponse, MultiRegistrationsResponse, RegistrationResponse};
pub use error::{DoubleError, Result};
pub use health::HealthChecker;
pub use registration::{AddRegistrationRequest, HealthCheck, Registration, ServiceStatus};
pub use routes::Route;
pub use server::{RegistryDouble, RegistryDoubleBuilder, RunningDouble};
pub use store::ServiceStore;
