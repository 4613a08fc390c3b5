// # registrar-core
//
// Core library for domain registrar adapters.
//
// ## Architecture Overview
//
// - **Registrar**: Trait defining the generic registrar capability set
// - **HttpClient**: Trait for the injected HTTP transport
// - **RegistrableDomain**: The domain value object adapters read and write
// - **RegistrarRegistry**: Plugin-based registry for registrar adapters
// - **Error**: Error taxonomy shared by every adapter
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Vendor wire details live in adapter crates
// 2. **Stateless Adapters**: Only read-only credentials survive between calls
// 3. **Plugin-Based**: Adapters are registered dynamically, no hard-coded if-else
// 4. **Typed Gaps**: Unsupported operations are a distinct error variant

pub mod config;
pub mod domain;
pub mod error;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::{RegistrarConfig, PORKBUN_DEFAULT_API_URL};
pub use domain::RegistrableDomain;
pub use error::{Capability, Error, Result};
pub use registry::RegistrarRegistry;
pub use traits::{HttpClient, Registrar, RegistrarFactory};
