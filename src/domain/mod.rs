//! Domain Layer
//!
//! Catalog and cache concepts without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Publisher entries, descriptors, cache state, app profile
//! - `value_objects/` - Versions, update frequency, resource locations
//! - `services/` - Descriptor parsing and update scheduling
//! - `ports/` - Capability traits implemented by infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
