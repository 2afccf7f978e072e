//! PC part compatibility engine
//!
//! Normalizes raw pc-part-dataset records into typed parts, derives CPU
//! sockets, estimates power draw and checks a build for known
//! incompatibilities. The engine functions are pure; [`db`] and [`ingest`]
//! add a SQLite-backed catalog and selection for the command-line front end.

pub mod catalog;
pub mod compat;
pub mod db;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod names;
pub mod power;
pub mod sample;
pub mod socket;

pub use catalog::normalize_catalog;
pub use compat::{Issue, check_build, compatible_candidates, is_candidate_compatible, validate_build};
pub use error::{Error, Result};
pub use models::{
    Build, Case, Category, Cpu, CpuCooler, Gpu, MediaType, Motherboard, Part, PartInfo,
    PowerSupply, Ram, Storage,
};
pub use names::normalize_name;
pub use power::{estimate_gpu_wattage, estimate_system_wattage, power_breakdown};
pub use socket::derive_socket;
