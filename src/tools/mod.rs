//! CTF Tool Implementations
//!
//! Everything callable through `tools/call` lives here, split into:
//!
//! - `executor.rs`: the one subprocess primitive (`sh -c`, timeout, denylist,
//!   fixed output template) behind the [`CommandRunner`] seam
//! - `validator.rs`: the denylist screen the executor consults before spawning
//! - `catalog.rs`: tool schemas, the closed [`ToolRequest`] enum, and dispatch
//! - `analyze.rs` / `crack.rs` / `scan.rs`: per-tool command planners
//!
//! Handlers never interpret tool output; they plan command strings up front,
//! run them in order, and hand back the rendered blocks.

pub mod analyze;
pub mod catalog;
pub mod crack;
pub mod executor;
pub mod scan;
pub mod validator;

pub use analyze::{analyze_file, AnalysisType};
pub use catalog::{catalog, dispatch, DispatchError, ToolDefaults, ToolRequest};
pub use crack::{crack_hash, detect_hash_type, hashcat_mode};
pub use executor::{CommandRunner, ExecutionOutcome, ShellExecutor, DEFAULT_TIMEOUT_SECS};
pub use scan::{network_scan, ScanType};
pub use validator::{CommandValidator, DANGEROUS_PATTERNS};
