//! # Typed Bus Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── fixtures.rs       # Shared event types, tags and recorders
//! │   └── integration/      # Cross-module scenarios
//! │       ├── end_to_end.rs
//! │       ├── dispatch_semantics.rs
//! │       └── manager_flows.rs
//! └── benches/
//!     └── dispatch_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p typed-bus-tests
//!
//! # By category
//! cargo test -p typed-bus-tests integration::manager_flows::
//!
//! # Benchmarks
//! cargo bench -p typed-bus-tests
//! ```
