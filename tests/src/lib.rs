//! # rflux Test Suite
//!
//! Cross-crate tests that need more than one subsystem.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/           # Store and launch throughput (criterion)
//! └── src/integration/
//!     ├── flows.rs       # Rocket lifecycle end to end
//!     ├── feed.rs        # Change feed ordering and seeding
//!     ├── concurrency.rs # Uniqueness and exactly-once launch under contention
//!     └── http.rs        # The same flows through the HTTP router
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rf-tests
//! cargo test -p rf-tests integration::concurrency::
//! cargo bench -p rf-tests
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod integration;
