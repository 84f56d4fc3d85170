//! Execution-context classification for lockwatch.
//!
//! Lock-state signals differ by the kind of process asking. This crate
//! answers "what kind of process am I?" so the resolver can pick a strategy:
//! - Main application process
//! - Restricted app extension (background extension, share sheet, ...)
//! - Ultra-restricted extension (widget / timeline-driven)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  context.rs  - ExecutionContext, BundleMetadata, classify   │
//! │  provider.rs - BundleProvider trait + fixed provider        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  platform/bundle.rs - Info.plist discovery from the exe     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use lockwatch_context::{classify_with, platform::ExecutableBundleProvider};
//!
//! let context = classify_with(&ExecutableBundleProvider::new());
//! println!("running as {context}");
//! ```

mod context;
mod provider;
mod state;

pub mod platform;

pub use context::{classify, BundleMetadata, ExecutionContext, WIDGET_EXTENSION_POINTS};
pub use provider::{classify_with, BundleProvider, FixedBundleProvider};
pub use state::ScreenState;
