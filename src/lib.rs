//! `ZentraSite` - data layer for a landscaping and lawn-care business website
//!
//! This crate provides the persistence shim behind the public brochure site and its
//! admin back-office: typed records for services, projects, gallery images, testimonials,
//! slider images, bookings and the admin credential, stored in a hosted relational backend
//! when one is configured and in a seeded local key/value store otherwise.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
    clippy::result_large_err,          // reqwest::Error inflates the error enum
)]

/// Configuration management for storage, remote backend and notifications
pub mod config;
/// Core operations - data-access shim, admin session, lifecycle and site queries
pub mod core;
/// SeaORM entity definitions for the local database
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Record types, table identities and patches
pub mod models;
/// Outbound email notifications
pub mod notify;
/// Hosted relational backend client
pub mod remote;
/// Local fallback store and its key/value backends
pub mod storage;

#[cfg(test)]
pub mod test_utils;
