//! Request handlers, grouped by page family.
//!
//! Every handler is a thin translation layer: decode the request, call one
//! [`TrackerStore`](aura_store::TrackerStore) method, render a view or
//! redirect. Mutations all follow form POST + redirect.

pub mod episodes;
pub mod home;
pub mod lookups;
pub mod medications;
pub mod tables;
