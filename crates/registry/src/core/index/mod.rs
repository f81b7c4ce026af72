#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Descriptor storage engine.
//!
//! # Purpose
//!
//! The `index` subsystem stores registered descriptors in per-key buckets and publishes them
//! atomically. It knows nothing about descriptor shapes: buckets hold type-erased `Arc<I>`
//! handles whose type is fixed by the owning [`Key`](crate::Key).
//!
//! # Mental Model
//!
//! 1. **Registration:** [`SyntaxRegistry`] asks the key for its propagation chain (the key and
//!    every ancestor, each with the descriptor converted to that key's payload type).
//! 2. **Publication:** The chain is applied to a private copy of the current catalog as one
//!    ticketed registration, and the copy is swapped in with a CAS loop.
//! 3. **Consumption:** Readers load the current catalog once per query, or pin it with
//!    [`SyntaxRegistry::snapshot`] for several queries.
//! 4. **Removal:** Unregistration finds the most recent matching ticket in the key's bucket and
//!    evicts that ticket from every bucket at once.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`SyntaxRegistry`] | Atomic container for one catalog. |
//! | [`Snapshot`] | Pinned catalog version for consistent multi-key reads. |
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of the current catalog).
//! - **Writes:** Lock-free with linearizability (CAS retry loop).
//!
//! # Invariants
//!
//! - Must register into every bucket of the propagation chain or none.
//!   - Enforced in: [`runtime::SyntaxRegistry`] (whole chain applied before publication).
//!   - Tested by: [`invariants::test_propagation_is_atomic`],
//!     [`invariants::test_unregister_is_atomic`]
//!   - Failure symptom: A descriptor visible under EFFECT but missing under STATEMENT.
//!
//! - Must remove a registration from every bucket it was propagated into.
//!   - Enforced in: [`snapshot::Catalog::evict`].
//!   - Tested by: [`invariants::test_unregister_clears_whole_chain`]
//!   - Failure symptom: Stale descriptors still offered to the parser after module unload.
//!
//! - Must provide linearizable writes without lost updates.
//!   - Enforced in: [`runtime::SyntaxRegistry`] (CAS loop).
//!   - Tested by: [`invariants::test_no_lost_updates`]
//!   - Failure symptom: Concurrent registrations silently dropped.
//!
//! - Must keep returned query results independent of later mutation.
//!   - Enforced in: [`snapshot::Catalog::syntaxes`] (owned `Vec` copies).
//!   - Tested by: [`invariants::test_query_results_are_snapshots`]
//!   - Failure symptom: Parser candidate lists changing mid-match.

pub(crate) mod runtime;
pub(crate) mod snapshot;

pub use runtime::SyntaxRegistry;
pub use snapshot::Snapshot;

#[cfg(any(test, doc))]
pub(crate) mod invariants;

#[cfg(test)]
mod tests;
