//! Access policy: which actors may read or mutate which records.
//!
//! Administrators are unrestricted. Staff operate only on documents they
//! created; the ownership clause is intersected into storage queries so a
//! foreign record resolves to NotFound rather than confirming it exists.

use letterhead_core::Actor;

use crate::error::{DocumentsError, DocumentsResult};

/// Reject non-administrators with a generic denial
pub fn ensure_admin(actor: &Actor) -> DocumentsResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(DocumentsError::Forbidden)
    }
}

/// Ownership clause for storage queries: None lifts the restriction
pub fn owner_scope(actor: &Actor) -> Option<String> {
    if actor.is_admin() {
        None
    } else {
        Some(actor.id.clone())
    }
}
