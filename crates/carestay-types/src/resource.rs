//! Traits shared by every server-owned resource.

/// A server-owned entity addressed by a numeric identifier.
///
/// Stores use the id to reconcile mutation results into their cached
/// collections. Two values with the same id describe the same server record.
pub trait Resource: Clone + Send + Sync + 'static {
    /// Server-assigned identifier.
    fn id(&self) -> u64;
}

/// A resource whose lifecycle includes a `cancelled` status.
pub trait Cancellable: Resource {
    /// Overwrites the local status with the cancelled variant.
    fn mark_cancelled(&mut self);

    /// Returns true if the status is the cancelled variant.
    fn is_cancelled(&self) -> bool;
}
