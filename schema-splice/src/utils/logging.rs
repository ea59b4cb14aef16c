/// Wrapper around `tracing::trace!` that records the printed state of a data structure, so the
/// evolution of the merge target can be followed binding by binding.
///
/// Pass a name tag for the snapshot, the value (anything implementing `Display`, it is recorded
/// with `%`) and a message literal:
/// ```ignore
/// snapshot!("Document", target, "merged resolver binding");
/// // Generates:
/// // trace!(snapshot = "Document", data = %target, "merged resolver binding");
/// ```
/// Expands to nothing unless the `snapshot_tracing` feature is enabled, so the value is never
/// printed in regular builds.
macro_rules! snapshot {
    ($name:literal, $value:expr, $msg:literal) => {
        #[cfg(feature = "snapshot_tracing")]
        tracing::trace!(snapshot = $name, data = %$value, $msg);
    };
}

pub(crate) use snapshot;
