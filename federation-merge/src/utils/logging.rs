/// A wrapper around `tracing::trace!` that records a serialized copy of a merge data structure
/// (typically the hints or errors accumulated so far) next to the log message, so that external
/// tools can follow how they evolve during a merge.
///
/// Pass an identifier to serialize it with serde_json; the snapshot is tagged with the value's
/// type name. EX:
/// ```ignore
/// snapshot!(hints, "merged type");
/// // Generates:
/// // trace!(snapshot = "alloc::vec::Vec<..>", data = "[ .. ]", "merged type");
/// ```
/// Or pass a name tag and data that already implements tracing's `Value` trait. EX:
/// ```ignore
/// snapshot!("Supergraph", supergraph.to_string(), "merged supergraph");
/// ```
/// Snapshots are only emitted with the `snapshot_tracing` feature.
macro_rules! snapshot {
    ($value:expr, $msg:literal) => {
        #[cfg(feature = "snapshot_tracing")]
        tracing::trace!(
            snapshot = std::any::type_name_of_val(&$value),
            data = serde_json::to_string(&$value).unwrap_or_default(),
            $msg
        );
    };
    ($name:literal, $value:expr, $msg:literal) => {
        #[cfg(feature = "snapshot_tracing")]
        tracing::trace!(snapshot = $name, data = $value, $msg);
    };
}

pub(crate) use snapshot;
