use bitflags::bitflags;

bitflags! {
    /// Properties of a call edge, OR-ed together from the enclosing scope,
    /// the edge itself and any replacement rule that fired
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct CallAttrs: u32 {
        /// Inside a GC suppression scope, or the callee is known not to GC
        const GC_SUPPRESSED = 1 << 0;
        /// Script may run, but only within a bounded scope
        const CANSCRIPT_BOUNDED = 1 << 1;
        /// Inside a DOM iteration scope
        const DOM_ITERATING = 1 << 2;
        /// Reference count cannot drop to zero here
        const NONRELEASING = 1 << 3;
        /// Emitted by an edge replacement
        const REPLACED = 1 << 4;
        /// Compiler-generated edge not present in the extracted body
        const SYNTHETIC = 1 << 5;
    }
}
