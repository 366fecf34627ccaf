//! Call Graph Protocol
//!
//! Trait definition for call graph consumers that only need names.

/// Call graph protocol
///
/// Any call graph implementation must provide:
/// - get_callees(func) -> names of directly reachable callees
/// - get_functions() -> every function that appears as caller or callee
pub trait CallGraphProvider {
    /// Direct callee names of `func_name` (field calls contribute their
    /// synthetic slot name). Empty if the function makes no calls.
    fn get_callees(&self, func_name: &str) -> Vec<String>;

    /// All functions in the graph
    fn get_functions(&self) -> Vec<String>;

    /// Callers of a function (reverse call graph)
    ///
    /// Default implementation returns empty (override for better performance).
    fn get_callers(&self, _func_name: &str) -> Vec<String> {
        Vec::new()
    }

    /// Check if call graph contains function
    fn contains_function(&self, func_name: &str) -> bool {
        self.get_functions().iter().any(|f| f == func_name)
    }

    /// Get number of functions in graph
    fn num_functions(&self) -> usize {
        self.get_functions().len()
    }
}
