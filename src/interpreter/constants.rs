// Limits and fixed names for the interpreter

/// Default maximum number of nested function activations
pub const DEFAULT_MAX_CALL_DEPTH: usize = 2_000;

/// Environment variable that overrides the default call depth
pub const MAX_DEPTH_ENV: &str = "LT_MAX_DEPTH";

/// Header printed before the final global bindings
pub const GLOBAL_MEMORY_HEADER: &str = "GLOBAL MEMORY:";
