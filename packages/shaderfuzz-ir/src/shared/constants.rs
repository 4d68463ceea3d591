//! Centralized constants
//!
//! Names with a fixed meaning across the fuzzing and reduction tools.

/// Global names every pass treats specially
pub mod globals {
    /// Uniform controlling injected dead code; never removed
    pub const INJECTION_SWITCH: &str = "injectionSwitch";
}

/// Variable merging naming scheme
pub mod merging {
    /// Prefix of every merged vector variable name
    pub const MERGED_PREFIX: &str = "GLF_merged";

    /// Separator between the numeric fields of a merged name
    pub const FIELD_SEPARATOR: char = '_';

    /// Widest vector a merge can target
    pub const MAX_VECTOR_WIDTH: u8 = 4;
}

/// Built-in functions that write some of their arguments
pub mod builtins {
    /// Callee name and indices of its `out` arguments
    pub const OUT_ARGUMENTS: &[(&str, &[usize])] = &[
        ("modf", &[1]),
        ("frexp", &[1]),
        ("uaddCarry", &[2]),
        ("usubBorrow", &[2]),
        ("umulExtended", &[2, 3]),
        ("imulExtended", &[2, 3]),
    ];
}
