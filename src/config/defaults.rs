//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn extension() -> String {
        "md".into()
    }
}
