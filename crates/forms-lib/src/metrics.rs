// ==============
// crates/forms-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const FORM_VALIDATED: &str = "forms.validated";
pub const FORM_REJECTED: &str = "forms.rejected";
pub const FORM_STORE_ERROR: &str = "forms.store_error";
