// src/notify/mod.rs
// =============================================================================
// Sends results somewhere other than stdout.
//
// Currently implements:
// - Emailing the JSON report over SMTP (email.rs)
// =============================================================================

mod email;

pub use email::send_report;
