//! Logging facilities for Horizon Dataform.
//!
//! Horizon Dataform uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Build your forms...
//! }
//! ```
//!
//! Every event is tagged with one of the [`targets`] so a subscriber can
//! filter by subsystem, e.g. `RUST_LOG=horizon_dataform::record=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_dataform_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_dataform_core::signal";
    /// Schema and value conversion target.
    pub const SCHEMA: &str = "horizon_dataform_core::schema";
    /// Widget construction (type-to-widget dispatch) target.
    pub const FACTORY: &str = "horizon_dataform::factory";
    /// Individual control target.
    pub const CONTROL: &str = "horizon_dataform::control";
    /// Record widget target.
    pub const RECORD: &str = "horizon_dataform::record";
    /// Multi-record container target.
    pub const CONTAINER: &str = "horizon_dataform::container";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_dataform::config";
}
