use crate::core::slot::HourRange;

/// Failures of the planning core itself.
///
/// Collaborator failures (network, configuration parsing) stay on the
/// [`anyhow`] side; these are the conditions the planner is contractually
/// required to name.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PlanError {
    /// The filtered candidate pool is shorter than the requested block.
    #[display(
        "not enough price slots within {hours}: the block needs {required}, only {available} available"
    )]
    InsufficientSlots { hours: HourRange, required: usize, available: usize },

    /// A battery-economics parameter violates its precondition.
    #[display("invalid battery economics: {parameter} must be {requirement}, got {value}")]
    InvalidEconomics { parameter: &'static str, requirement: &'static str, value: f64 },
}
