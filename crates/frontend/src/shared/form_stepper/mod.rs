//! Generic Form Stepper: a multi-step wizard with per-step data, unlock
//! rules and a draft persisted per stepper id.

pub mod controller;
pub mod draft_store;
pub mod machine;
pub mod step;
pub mod view;

pub use machine::{StepDescriptor, StepValidationError};
pub use step::{StepContext, StepDef};
pub use view::{submit_with, FormStepper, SubmitHandler};
