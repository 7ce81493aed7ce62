//! Construction-time error types.
//!
//! Stage-time faults (a message hasn't arrived yet, a family has no source terms) are never
//! represented here -- they travel through [`crate::task::TaskStatus`] instead and are retried
//! by the executor. Only faults that make the integrator or task list impossible to build at
//! all are modeled as [`ConfigError`].

use crate::task::TaskMask;

/// Fatal, construction-time error. Never produced once a [`crate::tasklist::TaskList`] has been
/// built and handed to the executor.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown integrator '{0}'")]
    UnknownIntegrator(String),

    #[error("task {0:?} is outside the closed task catalogue")]
    InvalidTask(TaskMask),

    #[error("requested cfl_number {requested} is not a finite positive number")]
    InvalidCflNumber { requested: f64 },

    #[error("dependency mask for task {task:?} references unknown task bits {unknown:?}")]
    UnknownDependency { task: TaskMask, unknown: TaskMask },
}
