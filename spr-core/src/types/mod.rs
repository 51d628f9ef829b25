mod description;
mod parameter;
mod task;

pub use description::{ApiDescription, Operation, PathItem};
pub use parameter::{Parameter, ParameterLocation, ParameterType};
pub use task::Task;
