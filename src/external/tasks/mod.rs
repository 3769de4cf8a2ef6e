//! Client for the `/tasks` REST resource.

mod client;
mod outcome;
mod types;

pub use client::TaskApiClient;
pub use outcome::action_for_method;
pub use types::{NewTask, Task, TaskList, TaskQuery, TaskUpdate};
