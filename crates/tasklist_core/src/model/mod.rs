mod task;

pub use task::{DEFAULT_PRIORITY, Task, canonical_priority};
