pub mod buildcore;
pub mod log;
pub mod mtqueue;
pub mod queue;
