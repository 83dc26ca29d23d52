pub mod form;
pub mod job;
