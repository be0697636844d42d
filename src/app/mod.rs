pub mod translate_job;

pub use translate_job::{translate_dataset, translate_file};
