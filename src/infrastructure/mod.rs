pub mod audio;
pub mod classifier;
pub mod observability;
pub mod vision;
