pub mod analysis;
pub mod batch;
