pub mod job_profile;
pub mod normalize;
pub mod scoring;
