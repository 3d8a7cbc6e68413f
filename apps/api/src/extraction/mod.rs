//! LLM-backed structured extraction from raw documents.
//!
//! Resumes produce one `resume` record each; career-path documents produce
//! one `job_description` record per career level found.

pub mod job;
pub mod prompts;
pub mod resume;
