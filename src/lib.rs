//! classmark - marking logistics for GitHub Classroom assignments
//!
//! Synchronizes per-student branches from many student repositories into a
//! single marking repository, freezes each submission at the (possibly
//! extended) deadline, reports submission status against a roster, and opens
//! one marking pull request per student.

pub mod ancestry;
pub mod auth;
pub mod config;
pub mod deadline;
pub mod error;
pub mod fetch;
pub mod identity;
pub mod marking;
pub mod platform;
pub mod repo;
pub mod report;
pub mod roster;
pub mod sync;
pub mod types;
