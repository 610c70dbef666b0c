//! Shared test utilities

#![allow(unused_imports)]

pub mod fixtures;
pub mod mock_platform;
pub mod mock_repo;
pub mod temp_repo;

pub use fixtures::*;
pub use mock_platform::MockPlatformService;
pub use mock_repo::MockRepository;
pub use temp_repo::{TempGitRepo, git_available};
