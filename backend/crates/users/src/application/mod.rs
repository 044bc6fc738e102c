//! Application Layer
//!
//! Use cases orchestrating domain logic.

pub mod config;
pub mod follow;
pub mod login;
pub mod profile;
pub mod register;

pub use follow::{FollowUseCase, ListFollowsUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{ProfileUseCase, UpdateProfileInput};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
