pub mod handle;
pub mod role;
