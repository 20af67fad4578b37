pub mod core;
pub mod crud;

pub use core::GenericStore;
