//! Models exchanged with the hosted backend.

mod user;

pub use user::{Identity, User};
