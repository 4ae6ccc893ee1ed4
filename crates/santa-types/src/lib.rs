pub mod models;

pub use models::{Config, DeletedUser, Pair, User};
