pub mod boards;
pub mod documents;
pub mod health;
