//! Business logic: the book manager facade and the per-entity services,
//! including the balance mutation protocol.

pub mod book;
pub mod services;

pub use book::BookManager;
