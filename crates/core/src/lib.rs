//! Domain logic for the DeliverUS backend.
//!
//! Pure request validation with no database or HTTP dependencies. External
//! collaborators (the restaurant store, the upload extractor) are reached
//! through the traits in [`product::lookup`] and [`product::upload`].

pub mod error;
pub mod product;
pub mod types;
