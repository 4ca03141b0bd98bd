//! # ORD
//!
//! Open Resource Discovery document handling.
//!
//! - `model`: wire types of ORD documents and stored records
//! - `client`: fetching documents from ORD providers
//! - `validation`: structural, duplicate and reference checks
//! - `sanitizer`: URL rewriting and package inheritance
//! - `reconciler`: persisting the result per application

pub mod client;
pub mod hash;
pub mod index;
pub mod model;
pub mod reconciler;
pub mod resource;
pub mod sanitizer;
pub mod snapshot;
pub mod validation;
