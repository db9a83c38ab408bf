//! Request and response bodies

pub mod claims;
pub mod documents;
pub mod hr;
pub mod review;
