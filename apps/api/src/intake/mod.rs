//! Public form intake: draft state model, toggle engine, phone
//! canonicalizer, form sessions, and the submission pipeline.

pub mod draft;
pub mod handlers;
pub mod phone;
pub mod session;
pub mod submit;
