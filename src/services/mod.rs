//! Domain services invoked by route handlers.

pub mod signup;
