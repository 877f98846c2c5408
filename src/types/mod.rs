//! Assorted types, relevant to various parts of the library.

pub mod err;
