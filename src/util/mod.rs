//! Utility modules for markupgen.
//!
//! Contains tag and attribute name validation.

pub mod name;
