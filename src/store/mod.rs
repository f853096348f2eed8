//! Narrow boundaries to the external persistence collaborators.
//!
//! The engine never talks to a network or database itself; callers plug their own
//! implementations in behind these traits. In-memory versions are provided for tests.

pub(crate) mod transform;
pub(crate) mod zone;
