//! Collaborators the client talks to for data it does not own.

pub mod directory;
