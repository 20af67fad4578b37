//! Resource ID - obfuscated external identifiers
//!
//! Turns internal numeric primary keys into short, fixed-length codes that are
//! not sequentially guessable, salted with a value derived from the machine
//! identity. This is obfuscation only, not a security boundary.

pub mod code;
pub mod kind;
pub mod salt;

pub use code::{new_code, CodeOptions, DEFAULT_CHARS};
pub use kind::{ResourceIdError, ResourceKind};
pub use salt::{machine_id, salt};
