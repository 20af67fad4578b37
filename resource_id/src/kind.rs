//! Resource kinds and their external id format `{prefix}-{code}`

use crate::code::{new_code, CodeOptions};
use crate::salt::salt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Length of the code part of an external id
pub const RESOURCE_CODE_LEN: usize = 6;

static OPTIONS: Lazy<CodeOptions> =
    Lazy::new(|| CodeOptions::new().with_len(RESOURCE_CODE_LEN).with_salt(salt()));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceIdError {
    #[error("Unknown resource prefix in '{0}'")]
    UnknownPrefix(String),
    #[error("Malformed resource id '{0}'")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    User,
    Post,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::User, ResourceKind::Post];

    pub fn prefix(&self) -> &'static str {
        match self {
            ResourceKind::User => "userID",
            ResourceKind::Post => "postID",
        }
    }

    /// External id for an internal counter, salted with the machine salt
    pub fn new_id(&self, counter: u64) -> String {
        self.new_id_with(counter, &OPTIONS)
    }

    /// External id with explicit encoding options
    pub fn new_id_with(&self, counter: u64, options: &CodeOptions) -> String {
        format!("{}-{}", self.prefix(), new_code(counter, options))
    }

    /// Check that `id` looks like an id of this kind produced by `new_id`
    pub fn validate(&self, id: &str) -> Result<(), ResourceIdError> {
        let kind = Self::parse(id)?;
        if kind != *self {
            return Err(ResourceIdError::UnknownPrefix(id.to_string()));
        }
        Ok(())
    }

    /// Determine the kind of an external id and check its code part
    pub fn parse(id: &str) -> Result<Self, ResourceIdError> {
        let (prefix, code) = id
            .split_once('-')
            .ok_or_else(|| ResourceIdError::Malformed(id.to_string()))?;
        let kind = Self::ALL
            .into_iter()
            .find(|kind| kind.prefix() == prefix)
            .ok_or_else(|| ResourceIdError::UnknownPrefix(id.to_string()))?;

        let chars = OPTIONS.chars();
        if code.chars().count() != OPTIONS.code_len() || !code.chars().all(|c| chars.contains(&c)) {
            return Err(ResourceIdError::Malformed(id.to_string()));
        }
        Ok(kind)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
