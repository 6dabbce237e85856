use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;
use utoipa::ToSchema;

/// Identifier of a service provider, assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct ProviderId(String);

/// Identifier of a reviewer, assigned by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct UserId(String);

/// Identifier of the job/service a review refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct ServiceId(String);

/// Identifier of a review record, generated on append.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct ReviewId(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty { kind: &'static str },
    InvalidPrefix { expected: &'static str, got: String },
    InvalidUlid { value: String },
    InvalidFormat { value: String },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{kind} id must not be empty"),
            Self::InvalidPrefix { expected, got } => {
                write!(f, "invalid prefix: expected {expected}, got {got}")
            }
            Self::InvalidUlid { value } => write!(f, "invalid ulid: {value}"),
            Self::InvalidFormat { value } => write!(f, "invalid id format: {value}"),
        }
    }
}

impl std::error::Error for IdError {}

// External ids come from the remote store or auth backend as opaque strings.
// The only local invariant is non-emptiness after trimming.
macro_rules! external_id {
    ($name:ident, $kind:expr) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value: String = value.into();
                if value.trim().is_empty() {
                    return Err(IdError::Empty { kind: $kind });
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                Self::new(value).map_err(serde::de::Error::custom)
            }
        }
    };
}

external_id!(ProviderId, "provider");
external_id!(UserId, "user");
external_id!(ServiceId, "service");

impl ReviewId {
    pub const PREFIX: &'static str = "rvw_";

    pub fn new(value: String) -> Result<Self, IdError> {
        let Some(rest) = value.strip_prefix(Self::PREFIX) else {
            let got = value.split('_').next().unwrap_or("").to_string();
            return Err(IdError::InvalidPrefix {
                expected: Self::PREFIX,
                got,
            });
        };
        if rest.len() != 26 {
            return Err(IdError::InvalidFormat { value });
        }
        Ulid::from_str(rest).map_err(|_| IdError::InvalidUlid {
            value: value.clone(),
        })?;
        Ok(Self(value))
    }

    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, Ulid::new()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl<'de> Deserialize<'de> for ReviewId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_ids_reject_blank_values() {
        assert!(ProviderId::new("").is_err());
        assert!(UserId::new("   ").is_err());
        assert!(ProviderId::new("prv-123").is_ok());
    }

    #[test]
    fn review_ids_round_trip() {
        let id = ReviewId::generate();
        let parsed = ReviewId::new(id.as_str().to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn review_ids_require_prefix() {
        assert!(ReviewId::new("01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string()).is_err());
        assert!(ReviewId::new("rvw_not-a-ulid".to_string()).is_err());
    }
}
