//! Entity kind tags

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One kind of listed record, identified by the noun the CLI uses for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    RunTemplate,
    Job,
    Application,
    Company,
    Credential,
    Token,
    User,
    Artifact,
    CredType,
    CompanyApp,
    Queue,
    CrPrototype,
}

impl EntityKind {
    /// All kinds in menu order.
    pub const ALL: [Self; 12] = [
        Self::RunTemplate,
        Self::Job,
        Self::Application,
        Self::Company,
        Self::Credential,
        Self::Token,
        Self::User,
        Self::Artifact,
        Self::CredType,
        Self::CompanyApp,
        Self::Queue,
        Self::CrPrototype,
    ];

    /// CLI noun, also used as the cache signature prefix
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::RunTemplate => "runtemplate",
            Self::Job => "job",
            Self::Application => "application",
            Self::Company => "company",
            Self::Credential => "credential",
            Self::Token => "token",
            Self::User => "user",
            Self::Artifact => "artifact",
            Self::CredType => "credtype",
            Self::CompanyApp => "companyapp",
            Self::Queue => "queue",
            Self::CrPrototype => "crprototype",
        }
    }

    /// Look a kind up by its CLI noun.
    pub fn from_noun(noun: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.noun() == noun)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_noun(s.trim()).ok_or_else(|| CoreError::UnknownEntity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nouns_round_trip_through_from_str() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.noun().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_noun_is_an_error() {
        let err = "invoice".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownEntity(ref n) if n == "invoice"));
    }

    #[test]
    fn serde_uses_nouns() {
        let json = serde_json::to_string(&EntityKind::CrPrototype).unwrap();
        assert_eq!(json, "\"crprototype\"");
        let kind: EntityKind = serde_json::from_str("\"companyapp\"").unwrap();
        assert_eq!(kind, EntityKind::CompanyApp);
    }
}
