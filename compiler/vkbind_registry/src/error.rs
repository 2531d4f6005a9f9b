//! Registry build errors.
//!
//! A build either yields a complete registry or fails with every problem it
//! found; there is no partially built model.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::entity::Collection;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read registry `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed registry document: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(Problems),
}

impl BuildError {
    /// The individual problems of an `Invalid` build, empty otherwise.
    pub fn problems(&self) -> &[Problem] {
        match self {
            Self::Invalid(problems) => &problems.0,
            Self::Io { .. } | Self::Syntax(_) => &[],
        }
    }
}

/// Where in the registry a problem was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub collection: Collection,
    pub index: usize,
    pub name: String,
}

impl Location {
    pub fn new(collection: Collection, index: usize, name: impl Into<String>) -> Self {
        Self {
            collection,
            index,
            name: name.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] `{}`", self.collection, self.index, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProblemKind {
    #[error("empty {what} name")]
    EmptyName { what: &'static str },

    #[error("duplicate name, first declared at index {first}")]
    DuplicateName { first: usize },

    #[error("`{member}` is declared more than once")]
    DuplicateMember { member: String },

    #[error("member `{member}` has an element count of 0")]
    ZeroElementCount { member: String },

    #[error("alias target `{target}` is not declared")]
    UnknownAlias { target: String },

    #[error("alias chain loops back through `{target}`")]
    AliasCycle { target: String },

    #[error("union declares no members")]
    EmptyUnion,

    #[error("aliases are not allowed here (alias of `{target}`)")]
    UnexpectedAlias { target: String },

    #[error("constant has neither a typed value nor an alias")]
    MissingConstantValue,

    #[error("typedef target `{target}` is not a declared or native type")]
    UnknownTypedefTarget { target: String },

    #[error("typedef chain loops back through `{target}`")]
    TypedefCycle { target: String },

    #[error("unsupported bit width {width}, expected 32 or 64")]
    InvalidBitWidth { width: u8 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub location: Location,
    pub kind: ProblemKind,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

/// Every problem found by one build, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Problems(pub Vec<Problem>);

impl Problems {
    pub fn push(&mut self, location: Location, kind: ProblemKind) {
        self.0.push(Problem { location, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.0.iter()
    }
}

impl fmt::Display for Problems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "invalid registry: {single}"),
            problems => {
                write!(f, "invalid registry: {} problems", problems.len())?;
                for problem in problems {
                    write!(f, "\n  {problem}")?;
                }
                Ok(())
            }
        }
    }
}
