use super::ValidationError;
use std::fmt;
use std::str::FromStr;

/// One side of a revision comparison.
///
/// Relative specifiers are resolved by the wiki against the page's current
/// history, so they name a different revision after every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionSpec {
    Prev,
    Current,
    Next,
    Id(u64),
}

impl RevisionSpec {
    /// The `*relative` parameter value, for relative specifiers.
    pub fn relative(&self) -> Option<&'static str> {
        match self {
            Self::Prev => Some("prev"),
            Self::Current => Some("cur"),
            Self::Next => Some("next"),
            Self::Id(_) => None,
        }
    }

    pub fn revision_id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => Some(*id),
            _ => None,
        }
    }
}

impl FromStr for RevisionSpec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "prev" => Ok(Self::Prev),
            "current" | "cur" => Ok(Self::Current),
            "next" => Ok(Self::Next),
            other => other
                .parse::<u64>()
                .map(Self::Id)
                .map_err(|_| ValidationError::InvalidRevision(other.to_string())),
        }
    }
}

impl fmt::Display for RevisionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prev => f.write_str("prev"),
            Self::Current => f.write_str("current"),
            Self::Next => f.write_str("next"),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_relative_and_numeric_specifiers() {
        assert_eq!("prev".parse::<RevisionSpec>(), Ok(RevisionSpec::Prev));
        assert_eq!("current".parse::<RevisionSpec>(), Ok(RevisionSpec::Current));
        assert_eq!(" 1234 ".parse::<RevisionSpec>(), Ok(RevisionSpec::Id(1234)));
        assert!("yesterday".parse::<RevisionSpec>().is_err());
    }

    #[test]
    fn current_maps_to_the_api_spelling() {
        assert_eq!(RevisionSpec::Current.relative(), Some("cur"));
        assert_eq!(RevisionSpec::Id(7).relative(), None);
        assert_eq!(RevisionSpec::Id(7).revision_id(), Some(7));
    }
}
