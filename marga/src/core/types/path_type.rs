//! Path sequence labels.

use std::fmt;
use std::str::FromStr;

/// Which of the two analyzed pose sequences a record belongs to.
///
/// The declaration order is the emission order: all `Original` rows come
/// before all `Optimized` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathType {
    /// Raw search-produced path
    Original,
    /// Post-processed path
    Optimized,
}

impl PathType {
    /// Both path types in emission order.
    pub const ALL: [PathType; 2] = [PathType::Original, PathType::Optimized];

    /// Label written into the `path_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            PathType::Original => "original",
            PathType::Optimized => "optimized",
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(PathType::Original),
            "optimized" => Ok(PathType::Optimized),
            other => Err(format!("unknown path type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for path_type in PathType::ALL {
            assert_eq!(path_type.as_str().parse::<PathType>(), Ok(path_type));
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!("smoothed".parse::<PathType>().is_err());
        assert!("Original".parse::<PathType>().is_err());
    }

    #[test]
    fn test_emission_order() {
        assert!(PathType::Original < PathType::Optimized);
        assert_eq!(PathType::ALL[0], PathType::Original);
    }
}
