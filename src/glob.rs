//! A globset `Glob` and its compiled matcher kept together, so that an input
//! pattern can be read straight out of a config file and used right away.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use globset::{Error, Glob as InnerGlob, GlobMatcher};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone)]
pub struct Glob {
    inner: InnerGlob,
    matcher: GlobMatcher,
}

impl Glob {
    pub fn new(glob: &str) -> Result<Self, Error> {
        let inner = InnerGlob::new(glob)?;
        let matcher = inner.compile_matcher();

        Ok(Glob { inner, matcher })
    }

    pub fn is_match<P: AsRef<Path>>(&self, path: P) -> bool {
        self.matcher.is_match(path)
    }

    /// The leading part of the pattern that contains no wildcards. Only files
    /// under this path can match, so it's where a directory walk should start.
    pub fn base_path(&self) -> PathBuf {
        Path::new(self.inner.glob())
            .iter()
            .take_while(|component| {
                !component
                    .to_string_lossy()
                    .contains(|c| GLOB_PATTERN_CHARACTERS.contains(c))
            })
            .collect()
    }
}

impl PartialEq for Glob {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Glob {}

impl Serialize for Glob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.inner.glob())
    }
}

impl<'de> Deserialize<'de> for Glob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let glob = String::deserialize(deserializer)?;

        Glob::new(&glob).map_err(D::Error::custom)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.inner.fmt(f)
    }
}

// Characters that might start glob syntax. Escapes like `[*]` are treated as
// patterns too, which only makes the walk start higher up than it needs to.
const GLOB_PATTERN_CHARACTERS: &str = "*?{}[]";

#[cfg(test)]
mod test {
    use super::*;

    fn base(glob: &str) -> PathBuf {
        Glob::new(glob).unwrap().base_path()
    }

    #[test]
    fn base_stops_at_first_pattern() {
        assert_eq!(base("sprites/ui/**/*.png"), PathBuf::from("sprites/ui"));
        assert_eq!(base("sprites/**/ui/*.png"), PathBuf::from("sprites"));
    }

    #[test]
    fn no_base() {
        assert_eq!(base("**/*.png"), PathBuf::new());
        assert_eq!(base("*.png"), PathBuf::new());
    }

    #[test]
    fn literal_path_is_its_own_base() {
        assert_eq!(base("sprites/logo.png"), PathBuf::from("sprites/logo.png"));
    }

    #[test]
    fn matches_relative_paths() {
        let glob = Glob::new("icons/*.png").unwrap();

        assert!(glob.is_match("icons/save.png"));
        assert!(!glob.is_match("icons/save.jpg"));
        assert!(!glob.is_match("other/save.png"));
    }
}
