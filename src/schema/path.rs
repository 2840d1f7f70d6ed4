//! Attribute paths
//!
//! Paths render the way practitioners see them in configuration, e.g.
//! `spec.mapRoles[0].roleARN` or `metadata.labels["app"]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// One step of an attribute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Named attribute of an object
    Attribute(String),
    /// Position in a list
    Index(usize),
    /// Key of a map
    Key(String),
}

/// Path from the schema root to an attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Self {
        self.with(PathStep::Attribute(name.to_string()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.with(PathStep::Index(index))
    }

    pub fn key(&self, key: &str) -> Self {
        self.with(PathStep::Key(key.to_string()))
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    fn with(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl std::fmt::Display for AttributePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) if i == 0 => write!(f, "{}", name)?,
                PathStep::Attribute(name) => write!(f, ".{}", name)?,
                PathStep::Index(index) => write!(f, "[{}]", index)?,
                PathStep::Key(key) => write!(f, "[\"{}\"]", key)?,
            }
        }
        Ok(())
    }
}

impl FromStr for AttributePath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        let mut rest = s;

        while !rest.is_empty() {
            if let Some(r) = rest.strip_prefix("[\"") {
                let end = r.find("\"]").ok_or_else(|| format!("unterminated key in {}", s))?;
                steps.push(PathStep::Key(r[..end].to_string()));
                rest = &r[end + 2..];
            } else if let Some(r) = rest.strip_prefix('[') {
                let end = r.find(']').ok_or_else(|| format!("unterminated index in {}", s))?;
                let index = r[..end]
                    .parse()
                    .map_err(|e| format!("invalid index in {}: {}", s, e))?;
                steps.push(PathStep::Index(index));
                rest = &r[end + 1..];
            } else {
                let r = rest.strip_prefix('.').unwrap_or(rest);
                let end = r.find(['.', '[']).unwrap_or(r.len());
                if end == 0 {
                    return Err(format!("empty attribute name in {}", s));
                }
                steps.push(PathStep::Attribute(r[..end].to_string()));
                rest = &r[end..];
            }
        }

        Ok(Self { steps })
    }
}

impl Serialize for AttributePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AttributePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let path = AttributePath::root()
            .attribute("spec")
            .attribute("mapRoles")
            .index(0)
            .attribute("roleARN");
        assert_eq!(path.to_string(), "spec.mapRoles[0].roleARN");

        let path = AttributePath::root().attribute("metadata").attribute("labels").key("app");
        assert_eq!(path.to_string(), "metadata.labels[\"app\"]");
        assert_eq!(AttributePath::root().to_string(), "");
    }

    #[test]
    fn test_parse() {
        let path: AttributePath = "metadata.annotations[\"example.com/owner\"]".parse().unwrap();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Attribute("metadata".into()),
                PathStep::Attribute("annotations".into()),
                PathStep::Key("example.com/owner".into()),
            ]
        );

        let path: AttributePath = "spec.users[1].sshAuthorizedKeys".parse().unwrap();
        assert_eq!(path.to_string(), "spec.users[1].sshAuthorizedKeys");

        assert!("spec[x]".parse::<AttributePath>().is_err());
        assert!("spec..name".parse::<AttributePath>().is_err());
    }
}
