use std::fmt;

use serde::{Deserialize, Serialize};

/// A single difference between the two zones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Edit {
    /// Record present only in the newer zone
    Add { name: String, value: String },
    /// Record present only in the older zone
    Remove { name: String, value: String },
}

impl Edit {
    pub fn add(name: &str, value: &str) -> Self {
        Edit::Add {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn remove(name: &str, value: &str) -> Self {
        Edit::Remove {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Diff marker: `+` or `-`
    pub fn marker(&self) -> char {
        match self {
            Edit::Add { .. } => '+',
            Edit::Remove { .. } => '-',
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Edit::Add { name, .. } | Edit::Remove { name, .. } => name,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Edit::Add { value, .. } | Edit::Remove { value, .. } => value,
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self, Edit::Add { .. })
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.marker(), self.name(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Record;

    #[test]
    fn test_display() {
        let record = Record::parse("foo. 86400 in ns ns1.foo.", Some("ns")).unwrap();

        assert_eq!(
            Edit::add(record.name(), record.value()).to_string(),
            "+ foo. ns1.foo."
        );
        assert_eq!(
            Edit::remove(record.name(), record.value()).to_string(),
            "- foo. ns1.foo."
        );
    }

    #[test]
    fn test_json_shape() {
        let edit = Edit::Add {
            name: "foo.".to_string(),
            value: "ns1.foo.".to_string(),
        };

        let json = serde_json::to_string(&edit).unwrap();
        assert_eq!(json, r#"{"op":"add","name":"foo.","value":"ns1.foo."}"#);

        let parsed: Edit = serde_json::from_str(r#"{"op":"remove","name":"a.","value":"b."}"#)
            .unwrap();
        assert!(!parsed.is_add());
        assert_eq!(parsed.name(), "a.");
    }
}
