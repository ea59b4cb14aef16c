use std::fmt;
use std::str;

use serde::Deserialize;
use serde::Serialize;

use crate::error::InvalidBindingCoordinate;

/// A field that is about to be backed by a resolver.
///
/// Deserializes from resolver descriptor entries (`typeName`, `fieldName`); any other key of the
/// descriptor, such as the data source or mapping templates, is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverBinding {
    pub type_name: String,
    pub field_name: String,
}

impl ResolverBinding {
    pub fn new(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }
}

impl str::FromStr for ResolverBinding {
    type Err = InvalidBindingCoordinate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((type_name, field_name))
                if is_name(type_name) && is_name(field_name) =>
            {
                Ok(Self::new(type_name, field_name))
            }
            _ => Err(InvalidBindingCoordinate(s.to_owned())),
        }
    }
}

impl fmt::Display for ResolverBinding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

/// GraphQL `Name`: `/[_A-Za-z][_0-9A-Za-z]*/`
fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_coordinate() {
        let binding: ResolverBinding = "Query.hello".parse().unwrap();
        assert_eq!(binding, ResolverBinding::new("Query", "hello"));
        assert_eq!(binding.to_string(), "Query.hello");
    }

    #[rstest]
    #[case("Query")]
    #[case("Query.")]
    #[case(".hello")]
    #[case("Query.hello.world")]
    #[case("1Query.hello")]
    #[case("Query.hel-lo")]
    fn rejects_malformed_coordinate(#[case] input: &str) {
        let err = input.parse::<ResolverBinding>().unwrap_err();
        assert_eq!(err, InvalidBindingCoordinate(input.to_owned()));
    }

    #[test]
    fn deserializes_descriptor_entry() {
        let binding: ResolverBinding = serde_json::from_str(
            r#"{
                "dataSource": "users",
                "typeName": "Query",
                "fieldName": "user",
                "requestMapping": "{}",
                "responseMapping": "$util.toJson($ctx.result)"
            }"#,
        )
        .unwrap();
        assert_eq!(binding, ResolverBinding::new("Query", "user"));
    }
}
