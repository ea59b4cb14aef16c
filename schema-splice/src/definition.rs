use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast;
use apollo_compiler::ast::Definition;
use apollo_compiler::ast::Document;

/// The named type definitions a merge can look up, import or replace.
///
/// Every other kind of [`Definition`] (schema definitions, directive definitions, extensions,
/// operations) is invisible to lookups and passes through a merge untouched.
#[derive(Debug, Clone)]
pub enum TypeDefinition {
    Object(Node<ast::ObjectTypeDefinition>),
    Interface(Node<ast::InterfaceTypeDefinition>),
    Union(Node<ast::UnionTypeDefinition>),
    Scalar(Node<ast::ScalarTypeDefinition>),
    Enum(Node<ast::EnumTypeDefinition>),
    InputObject(Node<ast::InputObjectTypeDefinition>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum TypeKind {
    #[strum(to_string = "an object")]
    Object,
    #[strum(to_string = "an interface")]
    Interface,
    #[strum(to_string = "a union")]
    Union,
    #[strum(to_string = "a scalar")]
    Scalar,
    #[strum(to_string = "an enum")]
    Enum,
    #[strum(to_string = "an input object")]
    InputObject,
}

impl TypeDefinition {
    pub fn from_definition(definition: &Definition) -> Option<Self> {
        match definition {
            Definition::ObjectTypeDefinition(def) => Some(Self::Object(def.clone())),
            Definition::InterfaceTypeDefinition(def) => Some(Self::Interface(def.clone())),
            Definition::UnionTypeDefinition(def) => Some(Self::Union(def.clone())),
            Definition::ScalarTypeDefinition(def) => Some(Self::Scalar(def.clone())),
            Definition::EnumTypeDefinition(def) => Some(Self::Enum(def.clone())),
            Definition::InputObjectTypeDefinition(def) => Some(Self::InputObject(def.clone())),
            _ => None,
        }
    }

    pub fn name(&self) -> &Name {
        match self {
            Self::Object(def) => &def.name,
            Self::Interface(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Scalar(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }
}

impl From<TypeDefinition> for Definition {
    fn from(value: TypeDefinition) -> Self {
        match value {
            TypeDefinition::Object(def) => Definition::ObjectTypeDefinition(def),
            TypeDefinition::Interface(def) => Definition::InterfaceTypeDefinition(def),
            TypeDefinition::Union(def) => Definition::UnionTypeDefinition(def),
            TypeDefinition::Scalar(def) => Definition::ScalarTypeDefinition(def),
            TypeDefinition::Enum(def) => Definition::EnumTypeDefinition(def),
            TypeDefinition::InputObject(def) => Definition::InputObjectTypeDefinition(def),
        }
    }
}

/// Returns the name of `definition` if it is one of the [`TypeDefinition`] kinds.
pub(crate) fn type_definition_name(definition: &Definition) -> Option<&str> {
    match definition {
        Definition::ObjectTypeDefinition(def) => Some(def.name.as_str()),
        Definition::InterfaceTypeDefinition(def) => Some(def.name.as_str()),
        Definition::UnionTypeDefinition(def) => Some(def.name.as_str()),
        Definition::ScalarTypeDefinition(def) => Some(def.name.as_str()),
        Definition::EnumTypeDefinition(def) => Some(def.name.as_str()),
        Definition::InputObjectTypeDefinition(def) => Some(def.name.as_str()),
        _ => None,
    }
}

/// Index of the first type definition named `name`, in document order.
pub(crate) fn find_type_index(document: &Document, name: &str) -> Option<usize> {
    document
        .definitions
        .iter()
        .position(|definition| type_definition_name(definition) == Some(name))
}

/// Finds the first object, interface, union, scalar, enum or input object type named `name`.
///
/// Names are compared exactly; GraphQL names are case sensitive.
pub fn find_type(document: &Document, name: &str) -> Option<TypeDefinition> {
    find_type_index(document, name)
        .and_then(|index| TypeDefinition::from_definition(&document.definitions[index]))
}

/// Every object type of `document` that declares `interface` among its implemented interfaces.
pub(crate) fn implementors_of<'doc>(
    document: &'doc Document,
    interface: &'doc str,
) -> impl Iterator<Item = &'doc Node<ast::ObjectTypeDefinition>> + 'doc {
    document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            Definition::ObjectTypeDefinition(object) => Some(object),
            _ => None,
        })
        .filter(move |object| {
            object
                .implements_interfaces
                .iter()
                .any(|implemented| implemented.as_str() == interface)
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const SCHEMA: &str = r#"
        schema { query: Query }
        directive @auth on FIELD_DEFINITION
        scalar Date
        enum Color { RED GREEN }
        input Filter { color: Color }
        interface Node { id: ID! }
        type Item implements Node { id: ID! }
        type Other implements Node { id: ID! }
        union Result = Item | Other
        type Query { items(filter: Filter): [Result] }
        extend type Query { node: Node }
    "#;

    fn document() -> Document {
        Document::parse(SCHEMA, "schema.graphql").unwrap()
    }

    #[rstest]
    #[case("Date", TypeKind::Scalar)]
    #[case("Color", TypeKind::Enum)]
    #[case("Filter", TypeKind::InputObject)]
    #[case("Node", TypeKind::Interface)]
    #[case("Item", TypeKind::Object)]
    #[case("Result", TypeKind::Union)]
    #[case("Query", TypeKind::Object)]
    fn finds_every_type_kind(#[case] name: &str, #[case] kind: TypeKind) {
        let found = find_type(&document(), name).unwrap();
        assert_eq!(found.name().as_str(), name);
        assert_eq!(found.kind(), kind);
    }

    #[rstest]
    #[case("auth")]
    #[case("query")]
    #[case("item")]
    #[case("Missing")]
    fn does_not_find_non_type_definitions(#[case] name: &str) {
        assert!(find_type(&document(), name).is_none());
    }

    #[test]
    fn finds_the_definition_rather_than_the_extension() {
        let document = document();
        let index = find_type_index(&document, "Query").unwrap();
        assert!(matches!(
            document.definitions[index],
            Definition::ObjectTypeDefinition(_)
        ));
    }

    #[test]
    fn lists_implementors_in_document_order() {
        let document = document();
        let names: Vec<_> = implementors_of(&document, "Node")
            .map(|object| object.name.as_str())
            .collect();
        assert_eq!(names, ["Item", "Other"]);
    }
}
