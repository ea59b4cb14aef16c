use apollo_compiler::Name;
use apollo_compiler::ast;
use apollo_compiler::ast::Document;
use apollo_compiler::ast::Type;
use indexmap::IndexSet;

use crate::definition::TypeDefinition;
use crate::definition::find_type;
use crate::definition::implementors_of;
use crate::error::MergeError;
use crate::splice::Splice;
use crate::splice::upsert_type;

/// Copies type definitions from a source document into a target document, together with every
/// type they depend on: field and argument types, union members, and the object types
/// implementing an interface.
///
/// A builder imports each name at most once, so self-referencing types terminate.
pub(crate) struct ClosureBuilder<'src> {
    source: &'src Document,
    implicit_types: &'src IndexSet<String>,
    imported: IndexSet<Name>,
    imports: Vec<(Name, Splice)>,
}

impl<'src> ClosureBuilder<'src> {
    pub(crate) fn new(source: &'src Document, implicit_types: &'src IndexSet<String>) -> Self {
        Self {
            source,
            implicit_types,
            imported: IndexSet::default(),
            imports: Vec::new(),
        }
    }

    /// Imports the closure of the named type at the bottom of `ty`. List and non-null wrappers
    /// carry no identity of their own and are looked through.
    pub(crate) fn insert_closure(
        &mut self,
        target: &mut Document,
        ty: &Type,
    ) -> Result<(), MergeError> {
        match ty {
            Type::Named(name) | Type::NonNullNamed(name) => self.insert_named(target, name),
            Type::List(inner) | Type::NonNullList(inner) => self.insert_closure(target, inner),
        }
    }

    /// Imports the closure of a field's type and of each of its argument types.
    pub(crate) fn insert_field_closure(
        &mut self,
        target: &mut Document,
        field: &ast::FieldDefinition,
    ) -> Result<(), MergeError> {
        self.insert_closure(target, &field.ty)?;
        for argument in &field.arguments {
            self.insert_closure(target, &argument.ty)?;
        }
        Ok(())
    }

    /// Names imported since the last call, with where each one landed in the target.
    pub(crate) fn take_imports(&mut self) -> Vec<(Name, Splice)> {
        std::mem::take(&mut self.imports)
    }

    fn insert_named(&mut self, target: &mut Document, name: &Name) -> Result<(), MergeError> {
        if self.imported.contains(name) {
            return Ok(());
        }
        let Some(definition) = find_type(self.source, name) else {
            if self.implicit_types.contains(name.as_str()) {
                return Ok(());
            }
            return Err(MergeError::UnresolvedReference {
                type_name: name.to_string(),
            });
        };

        self.imported.insert(name.clone());
        let splice = upsert_type(target, definition.clone());
        tracing::trace!(type_name = %name, ?splice, "imported type");
        self.imports.push((name.clone(), splice));

        self.insert_child_types(target, &definition)
    }

    fn insert_child_types(
        &mut self,
        target: &mut Document,
        definition: &TypeDefinition,
    ) -> Result<(), MergeError> {
        match definition {
            TypeDefinition::Object(object) => {
                for field in &object.fields {
                    self.insert_field_closure(target, field)?;
                }
            }
            TypeDefinition::Interface(interface) => {
                for field in &interface.fields {
                    self.insert_field_closure(target, field)?;
                }
                for implementor in implementors_of(self.source, interface.name.as_str()) {
                    self.insert_named(target, &implementor.name)?;
                }
            }
            TypeDefinition::Union(union_) => {
                for member in &union_.members {
                    self.insert_named(target, member)?;
                }
            }
            TypeDefinition::InputObject(input_object) => {
                for field in &input_object.fields {
                    self.insert_closure(target, &field.ty)?;
                }
            }
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use apollo_compiler::ty;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::definition::type_definition_name;

    fn parse(sdl: &str) -> Document {
        Document::parse(sdl, "test.graphql").unwrap()
    }

    fn builtins() -> IndexSet<String> {
        ["String", "Int", "Float", "Boolean", "ID"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn import(source: &str, ty: &Type) -> Result<Vec<String>, MergeError> {
        let source = parse(source);
        let implicit_types = builtins();
        let mut target = Document::new();
        let mut builder = ClosureBuilder::new(&source, &implicit_types);
        builder.insert_closure(&mut target, ty)?;
        Ok(target
            .definitions
            .iter()
            .filter_map(type_definition_name)
            .map(String::from)
            .collect())
    }

    #[test]
    fn looks_through_wrapping_types() {
        let source = "type Foo { a: Int } type Unrelated { b: Int }";
        assert_eq!(import(source, &ty!(Foo)).unwrap(), ["Foo"]);
        assert_eq!(import(source, &ty!(Foo!)).unwrap(), ["Foo"]);
        assert_eq!(import(source, &ty!([[Foo!]]!)).unwrap(), ["Foo"]);
    }

    #[test]
    fn follows_field_and_argument_types() {
        let source = r#"
            type Foo { bar(filter: Filter): [Bar!]! }
            type Bar { id: ID! }
            input Filter { color: Color }
            enum Color { RED }
        "#;
        assert_eq!(
            import(source, &ty!(Foo)).unwrap(),
            ["Foo", "Bar", "Filter", "Color"]
        );
    }

    #[test]
    fn imports_interface_implementors() {
        let source = r#"
            type Bar { hello: String }
            type Baz { hello: String }
            interface IFoo { hello: String baz: Baz }
            type Foo implements IFoo { hello: String baz: Baz bar: Bar }
            type Other { hello: String }
        "#;
        assert_eq!(
            import(source, &ty!(IFoo)).unwrap(),
            ["IFoo", "Baz", "Foo", "Bar"]
        );
    }

    #[test]
    fn imports_union_members() {
        let source = "union U = A | B type A { a: Int } type B { b: Int } type C { c: Int }";
        assert_eq!(import(source, &ty!(U)).unwrap(), ["U", "A", "B"]);
    }

    #[test]
    fn terminates_on_cycles() {
        let source = r#"
            type Node { parent: Node children: [Edge!]! }
            type Edge { node: Node }
        "#;
        assert_eq!(import(source, &ty!(Node)).unwrap(), ["Node", "Edge"]);
    }

    #[test]
    fn skips_implicit_types() {
        assert_eq!(import("type Foo { a: String }", &ty!(Foo)).unwrap(), ["Foo"]);
        assert_eq!(import("scalar Unused", &ty!(Int)).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn imports_implicit_type_defined_by_source() {
        assert_eq!(import("scalar ID", &ty!(ID)).unwrap(), ["ID"]);
    }

    #[test]
    fn fails_on_undefined_reference() {
        let err = import("type Foo { date: AWSDate }", &ty!(Foo)).unwrap_err();
        assert_eq!(
            err,
            MergeError::UnresolvedReference {
                type_name: "AWSDate".to_owned()
            }
        );
    }

    #[test]
    fn records_where_each_import_landed() {
        let source = parse("type Foo { bar: Bar } type Bar { a: Int }");
        let implicit_types = builtins();
        let mut target = parse("type Bar { old: Int } type Query { foo: Foo }");
        let mut builder = ClosureBuilder::new(&source, &implicit_types);

        builder.insert_closure(&mut target, &ty!(Foo)).unwrap();

        let imports: Vec<_> = builder
            .take_imports()
            .into_iter()
            .map(|(name, splice)| (name.to_string(), splice))
            .collect();
        assert_eq!(
            imports,
            [
                ("Foo".to_owned(), Splice::Appended(2)),
                ("Bar".to_owned(), Splice::Replaced(0)),
            ]
        );
        assert!(builder.take_imports().is_empty());
    }
}
