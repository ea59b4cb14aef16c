//! Replace-or-append insertion into the ordered sequences of a document.

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast;
use apollo_compiler::ast::Document;

use crate::definition::TypeDefinition;
use crate::definition::type_definition_name;

/// Where an upserted item landed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Splice {
    /// An item with the same name was overwritten at this index.
    Replaced(usize),
    /// No item had that name; the new one was pushed at this index.
    Appended(usize),
}

impl Splice {
    pub fn replaced(self) -> bool {
        matches!(self, Self::Replaced(_))
    }
}

/// Overwrites the first item of `items` named like `item`, or appends `item`.
///
/// Items `name_of` maps to `None` never match anything.
pub(crate) fn upsert_by_name<T>(
    items: &mut Vec<T>,
    item: T,
    name_of: impl Fn(&T) -> Option<&str>,
) -> Splice {
    let position = name_of(&item)
        .and_then(|name| items.iter().position(|existing| name_of(existing) == Some(name)));
    match position {
        Some(index) => {
            items[index] = item;
            Splice::Replaced(index)
        }
        None => {
            items.push(item);
            Splice::Appended(items.len() - 1)
        }
    }
}

/// Puts `definition` in place of the target's type of the same name, or at the end of the
/// document. At most one type definition per name remains afterwards.
pub fn upsert_type(target: &mut Document, definition: TypeDefinition) -> Splice {
    upsert_by_name(
        &mut target.definitions,
        definition.into(),
        type_definition_name,
    )
}

/// Fields of object, interface and input object types.
pub trait FieldLike {
    fn field_name(&self) -> &Name;
}

impl FieldLike for ast::FieldDefinition {
    fn field_name(&self) -> &Name {
        &self.name
    }
}

impl FieldLike for ast::InputValueDefinition {
    fn field_name(&self) -> &Name {
        &self.name
    }
}

fn field_name<F: FieldLike>(field: &Node<F>) -> Option<&str> {
    Some(field.field_name().as_str())
}

/// Puts `field` in place of the field of the same name, or after the last field.
pub fn upsert_field<F: FieldLike>(fields: &mut Vec<Node<F>>, field: Node<F>) -> Splice {
    upsert_by_name(fields, field, field_name::<F>)
}
