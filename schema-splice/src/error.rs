use crate::binding::ResolverBinding;
use crate::definition::TypeKind;

/// Which of the two input documents an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum DocumentKind {
    /// The document being merged into.
    #[strum(to_string = "old")]
    Old,
    /// The document fields and types are imported from.
    #[strum(to_string = "new")]
    New,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    #[error("Could not parse the {document} schema: {message}")]
    Parse {
        document: DocumentKind,
        message: String,
    },
    #[error("Resolver `{binding}` targets type `{}` which the new schema does not define", .binding.type_name)]
    UnresolvedNewType { binding: ResolverBinding },
    #[error("Resolver `{binding}` targets a field the new schema does not define")]
    UnresolvedNewField { binding: ResolverBinding },
    #[error("Type `{type_name}` in the {document} schema is {kind} type, resolvers can only be bound to object types")]
    NotAnObjectType {
        document: DocumentKind,
        type_name: String,
        kind: TypeKind,
    },
    #[error("Type `{type_name}` is referenced by the new schema but never defined")]
    UnresolvedReference { type_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid resolver coordinate `{0}`, expected `Type.field`")]
pub struct InvalidBindingCoordinate(pub String);
