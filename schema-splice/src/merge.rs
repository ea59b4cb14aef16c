use std::fmt;

use apollo_compiler::Node;
use apollo_compiler::ast;
use apollo_compiler::ast::Definition;
use apollo_compiler::ast::Document;
use indexmap::IndexSet;

use crate::binding::ResolverBinding;
use crate::closure::ClosureBuilder;
use crate::definition::TypeDefinition;
use crate::definition::find_type;
use crate::error::DocumentKind;
use crate::error::MergeError;
use crate::splice::upsert_field;
use crate::utils::logging::snapshot;

/// Scalars every GraphQL service provides without a definition.
pub const GRAPHQL_BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Scalars AWS AppSync provides without a definition.
pub const APPSYNC_SCALARS: [&str; 9] = [
    "AWSDate",
    "AWSTime",
    "AWSDateTime",
    "AWSTimestamp",
    "AWSEmail",
    "AWSJSON",
    "AWSURL",
    "AWSPhone",
    "AWSIPAddress",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Type names the new schema may reference without defining them. A reference to any other
    /// undefined name fails the merge with [`MergeError::UnresolvedReference`].
    ///
    /// A definition in the new schema always wins: a defined type is imported even when its name
    /// is listed here.
    ///
    /// Defaults to the GraphQL built-in scalars and the AppSync scalars.
    pub implicit_types: IndexSet<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::graphql_builtins().with_implicit_types(APPSYNC_SCALARS)
    }
}

impl MergeOptions {
    /// Options accepting only the GraphQL built-in scalars as implicit types.
    pub fn graphql_builtins() -> Self {
        Self {
            implicit_types: GRAPHQL_BUILTIN_SCALARS.map(String::from).into_iter().collect(),
        }
    }

    pub fn with_implicit_types<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.implicit_types.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Something the caller may want to report about a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeHint {
    /// The binding's type is not part of the old schema, so the binding was ignored.
    SkippedBinding { binding: ResolverBinding },
    /// A type was copied from the new schema into the old one.
    ImportedType { type_name: String, replaced: bool },
}

impl fmt::Display for MergeHint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MergeHint::SkippedBinding { binding } => write!(
                f,
                "Skipped resolver `{binding}`: the old schema has no type `{}`",
                binding.type_name
            ),
            MergeHint::ImportedType {
                type_name,
                replaced: true,
            } => write!(f, "Replaced type `{type_name}` with its new definition"),
            MergeHint::ImportedType {
                type_name,
                replaced: false,
            } => write!(f, "Added type `{type_name}`"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MergeSuccess {
    /// The old schema with the bound fields and their type closure spliced in.
    pub sdl: String,
    pub hints: Vec<MergeHint>,
}

/// Merges the fields named by `bindings` from `new_sdl` into `old_sdl`.
///
/// Each bound field is attached to the old schema's type of the same name, after every type the
/// field's type and arguments depend on has been copied over from the new schema. Everything
/// else in the old schema is left as is, and nothing else from the new schema is kept.
///
/// Bindings on a type the old schema does not define are skipped and reported in
/// [`MergeSuccess::hints`]. A blank document counts as an empty schema.
pub fn merge_schemas(
    old_sdl: &str,
    new_sdl: &str,
    bindings: &[ResolverBinding],
    options: &MergeOptions,
) -> Result<MergeSuccess, MergeError> {
    let mut target = parse_document(old_sdl, DocumentKind::Old)?;
    let source = parse_document(new_sdl, DocumentKind::New)?;
    let hints = merge_documents(&mut target, &source, bindings, options)?;
    Ok(MergeSuccess {
        sdl: target.to_string(),
        hints,
    })
}

/// Same as [`merge_schemas`], on parsed documents. `target` is modified in place.
///
/// On error `target` may be partially merged.
pub fn merge_documents(
    target: &mut Document,
    source: &Document,
    bindings: &[ResolverBinding],
    options: &MergeOptions,
) -> Result<Vec<MergeHint>, MergeError> {
    let mut merger = Merger::new(source, options);
    for binding in bindings {
        merger.merge_binding(target, binding)?;
        snapshot!("Document", target, "merged resolver binding");
    }
    Ok(merger.hints)
}

/// Syntax errors for a type definition without members, either with empty braces (`type Query {}`)
/// or with no body at all (`type Query`, which is how such a type is printed). The partial
/// document still holds these types.
const EMPTY_TYPE_ERRORS: [&str; 7] = [
    "syntax error: expected Field Definition",
    "syntax error: expected an Input Value Definition",
    "syntax error: expected Enum Value Definition",
    "syntax error: expected an Implements Interface, Directives or a Fields Definition",
    "syntax error: exptected an Implements Interfaces, Directives, or a Fields Definition",
    "syntax error: expected Directives or an Input Fields Definition",
    "syntax error: expected Directive or Enum Values Definition",
];

/// Parses one of the two input documents.
///
/// A blank document is an empty schema, and types without members are accepted. Any other
/// syntax error is a [`MergeError::Parse`].
pub fn parse_document(sdl: &str, document: DocumentKind) -> Result<Document, MergeError> {
    if sdl.trim().is_empty() {
        return Ok(Document::new());
    }
    match Document::parse(sdl, format!("{document}.graphql")) {
        Ok(parsed) => Ok(parsed),
        Err(err)
            if err.errors.iter().all(|diagnostic| {
                EMPTY_TYPE_ERRORS.contains(&diagnostic.error.to_string().as_str())
            }) =>
        {
            tracing::debug!(%document, "accepted types without members");
            Ok(err.partial)
        }
        Err(err) => Err(MergeError::Parse {
            document,
            message: err.errors.to_string(),
        }),
    }
}

struct Merger<'src> {
    source: &'src Document,
    closure: ClosureBuilder<'src>,
    hints: Vec<MergeHint>,
}

impl<'src> Merger<'src> {
    fn new(source: &'src Document, options: &'src MergeOptions) -> Self {
        Self {
            source,
            closure: ClosureBuilder::new(source, &options.implicit_types),
            hints: Vec::new(),
        }
    }

    fn merge_binding(
        &mut self,
        target: &mut Document,
        binding: &ResolverBinding,
    ) -> Result<(), MergeError> {
        // Resolvers refine types the old schema already has, they never introduce new ones.
        if bound_object(target, binding)?.is_none() {
            self.skip(binding);
            return Ok(());
        }

        let field = self.new_field(binding)?;
        self.closure.insert_field_closure(target, &field)?;
        self.hints.extend(
            self.closure
                .take_imports()
                .into_iter()
                .map(|(name, splice)| MergeHint::ImportedType {
                    type_name: name.to_string(),
                    replaced: splice.replaced(),
                }),
        );

        // Looked up again: the closure may have replaced the type with its new definition.
        let Some(object) = bound_object(target, binding)? else {
            self.skip(binding);
            return Ok(());
        };
        let splice = upsert_field(&mut object.make_mut().fields, field);
        tracing::debug!(%binding, ?splice, "attached resolver field");
        Ok(())
    }

    fn skip(&mut self, binding: &ResolverBinding) {
        tracing::debug!(%binding, "old schema does not define the type, skipping");
        self.hints.push(MergeHint::SkippedBinding {
            binding: binding.clone(),
        });
    }

    fn new_field(
        &self,
        binding: &ResolverBinding,
    ) -> Result<Node<ast::FieldDefinition>, MergeError> {
        let object = match find_type(self.source, &binding.type_name) {
            Some(TypeDefinition::Object(object)) => object,
            Some(other) => {
                return Err(MergeError::NotAnObjectType {
                    document: DocumentKind::New,
                    type_name: binding.type_name.clone(),
                    kind: other.kind(),
                });
            }
            None => {
                return Err(MergeError::UnresolvedNewType {
                    binding: binding.clone(),
                });
            }
        };
        object
            .fields
            .iter()
            .find(|field| field.name.as_str() == binding.field_name)
            .cloned()
            .ok_or_else(|| MergeError::UnresolvedNewField {
                binding: binding.clone(),
            })
    }
}

/// The old schema's object type a binding attaches its field to, or `None` when the old schema
/// has no type of that name.
fn bound_object<'doc>(
    target: &'doc mut Document,
    binding: &ResolverBinding,
) -> Result<Option<&'doc mut Node<ast::ObjectTypeDefinition>>, MergeError> {
    match find_type(target, &binding.type_name) {
        None => Ok(None),
        Some(TypeDefinition::Object(_)) => Ok(target
            .definitions
            .iter_mut()
            .find_map(|definition| match definition {
                Definition::ObjectTypeDefinition(object) if object.name.as_str() == binding.type_name => {
                    Some(object)
                }
                _ => None,
            })),
        Some(other) => Err(MergeError::NotAnObjectType {
            document: DocumentKind::Old,
            type_name: binding.type_name.clone(),
            kind: other.kind(),
        }),
    }
}
