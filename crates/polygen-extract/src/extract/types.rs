//! Type model
//!
//! Phase 1 of extraction: a single pass over every compilation unit collects
//! the declared types into a `TypeTable`, keyed by fully qualified nesting
//! path (`Outer.Inner`). The table must be complete before any unit's
//! expression or statement building starts; afterwards it is read-only, so
//! Phase 2 workers can share it freely.
//!
//! Resolution turns type syntax into `TypeRef`s: primitive spellings,
//! array suffixes, type arguments, type variables in scope, and declared or
//! well-known reference names. Nested member types are found by path lookup,
//! not by walking inheritance.

use rustc_hash::FxHashMap;

use polygen_syntax::ast::{
    CompilationUnit, MemberSyntax, TypeDeclKind, TypeNode, TypeSyntax,
};

use crate::error::{ExtractError, ExtractResult};
use crate::ir::{PrimitiveType, TypeRef};

/// Reference names resolvable without a declaration in the input set:
/// boxed primitives, core library types, and the common exception types the
/// source corpus throws.
const WELL_KNOWN_TYPES: &[&str] = &[
    "Object",
    "String",
    "StringBuilder",
    "System",
    "Math",
    "PrintStream",
    "Runnable",
    "List",
    "ArrayList",
    "Void",
    "Boolean",
    "Byte",
    "Short",
    "Integer",
    "Long",
    "Character",
    "Float",
    "Double",
    "Exception",
    "RuntimeException",
    "ArithmeticException",
    "NullPointerException",
    "IllegalArgumentException",
    "IllegalStateException",
    "Retention",
    "RetentionPolicy",
    "Override",
    "Deprecated",
];

/// What Phase 1 records about one declared type.
#[derive(Debug, Clone)]
pub struct DeclaredType {
    /// Fully qualified nesting path.
    pub qualified: String,
    pub kind: TypeDeclKind,
    /// Supertype as written in the `extends` clause, if any.
    pub supertype: Option<String>,
    /// Parameter counts of the declared constructors, in source order.
    pub constructor_arities: Vec<usize>,
    pub type_params: Vec<String>,
}

impl DeclaredType {
    /// A type is constructible without arguments when it declares no
    /// constructors at all (implicit default) or declares a zero-parameter
    /// one.
    pub fn has_default_constructor(&self) -> bool {
        self.constructor_arities.is_empty() || self.constructor_arities.contains(&0)
    }
}

/// The shared declared-type table. Built once (Phase 1), then only read.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: FxHashMap<String, DeclaredType>,
    /// Simple name to qualified path. First declaration wins on collision;
    /// use sites needing the shadowed type must spell the full path.
    simple: FxHashMap<String, String>,
}

impl TypeTable {
    /// Phase 1: collect every type declared in the input set.
    pub fn collect(units: &[CompilationUnit]) -> Self {
        let mut table = TypeTable::default();
        for unit in units {
            for decl in &unit.types {
                table.collect_type("", decl);
            }
        }
        table
    }

    fn collect_type(&mut self, prefix: &str, decl: &polygen_syntax::ast::TypeDeclSyntax) {
        let qualified = if prefix.is_empty() {
            decl.name.clone()
        } else {
            format!("{}.{}", prefix, decl.name)
        };

        let constructor_arities = decl
            .members
            .iter()
            .filter_map(|m| match m {
                MemberSyntax::Constructor(c) => Some(c.params.len()),
                _ => None,
            })
            .collect();

        let declared = DeclaredType {
            qualified: qualified.clone(),
            kind: decl.kind,
            supertype: decl.extends.as_ref().map(|t| t.render()),
            constructor_arities,
            type_params: decl.type_params.clone(),
        };

        self.simple
            .entry(decl.name.clone())
            .or_insert_with(|| qualified.clone());
        self.types.insert(qualified.clone(), declared);

        for member in &decl.members {
            if let MemberSyntax::Nested(nested) = member {
                self.collect_type(&qualified, nested);
            }
        }
    }

    /// Look up a declared type by fully qualified path.
    pub fn lookup(&self, qualified: &str) -> Option<&DeclaredType> {
        self.types.get(qualified)
    }

    /// Resolve a dotted name (as written at a use site) to the qualified
    /// path of a declared or well-known type. A relative path like
    /// `ForTest2.ForTest3` is anchored by resolving its first segment
    /// through the simple-name index.
    pub fn resolve_path(&self, segments: &[&str]) -> Option<String> {
        let joined = segments.join(".");
        if self.types.contains_key(&joined) {
            return Some(joined);
        }

        if let Some(anchor) = self.simple.get(segments[0]) {
            let mut qualified = anchor.clone();
            for segment in &segments[1..] {
                qualified.push('.');
                qualified.push_str(segment);
            }
            if segments.len() == 1 || self.types.contains_key(&qualified) {
                return Some(qualified);
            }
        }

        if segments.len() == 1 && WELL_KNOWN_TYPES.contains(&segments[0]) {
            return Some(joined);
        }

        None
    }

    /// Resolve type syntax into a `TypeRef`. `type_params` is the set of
    /// type-variable names in scope (enclosing type plus method).
    pub fn resolve(&self, ty: &TypeSyntax, type_params: &[String]) -> ExtractResult<TypeRef> {
        match &ty.node {
            TypeNode::Array(element) => {
                Ok(TypeRef::array(self.resolve(element, type_params)?))
            }
            TypeNode::Name { path, args } => {
                if path.len() == 1 {
                    let name = path[0].as_str();
                    if args.is_empty() {
                        if let Some(primitive) = primitive_spelling(name) {
                            return Ok(TypeRef::Primitive(primitive));
                        }
                        if type_params.iter().any(|p| p == name) {
                            return Ok(TypeRef::TypeVariable(name.to_string()));
                        }
                    }
                }

                let segments: Vec<&str> = path.iter().map(String::as_str).collect();
                let qualified =
                    self.resolve_path(&segments)
                        .ok_or_else(|| ExtractError::UnknownType {
                            name: ty.render(),
                        })?;
                let base = TypeRef::reference(qualified);

                if args.is_empty() {
                    Ok(base)
                } else {
                    let resolved: ExtractResult<Vec<TypeRef>> = args
                        .iter()
                        .map(|arg| self.resolve(arg, type_params))
                        .collect();
                    Ok(TypeRef::parameterized(base, resolved?))
                }
            }
        }
    }
}

/// Primitive type spellings as written in source.
fn primitive_spelling(name: &str) -> Option<PrimitiveType> {
    Some(match name {
        "void" => PrimitiveType::Void,
        "boolean" => PrimitiveType::Boolean,
        "byte" => PrimitiveType::Byte,
        "short" => PrimitiveType::Short,
        "int" => PrimitiveType::Int,
        "long" => PrimitiveType::Long,
        "char" => PrimitiveType::Char,
        "float" => PrimitiveType::Float,
        "double" => PrimitiveType::Double,
        _ => return None,
    })
}
