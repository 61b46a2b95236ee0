//! IR types

use serde::{Deserialize, Serialize};

/// A resolved type reference.
///
/// `Array` and `Parameterized` recurse structurally and always terminate:
/// there is no type aliasing at this layer, so a `TypeRef` can never contain
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Primitive(PrimitiveType),

    /// Named reference type; `name` is the fully qualified nesting path
    /// (`Outer.Inner`) for declared types.
    Reference { name: String },

    /// Array of an element type.
    Array(Box<TypeRef>),

    /// Generic instantiation: base type plus ordered type arguments.
    Parameterized {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Reference to a type parameter in scope: `T`.
    TypeVariable(String),

    /// Placeholder recorded when resolution failed and the caller opted to
    /// continue; always paired with an `UnknownType` diagnostic.
    Unresolved(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveType {
    Void,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl TypeRef {
    pub fn reference(name: impl Into<String>) -> Self {
        TypeRef::Reference { name: name.into() }
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    pub fn parameterized(base: TypeRef, args: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized {
            base: Box::new(base),
            args,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    /// Source-like spelling, used in diagnostics and signatures.
    pub fn render(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.spelling().to_string(),
            TypeRef::Reference { name } => name.clone(),
            TypeRef::Array(element) => format!("{}[]", element.render()),
            TypeRef::Parameterized { base, args } => {
                let args: Vec<String> = args.iter().map(TypeRef::render).collect();
                format!("{}<{}>", base.render(), args.join(", "))
            }
            TypeRef::TypeVariable(name) => name.clone(),
            TypeRef::Unresolved(name) => name.clone(),
        }
    }
}

impl PrimitiveType {
    pub fn spelling(&self) -> &'static str {
        match self {
            PrimitiveType::Void => "void",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}
