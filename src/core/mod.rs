pub mod errors;

pub use errors::{Error, Result, ResultExt};

use serde::Serialize;
use std::fmt;

/// The host class a set of declarations is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetScope {
    BaseRecordType,
    GenericRelation,
    AssociationRelation,
    CollectionProxy,
}

impl TargetScope {
    pub const ALL: [TargetScope; 4] = [
        TargetScope::BaseRecordType,
        TargetScope::GenericRelation,
        TargetScope::AssociationRelation,
        TargetScope::CollectionProxy,
    ];

    /// Fully qualified name of the host class.
    pub fn class_name(&self) -> &'static str {
        match self {
            TargetScope::BaseRecordType => "ActiveRecord::Base",
            TargetScope::GenericRelation => "ActiveRecord::Relation",
            TargetScope::AssociationRelation => "ActiveRecord::AssociationRelation",
            TargetScope::CollectionProxy => "ActiveRecord::Associations::CollectionProxy",
        }
    }

    /// Logical parent scope. Association relations and collection proxies
    /// inherit everything declared on the generic relation.
    pub fn superclass(&self) -> Option<TargetScope> {
        match self {
            TargetScope::AssociationRelation | TargetScope::CollectionProxy => {
                Some(TargetScope::GenericRelation)
            }
            _ => None,
        }
    }

    pub fn method_scope(&self) -> MethodScope {
        match self {
            TargetScope::BaseRecordType => MethodScope::ClassLevel,
            _ => MethodScope::InstanceLevel,
        }
    }

    pub fn element(&self) -> ElementPlaceholder {
        match self {
            TargetScope::BaseRecordType => ElementPlaceholder::AttachedClassOfSelf,
            _ => ElementPlaceholder::ElementTypeMember,
        }
    }

    pub fn is_relation(&self) -> bool {
        !matches!(self, TargetScope::BaseRecordType)
    }
}

impl fmt::Display for TargetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodScope {
    ClassLevel,
    InstanceLevel,
}

impl MethodScope {
    pub fn is_class_level(&self) -> bool {
        matches!(self, MethodScope::ClassLevel)
    }
}

/// Abstract "self type" a scope's methods are specialized over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementPlaceholder {
    /// Class-level methods return the invoking subtype.
    AttachedClassOfSelf,
    /// Relations carry a type member fixed per relation instance.
    ElementTypeMember,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Finder,
    FindOrX,
    ItemAccessor,
    Builder,
    BatchIterator,
    BooleanPredicate,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Finder,
        Category::FindOrX,
        Category::ItemAccessor,
        Category::Builder,
        Category::BatchIterator,
        Category::BooleanPredicate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Finder => "finder",
            Category::FindOrX => "find-or-x",
            Category::ItemAccessor => "item-accessor",
            Category::Builder => "builder",
            Category::BatchIterator => "batch-iterator",
            Category::BooleanPredicate => "boolean-predicate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shape of a method's leading argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterShape {
    /// `*args: T.untyped`
    UntypedSplat,
    /// `attributes: T.untyped = nil`
    AttributesWithDefault,
    /// `attributes: T.untyped`
    RequiredAttributes,
    /// keyword options, as taken by the batch iterators
    KeywordOptions,
    /// only a callback block
    ClosureCallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Positional,
    Optional,
    Splat,
    Keyword,
    Block,
}

/// Structural type expression used in parameters and return types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    Untyped,
    Boolean,
    Integer,
    Element(ElementPlaceholder),
    Nilable(Box<TypeExpr>),
    Array(Box<TypeExpr>),
    Enumerator(Box<TypeExpr>),
    Proc {
        params: Vec<(&'static str, TypeExpr)>,
        returns: Option<Box<TypeExpr>>,
    },
    TypeParameter(&'static str),
}

impl TypeExpr {
    pub fn nilable(inner: TypeExpr) -> Self {
        TypeExpr::Nilable(Box::new(inner))
    }

    pub fn array(inner: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(inner))
    }

    pub fn enumerator(inner: TypeExpr) -> Self {
        TypeExpr::Enumerator(Box::new(inner))
    }

    /// A callback taking one argument and returning nothing.
    pub fn callback(arg: &'static str, ty: TypeExpr) -> Self {
        TypeExpr::Proc {
            params: vec![(arg, ty)],
            returns: None,
        }
    }

    pub fn is_nilable(&self) -> bool {
        matches!(self, TypeExpr::Nilable(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl Param {
    pub fn positional(name: &'static str, ty: TypeExpr) -> Self {
        Self {
            name,
            kind: ParamKind::Positional,
            ty,
            default: None,
        }
    }

    pub fn optional(name: &'static str, ty: TypeExpr, default: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Optional,
            ty,
            default: Some(default),
        }
    }

    pub fn splat(name: &'static str, ty: TypeExpr) -> Self {
        Self {
            name,
            kind: ParamKind::Splat,
            ty,
            default: None,
        }
    }

    pub fn keyword(name: &'static str, ty: TypeExpr, default: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Keyword,
            ty,
            default: Some(default),
        }
    }

    pub fn block(name: &'static str, ty: TypeExpr) -> Self {
        Self {
            name,
            kind: ParamKind::Block,
            ty,
            default: None,
        }
    }
}

/// One synthesized method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSpec {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub scope: MethodScope,
    pub params: Vec<Param>,
    pub returns: TypeExpr,
    pub nullable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<&'static str>,
    pub overrides: bool,
    pub implementation: bool,
}

impl MethodSpec {
    /// Nullability follows the return type, so the flag can never disagree
    /// with what the declaration says.
    pub fn new(name: &'static str, scope: MethodScope, returns: TypeExpr) -> Self {
        Self {
            name,
            category: None,
            scope,
            params: Vec::new(),
            nullable: returns.is_nilable(),
            returns,
            type_parameters: Vec::new(),
            overrides: false,
            implementation: false,
        }
    }

    pub fn in_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self
    }

    pub fn with_type_parameter(mut self, name: &'static str) -> Self {
        self.type_parameters.push(name);
        self
    }

    pub fn overriding(mut self) -> Self {
        self.overrides = true;
        self
    }

    pub fn implementing(mut self) -> Self {
        self.implementation = true;
        self
    }

    pub fn is_bang(&self) -> bool {
        self.name.ends_with('!')
    }

    /// Name without the bang suffix, if there is one.
    pub fn base_name(&self) -> &'static str {
        self.name.strip_suffix('!').unwrap_or(self.name)
    }

    /// Shape of the leading argument, derived from the parameter list.
    pub fn parameter_shape(&self) -> ParameterShape {
        let lead = self.params.iter().find(|p| p.kind != ParamKind::Block);
        match lead {
            Some(p) => match p.kind {
                ParamKind::Splat => ParameterShape::UntypedSplat,
                ParamKind::Optional => ParameterShape::AttributesWithDefault,
                ParamKind::Positional => ParameterShape::RequiredAttributes,
                ParamKind::Keyword => ParameterShape::KeywordOptions,
                ParamKind::Block => ParameterShape::ClosureCallback,
            },
            None => ParameterShape::ClosureCallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_follows_return_type() {
        let elem = TypeExpr::Element(ElementPlaceholder::ElementTypeMember);
        let plain = MethodSpec::new(
            "first",
            MethodScope::InstanceLevel,
            TypeExpr::nilable(elem.clone()),
        );
        let bang = MethodSpec::new("first!", MethodScope::InstanceLevel, elem);
        assert!(plain.nullable);
        assert!(!bang.nullable);
        assert_eq!(bang.base_name(), "first");
    }

    #[test]
    fn test_parameter_shape_skips_block() {
        let spec = MethodSpec::new("new", MethodScope::ClassLevel, TypeExpr::Untyped).with_params(
            vec![
                Param::splat("args", TypeExpr::Untyped),
                Param::block("block", TypeExpr::Untyped),
            ],
        );
        assert_eq!(spec.parameter_shape(), ParameterShape::UntypedSplat);

        let empty = MethodSpec::new("to_a", MethodScope::InstanceLevel, TypeExpr::Untyped);
        assert_eq!(empty.parameter_shape(), ParameterShape::ClosureCallback);
    }

    #[test]
    fn test_scope_parents() {
        assert_eq!(
            TargetScope::CollectionProxy.superclass(),
            Some(TargetScope::GenericRelation)
        );
        assert_eq!(TargetScope::GenericRelation.superclass(), None);
        assert!(TargetScope::BaseRecordType.method_scope().is_class_level());
    }
}
