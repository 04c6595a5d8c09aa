use super::{CategoryEntry, INSTANCE_ONLY_BUILDERS, VERSIONED_BUILDERS};
use crate::core::{Category, ElementPlaceholder, MethodScope, MethodSpec, Param, TypeExpr};
use crate::policy::{ParamShapeMode, VersionPolicy};

/// Default `batch_size` of the batch iterators.
pub const DEFAULT_BATCH_SIZE: &str = "1000";

/// Everything a template needs to produce concrete declarations.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub scope: MethodScope,
    pub element: ElementPlaceholder,
    pub policy: &'a VersionPolicy,
}

impl TemplateContext<'_> {
    pub fn element_type(&self) -> TypeExpr {
        TypeExpr::Element(self.element)
    }

    /// `T.nilable(T.proc.params(object: Elem).void)`
    pub fn object_callback(&self) -> Param {
        Param::block(
            "block",
            TypeExpr::nilable(TypeExpr::callback("object", self.element_type())),
        )
    }

    /// Leading parameter for the version-gated methods.
    pub fn versioned_lead(&self) -> Param {
        match self.policy.param_shape {
            ParamShapeMode::LegacySplat => Param::splat("args", TypeExpr::Untyped),
            ParamShapeMode::KeywordAttributes => attributes_with_default(),
        }
    }
}

pub fn attributes_with_default() -> Param {
    Param::optional("attributes", TypeExpr::Untyped, "nil")
}

/// Instantiate every name of a catalog entry, in catalog order.
pub fn instantiate(entry: &CategoryEntry, ctx: &TemplateContext<'_>) -> Vec<MethodSpec> {
    entry
        .names
        .iter()
        .copied()
        .filter(|name| !skipped(entry.category, name, ctx.scope))
        .map(|name| {
            let spec = match entry.category {
                Category::Finder => finder(name, entry, ctx),
                Category::FindOrX => find_or_x(name, ctx),
                Category::ItemAccessor => item_accessor(name, entry, ctx),
                Category::Builder => builder(name, ctx),
                Category::BatchIterator => batch_iterator(name, ctx),
                Category::BooleanPredicate => boolean_predicate(name, ctx),
            };
            spec.in_category(entry.category)
        })
        .collect()
}

fn skipped(category: Category, name: &str, scope: MethodScope) -> bool {
    // `build` only exists on relations, never on the model class
    category == Category::Builder
        && scope.is_class_level()
        && INSTANCE_ONLY_BUILDERS.contains(&name)
}

fn element_return(name: &str, entry: &CategoryEntry, ctx: &TemplateContext<'_>) -> TypeExpr {
    if entry.nullability.is_nullable(name) {
        TypeExpr::nilable(ctx.element_type())
    } else {
        ctx.element_type()
    }
}

fn finder(name: &'static str, entry: &CategoryEntry, ctx: &TemplateContext<'_>) -> MethodSpec {
    MethodSpec::new(name, ctx.scope, element_return(name, entry, ctx))
        .with_params(vec![ctx.versioned_lead()])
}

fn find_or_x(name: &'static str, ctx: &TemplateContext<'_>) -> MethodSpec {
    MethodSpec::new(name, ctx.scope, ctx.element_type()).with_params(vec![
        Param::positional("attributes", TypeExpr::Untyped),
        ctx.object_callback(),
    ])
}

fn item_accessor(
    name: &'static str,
    entry: &CategoryEntry,
    ctx: &TemplateContext<'_>,
) -> MethodSpec {
    MethodSpec::new(name, ctx.scope, element_return(name, entry, ctx))
}

fn builder(name: &'static str, ctx: &TemplateContext<'_>) -> MethodSpec {
    let lead = if VERSIONED_BUILDERS.contains(&name) {
        ctx.versioned_lead()
    } else {
        attributes_with_default()
    };
    MethodSpec::new(name, ctx.scope, ctx.element_type())
        .with_params(vec![lead, ctx.object_callback()])
}

fn batch_iterator(name: &'static str, ctx: &TemplateContext<'_>) -> MethodSpec {
    let yielded = if name == "find_each" {
        ctx.element_type()
    } else {
        TypeExpr::array(ctx.element_type())
    };
    let nilable_int = || TypeExpr::nilable(TypeExpr::Integer);

    MethodSpec::new(name, ctx.scope, TypeExpr::enumerator(yielded.clone()))
        .with_params(vec![
            Param::keyword("start", nilable_int(), "nil"),
            Param::keyword("finish", nilable_int(), "nil"),
            Param::keyword("batch_size", nilable_int(), DEFAULT_BATCH_SIZE),
            Param::keyword("error_on_ignore", TypeExpr::nilable(TypeExpr::Boolean), "nil"),
            Param::block("block", TypeExpr::nilable(TypeExpr::callback("e", yielded))),
        ])
        .overriding()
}

fn boolean_predicate(name: &'static str, ctx: &TemplateContext<'_>) -> MethodSpec {
    let spec = MethodSpec::new(name, ctx.scope, TypeExpr::Boolean);
    if name == "exists?" {
        spec.with_params(vec![Param::optional("conditions", TypeExpr::Untyped, "nil")])
    } else {
        spec
    }
}
