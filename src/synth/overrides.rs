//! Non-catalog declarations.
//!
//! The relation classes get a few enumerable methods the model class only
//! reaches by delegation. The association relation and collection proxy
//! inherit from the generic relation, but the upstream-generated stubs for
//! those classes define some methods with a different arity, and the checker
//! resolves those first. Redeclaring them here masks the conflicting stubs.

use crate::catalog::templates::attributes_with_default;
use crate::catalog::{TemplateContext, PLAIN_ITEM_ACCESSORS};
use crate::core::{Category, MethodSpec, Param, TypeExpr};
use crate::policy::ProxyAccessorMode;

const MASKED_BUILDERS: &[&str] = &["new", "build", "create", "create!"];

/// `each`, `flatten`, `to_a`, `map` and `empty?` on the generic relation.
pub fn relation_enumerable(ctx: &TemplateContext<'_>) -> Vec<MethodSpec> {
    let elem = ctx.element_type();
    let elems = || TypeExpr::array(ctx.element_type());

    vec![
        MethodSpec::new("each", ctx.scope, elems())
            .with_params(vec![Param::block("block", TypeExpr::callback("e", elem.clone()))])
            .implementing(),
        MethodSpec::new("flatten", ctx.scope, elems()).with_params(vec![Param::optional(
            "level",
            TypeExpr::nilable(TypeExpr::Integer),
            "nil",
        )]),
        MethodSpec::new("to_a", ctx.scope, elems()),
        MethodSpec::new("map", ctx.scope, TypeExpr::array(TypeExpr::TypeParameter("U")))
            .with_type_parameter("U")
            .with_params(vec![Param::block(
                "blk",
                TypeExpr::Proc {
                    params: vec![("arg0", elem)],
                    returns: Some(Box::new(TypeExpr::TypeParameter("U"))),
                },
            )]),
        empty_predicate(ctx),
    ]
}

pub fn empty_predicate(ctx: &TemplateContext<'_>) -> MethodSpec {
    MethodSpec::new("empty?", ctx.scope, TypeExpr::Boolean)
}

/// `new/build/create/create!` with a single optional value and a callback.
pub fn builder_masks(ctx: &TemplateContext<'_>) -> Vec<MethodSpec> {
    MASKED_BUILDERS
        .iter()
        .map(|&name| {
            MethodSpec::new(name, ctx.scope, ctx.element_type())
                .in_category(Category::Builder)
                .with_params(vec![attributes_with_default(), ctx.object_callback()])
        })
        .collect()
}

/// The collection proxy's own `find`, always a splat.
pub fn proxy_find(ctx: &TemplateContext<'_>) -> MethodSpec {
    MethodSpec::new("find", ctx.scope, ctx.element_type())
        .in_category(Category::Finder)
        .with_params(vec![Param::splat("args", TypeExpr::Untyped)])
}

pub fn proxy_accessors(ctx: &TemplateContext<'_>) -> Vec<MethodSpec> {
    let nilable_elem = || TypeExpr::nilable(ctx.element_type());

    match ctx.policy.proxy_accessors {
        ProxyAccessorMode::DirectDeclarations => {
            let accessors = PLAIN_ITEM_ACCESSORS.iter().map(|&name| {
                MethodSpec::new(name, ctx.scope, nilable_elem())
                    .in_category(Category::ItemAccessor)
                    .with_params(vec![Param::splat("args", TypeExpr::Untyped)])
            });
            let predicates = ["any?", "many?"].into_iter().map(|name| {
                MethodSpec::new(name, ctx.scope, TypeExpr::Boolean)
                    .in_category(Category::BooleanPredicate)
            });
            accessors.chain(predicates).collect()
        }
        ProxyAccessorMode::LastOnly => vec![MethodSpec::new("last", ctx.scope, nilable_elem())
            .in_category(Category::ItemAccessor)
            .with_params(vec![Param::optional("limit", TypeExpr::Untyped, "nil")])],
    }
}
