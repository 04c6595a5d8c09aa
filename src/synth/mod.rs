//! Signature synthesizer.
//!
//! Instantiates the category catalog for one target scope. The base record
//! type and the generic relation get every category; the association
//! relation and the collection proxy only redeclare what their upstream stubs
//! would otherwise shadow (see [`overrides`]).

pub mod overrides;

use crate::catalog::{self, TemplateContext, CATALOG};
use crate::core::{Error, MethodSpec, Result, TargetScope};
use crate::policy::VersionPolicy;
use rayon::prelude::*;
use std::collections::HashSet;

/// Synthesized declarations for one scope, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeSignatures {
    pub scope: TargetScope,
    pub methods: Vec<MethodSpec>,
}

pub fn synthesize(scope: TargetScope, policy: &VersionPolicy) -> Result<Vec<MethodSpec>> {
    let ctx = TemplateContext {
        scope: scope.method_scope(),
        element: scope.element(),
        policy,
    };

    let methods = match scope {
        TargetScope::BaseRecordType => categorized(&ctx),
        TargetScope::GenericRelation => {
            let mut methods = categorized(&ctx);
            methods.extend(overrides::relation_enumerable(&ctx));
            methods
        }
        TargetScope::AssociationRelation => overrides::builder_masks(&ctx),
        TargetScope::CollectionProxy => {
            let mut methods = overrides::builder_masks(&ctx);
            methods.push(overrides::proxy_find(&ctx));
            methods.extend(overrides::proxy_accessors(&ctx));
            methods.push(overrides::empty_predicate(&ctx));
            methods
        }
    };

    ensure_unique(scope, &methods)?;
    log::debug!(
        "synthesized {} methods for {} ({})",
        methods.len(),
        scope,
        policy.version
    );
    Ok(methods)
}

/// Synthesize every scope. Scopes are independent, so they may run on the
/// rayon pool; the result is always in [`TargetScope::ALL`] order.
pub fn synthesize_all(policy: &VersionPolicy, parallel: bool) -> Result<Vec<ScopeSignatures>> {
    let run = |scope: &TargetScope| {
        synthesize(*scope, policy).map(|methods| ScopeSignatures {
            scope: *scope,
            methods,
        })
    };

    if parallel {
        TargetScope::ALL.par_iter().map(run).collect()
    } else {
        TargetScope::ALL.iter().map(run).collect()
    }
}

fn categorized(ctx: &TemplateContext<'_>) -> Vec<MethodSpec> {
    CATALOG
        .iter()
        .flat_map(|entry| catalog::instantiate(entry, ctx))
        .collect()
}

fn ensure_unique(scope: TargetScope, methods: &[MethodSpec]) -> Result<()> {
    let mut seen = HashSet::with_capacity(methods.len());
    for method in methods {
        if !seen.insert(method.name) {
            return Err(Error::DuplicateMethod {
                scope: scope.to_string(),
                name: method.name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, ElementPlaceholder, MethodScope, TypeExpr};

    fn policy(v: &str) -> VersionPolicy {
        VersionPolicy::resolve(v).unwrap()
    }

    fn names(methods: &[MethodSpec]) -> Vec<&'static str> {
        methods.iter().map(|m| m.name).collect()
    }

    #[test]
    fn test_base_scope_is_class_level_attached_class() {
        let methods = synthesize(TargetScope::BaseRecordType, &policy("6.0.0")).unwrap();
        assert!(methods.iter().all(|m| m.scope == MethodScope::ClassLevel));
        let find = methods.iter().find(|m| m.name == "find").unwrap();
        assert_eq!(
            find.returns,
            TypeExpr::Element(ElementPlaceholder::AttachedClassOfSelf)
        );
        assert!(!names(&methods).contains(&"build"));
        assert!(!names(&methods).contains(&"each"));
    }

    #[test]
    fn test_relation_scope_appends_enumerable_methods() {
        let methods = synthesize(TargetScope::GenericRelation, &policy("6.0.0")).unwrap();
        let tail: Vec<_> = names(&methods).into_iter().rev().take(5).collect();
        assert_eq!(tail, vec!["empty?", "map", "to_a", "flatten", "each"]);
        assert!(methods[..methods.len() - 5].iter().all(|m| m.category.is_some()));
        assert!(names(&methods).contains(&"build"));
    }

    #[test]
    fn test_base_and_relation_share_catalog_order() {
        let p = policy("6.1.0");
        let base = synthesize(TargetScope::BaseRecordType, &p).unwrap();
        let relation = synthesize(TargetScope::GenericRelation, &p).unwrap();
        let relation_catalog: Vec<_> = relation
            .iter()
            .filter(|m| m.category.is_some() && m.name != "build")
            .map(|m| m.name)
            .collect();
        assert_eq!(names(&base), relation_catalog);
    }

    #[test]
    fn test_association_relation_only_masks_builders() {
        let methods = synthesize(TargetScope::AssociationRelation, &policy("5.0.0")).unwrap();
        assert_eq!(names(&methods), vec!["new", "build", "create", "create!"]);
        assert!(methods.iter().all(|m| m.category == Some(Category::Builder)));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let p = policy("6.0.0");
        let mut methods = synthesize(TargetScope::AssociationRelation, &p).unwrap();
        methods.push(methods[0].clone());
        let err = ensure_unique(TargetScope::AssociationRelation, &methods).unwrap_err();
        assert!(matches!(err, Error::DuplicateMethod { ref name, .. } if name == "new"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let p = policy("5.1.0");
        assert_eq!(
            synthesize_all(&p, true).unwrap(),
            synthesize_all(&p, false).unwrap()
        );
    }
}
