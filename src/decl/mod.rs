//! Structural declarations handed to an [`InterfaceEmitter`](crate::emit::InterfaceEmitter).
//!
//! Generation produces two files: one for the base record type and one for
//! the relation family. The association relation and collection proxy live in
//! the relation file because both name the generic relation as their parent.

use crate::core::{MethodSpec, Result, TargetScope, TypeExpr};
use crate::policy::VersionPolicy;
use crate::synth::{self, ScopeSignatures};
use serde::Serialize;

/// Name of the element type member declared on every relation class.
pub const ELEMENT_MEMBER: &str = "Elem";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationGroup {
    Base,
    Relation,
}

impl DeclarationGroup {
    pub const ALL: [DeclarationGroup; 2] = [DeclarationGroup::Base, DeclarationGroup::Relation];

    pub fn scopes(&self) -> &'static [TargetScope] {
        match self {
            DeclarationGroup::Base => &[TargetScope::BaseRecordType],
            DeclarationGroup::Relation => &[
                TargetScope::GenericRelation,
                TargetScope::AssociationRelation,
                TargetScope::CollectionProxy,
            ],
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            DeclarationGroup::Base => "active_record_base",
            DeclarationGroup::Relation => "active_record_relation",
        }
    }
}

/// `Elem = type_member(fixed: T.untyped)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMemberDecl {
    pub name: &'static str,
    pub fixed: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDecl {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superclass: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_member: Option<TypeMemberDecl>,
    pub methods: Vec<MethodSpec>,
}

impl ClassDecl {
    pub fn for_scope(signatures: ScopeSignatures) -> Self {
        let scope = signatures.scope;
        Self {
            name: scope.class_name(),
            superclass: scope.superclass().map(|parent| parent.class_name()),
            element_member: scope.is_relation().then(|| TypeMemberDecl {
                name: ELEMENT_MEMBER,
                fixed: TypeExpr::Untyped,
            }),
            methods: signatures.methods,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationFile {
    pub group: DeclarationGroup,
    pub comments: Vec<String>,
    pub classes: Vec<ClassDecl>,
}

/// Synthesize and group one declaration file.
pub fn declarations(
    group: DeclarationGroup,
    policy: &VersionPolicy,
    comments: &[String],
) -> Result<DeclarationFile> {
    let classes = group
        .scopes()
        .iter()
        .map(|scope| {
            synth::synthesize(*scope, policy).map(|methods| {
                ClassDecl::for_scope(ScopeSignatures {
                    scope: *scope,
                    methods,
                })
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DeclarationFile {
        group,
        comments: comments.to_vec(),
        classes,
    })
}

pub fn base_declarations(policy: &VersionPolicy, comments: &[String]) -> Result<DeclarationFile> {
    declarations(DeclarationGroup::Base, policy, comments)
}

pub fn relation_declarations(
    policy: &VersionPolicy,
    comments: &[String],
) -> Result<DeclarationFile> {
    declarations(DeclarationGroup::Relation, policy, comments)
}

/// Split already-synthesized scopes into their declaration files.
pub fn group_signatures(
    signatures: Vec<ScopeSignatures>,
    groups: &[DeclarationGroup],
    comments: &[String],
) -> Vec<DeclarationFile> {
    let mut files: Vec<DeclarationFile> = groups
        .iter()
        .map(|group| DeclarationFile {
            group: *group,
            comments: comments.to_vec(),
            classes: Vec::new(),
        })
        .collect();

    for sig in signatures {
        if let Some(file) = files.iter_mut().find(|f| f.group.scopes().contains(&sig.scope)) {
            file.classes.push(ClassDecl::for_scope(sig));
        }
    }
    files
}
