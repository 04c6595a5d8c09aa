//! RBI text rendering.

use super::InterfaceEmitter;
use crate::core::{ElementPlaceholder, MethodSpec, Param, ParamKind, Result, TypeExpr};
use crate::decl::{ClassDecl, DeclarationFile, ELEMENT_MEMBER};

const INDENT: &str = "  ";

#[derive(Debug, Clone)]
pub struct RbiEmitter {
    strictness: &'static str,
}

impl RbiEmitter {
    pub fn new() -> Self {
        Self { strictness: "strong" }
    }
}

impl Default for RbiEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl InterfaceEmitter for RbiEmitter {
    fn extension(&self) -> &'static str {
        "rbi"
    }

    fn emit(&self, file: &DeclarationFile) -> Result<String> {
        let mut out = format!("# typed: {}\n", self.strictness);
        for comment in &file.comments {
            out.push_str(&format!("# {comment}\n"));
        }
        for class in &file.classes {
            out.push('\n');
            render_class(&mut out, class);
        }
        Ok(out)
    }
}

fn render_class(out: &mut String, class: &ClassDecl) {
    match class.superclass {
        Some(parent) => out.push_str(&format!("class {} < {}\n", class.name, parent)),
        None => out.push_str(&format!("class {}\n", class.name)),
    }

    let mut first = true;
    if let Some(member) = &class.element_member {
        out.push_str(&format!(
            "{INDENT}{} = type_member(fixed: {})\n",
            member.name,
            render_type(&member.fixed)
        ));
        first = false;
    }

    for method in &class.methods {
        if !first {
            out.push('\n');
        }
        first = false;
        out.push_str(&format!("{INDENT}{}\n", render_sig(method)));
        out.push_str(&format!("{INDENT}{}\n", render_def(method)));
    }
    out.push_str("end\n");
}

/// `sig { ... }` line for one method.
pub fn render_sig(method: &MethodSpec) -> String {
    let mut parts: Vec<String> = Vec::new();
    if method.implementation {
        parts.push("implementation".to_string());
    }
    if method.overrides {
        parts.push("override".to_string());
    }
    if !method.type_parameters.is_empty() {
        let names: Vec<String> = method.type_parameters.iter().map(|t| format!(":{t}")).collect();
        parts.push(format!("type_parameters({})", names.join(", ")));
    }
    if !method.params.is_empty() {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, render_type(&p.ty)))
            .collect();
        parts.push(format!("params({})", params.join(", ")));
    }
    parts.push(format!("returns({})", render_type(&method.returns)));
    format!("sig {{ {} }}", parts.join("."))
}

/// `def ...; end` line for one method.
pub fn render_def(method: &MethodSpec) -> String {
    let receiver = if method.scope.is_class_level() { "self." } else { "" };
    if method.params.is_empty() {
        return format!("def {receiver}{}; end", method.name);
    }
    let params: Vec<String> = method.params.iter().map(render_param).collect();
    format!("def {receiver}{}({}); end", method.name, params.join(", "))
}

fn render_param(param: &Param) -> String {
    let default = param.default.unwrap_or("nil");
    match param.kind {
        ParamKind::Positional => param.name.to_string(),
        ParamKind::Optional => format!("{} = {}", param.name, default),
        ParamKind::Splat => format!("*{}", param.name),
        ParamKind::Keyword => format!("{}: {}", param.name, default),
        ParamKind::Block => format!("&{}", param.name),
    }
}

pub fn render_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Untyped => "T.untyped".to_string(),
        TypeExpr::Boolean => "T::Boolean".to_string(),
        TypeExpr::Integer => "Integer".to_string(),
        TypeExpr::Element(ElementPlaceholder::AttachedClassOfSelf) => {
            "T.attached_class".to_string()
        }
        TypeExpr::Element(ElementPlaceholder::ElementTypeMember) => ELEMENT_MEMBER.to_string(),
        TypeExpr::Nilable(inner) => format!("T.nilable({})", render_type(inner)),
        TypeExpr::Array(inner) => format!("T::Array[{}]", render_type(inner)),
        TypeExpr::Enumerator(inner) => format!("T::Enumerator[{}]", render_type(inner)),
        TypeExpr::Proc { params, returns } => {
            let mut proc = "T.proc".to_string();
            if !params.is_empty() {
                let rendered: Vec<String> = params
                    .iter()
                    .map(|(name, ty)| format!("{name}: {}", render_type(ty)))
                    .collect();
                proc.push_str(&format!(".params({})", rendered.join(", ")));
            }
            match returns {
                Some(ret) => proc.push_str(&format!(".returns({})", render_type(ret))),
                None => proc.push_str(".void"),
            }
            proc
        }
        TypeExpr::TypeParameter(name) => format!("T.type_parameter(:{name})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MethodScope;

    #[test]
    fn test_render_nested_types() {
        let ty = TypeExpr::nilable(TypeExpr::callback(
            "e",
            TypeExpr::array(TypeExpr::Element(ElementPlaceholder::ElementTypeMember)),
        ));
        assert_eq!(render_type(&ty), "T.nilable(T.proc.params(e: T::Array[Elem]).void)");
    }

    #[test]
    fn test_class_level_def_has_self_receiver() {
        let method = MethodSpec::new(
            "find_by",
            MethodScope::ClassLevel,
            TypeExpr::nilable(TypeExpr::Element(ElementPlaceholder::AttachedClassOfSelf)),
        )
        .with_params(vec![Param::splat("args", TypeExpr::Untyped)]);
        assert_eq!(
            render_sig(&method),
            "sig { params(args: T.untyped).returns(T.nilable(T.attached_class)) }"
        );
        assert_eq!(render_def(&method), "def self.find_by(*args); end");
    }

    #[test]
    fn test_keyword_and_optional_defaults() {
        let method = MethodSpec::new("find_each", MethodScope::InstanceLevel, TypeExpr::Untyped)
            .with_params(vec![
                Param::keyword("batch_size", TypeExpr::Integer, "1000"),
                Param::optional("limit", TypeExpr::Untyped, "nil"),
            ])
            .overriding();
        assert_eq!(render_def(&method), "def find_each(batch_size: 1000, limit = nil); end");
        assert!(render_sig(&method).starts_with("sig { override.params("));
    }
}
