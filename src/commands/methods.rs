use crate::config::load_config;
use crate::core::{MethodSpec, TargetScope};
use crate::emit::rbi::{render_def, render_type};
use crate::policy::VersionPolicy;
use crate::synth::synthesize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

pub fn methods_table(methods: &[MethodSpec]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Method", "Category", "Scope", "Returns", "Nullable"]);

    for method in methods {
        let category = method.category.map(|c| c.label()).unwrap_or("-");
        let scope = if method.scope.is_class_level() {
            "class"
        } else {
            "instance"
        };
        table.add_row(vec![
            render_def(method),
            category.to_string(),
            scope.to_string(),
            render_type(&method.returns),
            if method.nullable { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

pub fn list_methods(scope: TargetScope, framework_version: Option<&str>) -> anyhow::Result<()> {
    let config = load_config();
    let version = framework_version.unwrap_or_else(|| config.framework_version());
    let policy = VersionPolicy::resolve(version)?;
    let methods = synthesize(scope, &policy)?;

    println!("{} ({} methods, framework {})", scope, methods.len(), policy.version);
    println!("{}", methods_table(&methods));
    Ok(())
}
