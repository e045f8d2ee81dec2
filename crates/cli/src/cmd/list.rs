use linepatch_core::recipe::discovery::discover_recipes;
use linepatch_core::recipe::load_recipe;
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = super::load_config(config, profile, "list");

    let list = match discover_recipes(&rc.recipes_dir) {
        Ok(list) => list,
        Err(e) => super::fail("list", e),
    };

    if list.is_empty() {
        println!("(no recipes found)");
        return;
    }

    for info in &list {
        // A recipe that fails to parse is still listed; `apply` reports why.
        match load_recipe(&info.path) {
            Ok(spec) => {
                let vars: Vec<_> = spec
                    .variables()
                    .into_iter()
                    .filter(|v| !super::apply::BUILTIN_VARS.contains(&v.as_str()))
                    .collect();
                if vars.is_empty() {
                    println!("{}", info.logical_name);
                } else {
                    println!("{}  [{}]", info.logical_name, vars.join(", "));
                }
            }
            Err(e) => {
                tracing::warn!(recipe = %info.logical_name, error = %e, "recipe does not parse");
                println!("{}  (invalid)", info.logical_name);
            }
        }
    }
    println!("-- {} recipes --", list.len());
}
