//! Parse a recipe string and list its declarations.

fn main() {
    let input = "\
from spack.package import *


class RAbcrf(RPackage):
\tcran = \"abcrf\"

\tversion(\"1.9\", md5=\"506f4cc36ae9d66bd174f4b65f8c3bb2\")

\tdepends_on(\"r@3.1:\", type=(\"build\", \"run\"))
\tdepends_on(\"r-readr\", type=(\"build\", \"run\"))
";

    let recipe = spack_recipe_rs::parse_str(input).expect("parse failed");

    println!("Indent: {:?}", recipe.indent);
    for version in &recipe.versions {
        println!("Version {}", version.version);
        for (key, value) in version.arguments() {
            println!("  {key} = {value}");
        }
    }
    for dep in &recipe.depends {
        let types: Vec<_> = dep.types.iter().map(|t| t.text.as_str()).collect();
        match dep.package() {
            Ok(pkg) => println!("Depends on {pkg} ({})", types.join(", ")),
            Err(e) => println!("Depends on {}: {e}", dep.spec),
        }
    }

    println!("\nHeader:\n{}", recipe.header);
}
