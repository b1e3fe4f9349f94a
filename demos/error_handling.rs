//! Demonstrate error handling for invalid recipe input.

fn main() {
    // String broken by a line break
    match spack_recipe_rs::parse_str("class A(Package):\n\tversion(\"1.0)\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(spack_recipe_rs::Error::Lex(e)) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
        Err(e) => println!("Other error: {e}"),
    }

    println!();

    // Statement outside the class
    match spack_recipe_rs::parse_str("x = 1\nclass A(Package):\n\tpass\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(spack_recipe_rs::Error::Phrase(e)) => {
            println!("Phrase error: {e}");
            println!("  Unparsed tokens: {}", e.remaining.len());
        }
        Err(e) => println!("Other error: {e}"),
    }

    println!();

    // Four dependency types
    let input = "class A(Package):\n\tdepends_on(\"x\", type=(\"a\", \"b\", \"c\", \"d\"))\n";
    match spack_recipe_rs::parse_str(input) {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(spack_recipe_rs::Error::Parse(e)) => {
            println!("Parse error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Call: {}", e.call);
        }
        Err(e) => println!("Other error: {e}"),
    }
}
