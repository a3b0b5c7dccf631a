//! The `gradeforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create a starter catalog
    std::fs::create_dir_all("catalogs")?;
    let catalog_path = std::path::Path::new("catalogs/starter.toml");
    if catalog_path.exists() {
        println!("catalogs/starter.toml already exists, skipping.");
    } else {
        std::fs::write(catalog_path, STARTER_CATALOG)?;
        println!("Created catalogs/starter.toml");
    }

    // Create a sample submission
    std::fs::create_dir_all("submissions")?;
    let submission_path = std::path::Path::new("submissions/Sum.java");
    if submission_path.exists() {
        println!("submissions/Sum.java already exists, skipping.");
    } else {
        std::fs::write(submission_path, SAMPLE_SUBMISSION)?;
        println!("Created submissions/Sum.java");
    }

    println!("\nNext steps:");
    println!("  1. Run: gradeforge validate --catalog catalogs/starter.toml");
    println!("  2. Run: gradeforge grade submissions/Sum.java");
    println!("  3. Run: gradeforge grade submissions/Sum.java --catalog catalogs/starter.toml");

    Ok(())
}

const STARTER_CATALOG: &str = r#"# gradeforge catalog
#
# Categories here are overlaid on the built-ins: a known id replaces that
# battery, a new id is appended. New categories need keywords to be
# reachable by classification.

[catalog]
name = "Starter catalog"
description = "Replaces the built-in fibonacci battery with a weighted one"

[[categories]]
id = "fibonacci"
description = "Print the first n Fibonacci numbers"

[[categories.cases]]
input = "5"
expected = "0 1 1 2 3"
weight = 1.0
description = "First 5 Fibonacci numbers"

[[categories.cases]]
input = "1"
expected = "0"
weight = 1.0
description = "Smallest request"

[[categories.cases]]
input = "12"
expected = "0 1 1 2 3 5 8 13 21 34 55 89"
weight = 2.0
description = "Longer prefix, double weight"
"#;

const SAMPLE_SUBMISSION: &str = r#"import java.util.Scanner;

public class Sum {
    public static void main(String[] args) {
        Scanner scanner = new Scanner(System.in);
        int a = scanner.nextInt();
        int b = scanner.nextInt();
        System.out.println(a + b);
    }
}
"#;
