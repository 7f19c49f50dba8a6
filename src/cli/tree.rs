use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use subgroups::{storage::load_manifest, Forest, SubGroupName};

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Show the subgroup hierarchy of each PodGroup in a manifest")]
pub struct Tree {
    /// Manifest file
    path: PathBuf,
}

impl Tree {
    pub fn run(self) -> anyhow::Result<()> {
        let documents = load_manifest(&self.path)
            .with_context(|| format!("failed to load {}", self.path.display()))?;

        for document in documents {
            let pod_group = &document.pod_group;
            println!("{}", pod_group.display_name());

            match Forest::build(&pod_group.spec.sub_groups) {
                Ok(forest) if forest.is_empty() => println!("{}", "(no subgroups)".dim()),
                Ok(forest) => {
                    let roots: Vec<_> = forest.roots().collect();
                    print_level(&forest, &roots, "");
                }
                Err(error) => println!("❌ {}", error.to_string().failure()),
            }
            println!();
        }

        Ok(())
    }
}

fn print_level(forest: &Forest, names: &[&SubGroupName], prefix: &str) {
    for (i, name) in names.iter().enumerate() {
        let last = i + 1 == names.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        let min_member = forest.min_member(name).unwrap_or_default();
        println!(
            "{prefix}{branch}{name} {}",
            format!("(minMember {min_member})").dim()
        );

        let children = forest.children(name);
        print_level(forest, &children, &format!("{prefix}{indent}"));
    }
}
