use clap::Parser;
use subgroups::domain::name::check_name;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Check whether strings are legal subgroup names")]
pub struct Name {
    /// Candidate names
    #[arg(required = true)]
    names: Vec<String>,
}

impl Name {
    pub fn run(self) {
        let mut invalid = 0;

        for name in &self.names {
            match check_name(name) {
                Ok(()) => println!("✅ {name}"),
                Err(error) => {
                    invalid += 1;
                    println!("❌ {name:?}: {}", error.to_string().failure());
                }
            }
        }

        if invalid > 0 {
            std::process::exit(2);
        }
    }
}
