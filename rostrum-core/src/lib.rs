pub mod boilerplate;
pub mod crawl;
pub mod data;
pub mod error;
pub mod extract;
pub mod merge;
pub mod naming;
mod progress;
pub mod report;
pub mod retrieve;

use colored::Colorize;

pub use error::{DataError, StageError};

pub fn print_banner() {
    println!(
        "{} {}",
        "rostrum".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "speech transcript corpus builder".bright_black());
    println!();
}
