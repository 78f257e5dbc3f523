use clap::{arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("rostrum")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("rostrum")
        .about("Builds a deduplicated corpus of speech transcripts from a paginated listing")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and summary output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Log progress to stderr (-v info, -vv debug)")
                .required(false)
                .action(clap::ArgAction::Count)
                .global(true),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("30")
                .global(true),
        )
        .arg(
            arg!(--"strict")
                .required(false)
                .help("Fail when any input file is missing instead of starting a new one")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            command!("update")
                .about("Updates the list of URLs containing transcripts")
                .arg(
                    arg!(<START_URL>)
                        .help("URL of the first listing page")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(<CANDIDATE_LIST>)
                        .help("Path to the JSON list of transcript URLs and their titles"),
                )
                .arg(
                    arg!(-l --"limit" <NUM_PAGES>)
                        .required(false)
                        .help("Fetch at most this many new listing pages (0 for no limit)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(-c --"page-cache" <PATH>)
                        .required(false)
                        .help("Cache fetched listing pages in this JSON file between runs"),
                )
                .arg(
                    arg!(--"from-scratch")
                        .required(false)
                        .help("Ignore the existing candidate list and page cache")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("retrieve")
                .about(
                    "Retrieves the raw HTML of listed articles whose names contain every \
                keyword",
                )
                .arg(
                    arg!(<CANDIDATE_LIST>)
                        .help("Path to the JSON list of transcript URLs and their titles"),
                )
                .arg(
                    arg!(<KEYWORDS>)
                        .help("Comma separated keywords, all of which must appear in the name"),
                )
                .arg(arg!(<RAW_ARTICLES>).help("Path to the JSON of raw article HTML")),
        )
        .subcommand(
            command!("extract")
                .about("Extracts speech text from the raw HTML and merges multi-part articles")
                .arg(arg!(<RAW_ARTICLES>).help("Path to the JSON of raw article HTML"))
                .arg(arg!(<SPEECH_CORPUS>).help("Path to write the JSON speech corpus"))
                .arg(
                    arg!(-a --"articles-out" <PATH>)
                        .required(false)
                        .help("Also write the per-article texts to this JSON file"),
                )
                .arg(
                    arg!(--"transcripts-only")
                        .required(false)
                        .help("Skip articles whose name does not mention \"transcript\"")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
