use clap::Parser;
use seqhmm::cli;

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    /// FASTA file of observed sequences
    fasta: String,
    /// JSON model table file (default: the built-in membrane model)
    #[clap(short, long)]
    model: Option<String>,
    /// decode only records whose header contains this substring
    #[clap(short, long)]
    filter: Option<String>,
    /// state label of the single-state alternative path
    #[clap(short, long, default_value = "-")]
    alt_state: char,
}

fn main() {
    env_logger::init();
    let opts: Opts = Opts::parse();
    cli::decode(
        &opts.fasta,
        opts.model.as_deref(),
        opts.filter.as_deref(),
        opts.alt_state as u8,
    );
}
