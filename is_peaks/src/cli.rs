use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgMatches,
    Command,
};

use anyhow::Context;

use is6110::{
    peaks::{DEFAULT_DISTANCE, DEFAULT_PROMINENCE},
    reference::{DEFAULT_CONTIG, DEFAULT_GENOME_LENGTH},
    PeakParams, Reference,
};
use utils::{add_log_options, init_log};

use crate::config::*;

/// Set up definition of command options for clap
fn cli_model() -> Command {
    add_log_options(
        Command::new(crate_name!())
            .about(crate_description!())
            .version(crate_version!())
            .author(crate_authors!()),
    )
    .arg(
        Arg::new("genome_length")
            .short('g')
            .long("genome-length")
            .value_parser(value_parser!(usize))
            .value_name("INT")
            .default_value(DEFAULT_GENOME_LENGTH.to_string())
            .help("Length of reference genome"),
    )
    .arg(
        Arg::new("contig")
            .short('c')
            .long("contig")
            .value_parser(value_parser!(String))
            .value_name("STRING")
            .default_value(DEFAULT_CONTIG)
            .help("Name of reference contig"),
    )
    .arg(
        Arg::new("distance")
            .short('s')
            .long("distance")
            .value_parser(value_parser!(usize))
            .value_name("INT")
            .default_value(DEFAULT_DISTANCE.to_string())
            .help("Minimum distance between peaks"),
    )
    .arg(
        Arg::new("prominence")
            .short('p')
            .long("prominence")
            .value_parser(value_parser!(f64))
            .value_name("FLOAT")
            .default_value(DEFAULT_PROMINENCE.to_string())
            .help("Minimum prominence of peaks"),
    )
    .arg(
        Arg::new("out_peaks")
            .short('o')
            .long("out_peaks")
            .value_parser(value_parser!(PathBuf))
            .value_name("PATH")
            .help("Output file for peak positions [default: <stdout>]"),
    )
    .arg(
        Arg::new("in_depth_tsv")
            .short('i')
            .long("in_depth_tsv")
            .value_parser(value_parser!(PathBuf))
            .value_name("PATH")
            .required(true)
            .help("Input depth file (chrom, position, depth)"),
    )
}

/// Set up Config structure from matched options
fn make_config(m: &ArgMatches) -> anyhow::Result<Config> {
    let reference = Reference::new(
        m.get_one::<String>("contig").expect("Missing default contig"),
        *m.get_one::<usize>("genome_length")
            .expect("Missing default genome length"),
    )
    .with_context(|| "Invalid reference")?;

    let peak_params = PeakParams::new(
        *m.get_one::<usize>("distance")
            .expect("Missing default distance"),
        *m.get_one::<f64>("prominence")
            .expect("Missing default prominence"),
    )
    .with_context(|| "Invalid peak calling parameters")?;

    debug!(
        "Reference {} length {}; peak distance {}, prominence {}",
        reference.contig(),
        reference.length(),
        peak_params.distance(),
        peak_params.prominence()
    );

    let depth_file = m
        .get_one::<PathBuf>("in_depth_tsv")
        .expect("Missing input depth file")
        .to_owned();
    let output = m.get_one::<PathBuf>("out_peaks").map(|s| s.to_owned());
    Ok(Config::new(depth_file, output, reference, peak_params))
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");
    make_config(&m)
}
