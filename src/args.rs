//! Command-line definition for the rs-erasure binary

use clap::{Arg, ArgAction, Command};

fn shard_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("data_shards")
                .short('k')
                .long("data-shards")
                .help("Number of data shards")
                .value_name("K")
                .required(true)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("parity_shards")
                .short('m')
                .long("parity-shards")
                .help("Number of parity shards")
                .value_name("M")
                .required(true)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("offset")
                .long("offset")
                .help("First byte of the processing window")
                .value_name("BYTES")
                .default_value("0")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("length")
                .long("length")
                .help("Length of the processing window (default: to end of shard)")
                .value_name("BYTES")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("coding_loop")
                .long("coding-loop")
                .help("Coding loop to dispatch to (see --list-loops)")
                .value_name("NAME")
                .default_value("input-output-byte-table"),
        )
        .arg(
            Arg::new("shards")
                .long("shard")
                .help("Shard file, repeated K+M times in shard order")
                .value_name("PATH")
                .action(ArgAction::Append)
                .required(true),
        )
}

pub fn build_cli() -> Command {
    Command::new("rs-erasure")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reed-Solomon erasure coding over GF(2^8)")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list_loops")
                .long("list-loops")
                .help("List the available coding loops and exit")
                .action(ArgAction::SetTrue),
        )
        .subcommand(shard_args(
            Command::new("encode")
                .visible_alias("e")
                .about("Compute parity shards from data shards"),
        ))
        .subcommand(shard_args(
            Command::new("verify")
                .visible_alias("v")
                .about("Check that parity shards match the data shards"),
        ))
        .subcommand(shard_args(
            Command::new("decode")
                .visible_alias("d")
                .about("Reconstruct missing shards (missing = file does not exist)"),
        ))
}

pub fn parse_args() -> clap::ArgMatches {
    build_cli().get_matches()
}
