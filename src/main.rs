//! rs-erasure command line: encode, verify, and reconstruct shard files
//!
//! Shards are whole files, one per `--shard` argument, in shard order (data
//! first, then parity). `decode` treats a missing file as a missing shard.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use rs_erasure::{args, CodingLoop, ReedSolomon, ALL_CODING_LOOPS};
use std::fs;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = args::parse_args();

    if matches.get_flag("list_loops") {
        for coding_loop in ALL_CODING_LOOPS {
            println!("{coding_loop}");
        }
        return Ok(());
    }

    match matches.subcommand() {
        Some(("encode", sub_matches)) => handle_encode(sub_matches),
        Some(("verify", sub_matches)) => handle_verify(sub_matches),
        Some(("decode", sub_matches)) => handle_decode(sub_matches),
        Some((command, _)) => bail!("unknown command: {command}"),
        None => bail!("no command specified; see --help"),
    }
}

/// Everything the three verbs share: the codec, the window, the shard paths
struct Job {
    codec: ReedSolomon,
    offset: usize,
    length: Option<usize>,
    paths: Vec<PathBuf>,
}

impl Job {
    fn from_matches(matches: &clap::ArgMatches) -> Result<Self> {
        let data_shards = *matches
            .get_one::<usize>("data_shards")
            .expect("data_shards is required");
        let parity_shards = *matches
            .get_one::<usize>("parity_shards")
            .expect("parity_shards is required");
        let coding_loop: CodingLoop = matches
            .get_one::<String>("coding_loop")
            .expect("coding_loop has a default")
            .parse()?;

        let codec = ReedSolomon::with_coding_loop(data_shards, parity_shards, coding_loop)?;
        debug!("codec: {data_shards}+{parity_shards} shards, loop {coding_loop}");

        let paths: Vec<PathBuf> = matches
            .get_many::<String>("shards")
            .expect("shards are required")
            .map(PathBuf::from)
            .collect();
        if paths.len() != codec.total_shard_count() {
            bail!(
                "expected {} shard paths ({} data + {} parity), got {}",
                codec.total_shard_count(),
                data_shards,
                parity_shards,
                paths.len()
            );
        }

        Ok(Job {
            codec,
            offset: *matches.get_one::<usize>("offset").expect("offset has a default"),
            length: matches.get_one::<usize>("length").copied(),
            paths,
        })
    }

    /// The byte count for a shard of `shard_length` bytes
    fn byte_count(&self, shard_length: usize) -> usize {
        self.length
            .unwrap_or_else(|| shard_length.saturating_sub(self.offset))
    }

    fn read_shard(&self, index: usize) -> Result<Vec<u8>> {
        fs::read(&self.paths[index])
            .with_context(|| format!("failed to read shard {}", self.paths[index].display()))
    }

    fn write_shard(&self, index: usize, bytes: &[u8]) -> Result<()> {
        fs::write(&self.paths[index], bytes)
            .with_context(|| format!("failed to write shard {}", self.paths[index].display()))
    }
}

fn handle_encode(matches: &clap::ArgMatches) -> Result<()> {
    let job = Job::from_matches(matches)?;
    let data_shards = job.codec.data_shard_count();

    let mut shards = Vec::with_capacity(job.codec.total_shard_count());
    for index in 0..data_shards {
        shards.push(job.read_shard(index)?);
    }
    let shard_length = shards[0].len();
    shards.resize(job.codec.total_shard_count(), vec![0u8; shard_length]);

    let byte_count = job.byte_count(shard_length);
    job.codec
        .encode_parity(&mut shards, job.offset, byte_count)?;

    for index in data_shards..job.codec.total_shard_count() {
        job.write_shard(index, &shards[index])?;
    }
    info!(
        "wrote {} parity shards of {shard_length} bytes",
        job.codec.parity_shard_count()
    );
    Ok(())
}

fn handle_verify(matches: &clap::ArgMatches) -> Result<()> {
    let job = Job::from_matches(matches)?;

    let mut shards = Vec::with_capacity(job.codec.total_shard_count());
    for index in 0..job.codec.total_shard_count() {
        shards.push(job.read_shard(index)?);
    }

    let byte_count = job.byte_count(shards[0].len());
    let mut temp_buffer = vec![0u8; job.offset + byte_count];
    let correct =
        job.codec
            .is_parity_correct_with_buffer(&shards, job.offset, byte_count, &mut temp_buffer)?;

    if correct {
        println!("parity is consistent");
        Ok(())
    } else {
        println!("parity MISMATCH");
        std::process::exit(1);
    }
}

fn handle_decode(matches: &clap::ArgMatches) -> Result<()> {
    let job = Job::from_matches(matches)?;
    let total = job.codec.total_shard_count();

    let mut present = Vec::with_capacity(total);
    let mut shards: Vec<Option<Vec<u8>>> = Vec::with_capacity(total);
    for index in 0..total {
        if job.paths[index].exists() {
            shards.push(Some(job.read_shard(index)?));
            present.push(true);
        } else {
            shards.push(None);
            present.push(false);
        }
    }

    let shard_length = match shards.iter().flatten().next() {
        Some(shard) => shard.len(),
        None => bail!("no shard files exist; nothing to reconstruct from"),
    };
    let mut shards: Vec<Vec<u8>> = shards
        .into_iter()
        .map(|shard| shard.unwrap_or_else(|| vec![0u8; shard_length]))
        .collect();

    let missing: Vec<usize> = (0..total).filter(|&i| !present[i]).collect();
    if missing.is_empty() {
        info!("all shards present, nothing to do");
        return Ok(());
    }
    debug!("reconstructing shards {missing:?}");

    let byte_count = job.byte_count(shard_length);
    job.codec
        .decode_missing(&mut shards, &present, job.offset, byte_count)?;

    for &index in &missing {
        job.write_shard(index, &shards[index])?;
    }
    info!("reconstructed {} shards", missing.len());
    Ok(())
}
