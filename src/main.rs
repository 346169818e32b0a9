use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use token_huffman::{
    bitvec::least_bytes_repr_for_bits, create_tree_from_file, decode_to_file, encode_file, CodeTable,
    Config, EncodePolicy, EncodedOutput, Segmentation,
};


#[derive(Parser)]
#[command(name = "token-huffman")]
#[command(about = "Huffman coding of whitespace-separated tokens", long_about = None)]
#[command(version)]
struct Cli {

    #[command(flatten)]
    tokens: TokenArgs,

    /// More logging, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,

}


#[derive(Args)]
struct TokenArgs {

    /// Longest token in bytes
    #[arg(long, default_value_t = token_huffman::MAX_TOKEN_LEN, global = true)]
    max_token_len: usize,

    /// Drop whitespace instead of coding it
    #[arg(long, global = true)]
    words: bool,

    /// Fail on tokens that have no code instead of skipping them
    #[arg(long, global = true)]
    strict: bool,

}

impl TokenArgs {

    fn config(&self) -> Config {

        let segmentation = if self.words { Segmentation::Words } else { Segmentation::Lossless };
        let encode_policy = if self.strict { EncodePolicy::Strict } else { EncodePolicy::SkipUnknown };

        Config::default()
            .with_max_token_len(self.max_token_len)
            .with_segmentation(segmentation)
            .with_encode_policy(encode_policy)
    }

}


#[derive(Subcommand)]
enum Command {

    /// Print the code of every token in a file
    Codes {
        input: PathBuf,
    },

    /// Encode a file with the codes built from its own tokens
    Encode {
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write packed bytes instead of '0' and '1' characters
        #[arg(long)]
        packed: bool,
    },

    /// Encode a file, decode the result into another file and compare sizes
    Roundtrip {
        input: PathBuf,
        output: PathBuf,

        /// Decode from the packed bytes instead of the '0' and '1' characters
        #[arg(long)]
        packed: bool,
    },

}


fn main() -> Result<()> {

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = cli.tokens.config();

    match cli.command {
        Command::Codes { input } => print_codes(&input, &config),
        Command::Encode { input, output, packed } => encode(&input, output.as_deref(), packed, &config),
        Command::Roundtrip { input, output, packed } => roundtrip(&input, &output, packed, &config),
    }
}


fn print_codes(input: &Path, config: &Config) -> Result<()> {

    let tree = create_tree_from_file(input, config)
        .with_context(|| format!("Could not build a tree from {}", input.display()))?;

    let table = CodeTable::from_tree(&tree);

    let mut leaves = tree.leaves();
    leaves.sort_by(|a, b| a.0.cmp(b.0));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (token, count) in leaves {
        let code = table.code(token).unwrap_or_default();
        writeln!(out, "{:?}\t{}\t{}", String::from_utf8_lossy(token), count, if code.is_empty() { "-" } else { code })?;
    }

    Ok(())
}


fn encode(input: &Path, output: Option<&Path>, packed: bool, config: &Config) -> Result<()> {

    let tree = create_tree_from_file(input, config)
        .with_context(|| format!("Could not build a tree from {}", input.display()))?;

    let (encoded, stats) = encode_file(&tree, input, config)
        .with_context(|| format!("Could not encode {}", input.display()))?;

    let bytes = if packed {
        encoded.to_packed().serialize().into_vec()
    } else {
        encoded.into_string().into_bytes()
    };

    match output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("Could not write to {}", path.display()))?;
            eprintln!("Encoded {} tokens ({} bits) to {}", stats.encoded, stats.bits, path.display());
        },
        None => {
            io::stdout().write_all(&bytes)?;
        }
    }

    Ok(())
}


fn roundtrip(input: &Path, output: &Path, packed: bool, config: &Config) -> Result<()> {

    let tree = create_tree_from_file(input, config)
        .with_context(|| format!("Could not build a tree from {}", input.display()))?;

    let (encoded, stats) = encode_file(&tree, input, config)
        .with_context(|| format!("Could not encode {}", input.display()))?;

    let (encoded, compressed_size) = if packed {
        let bytes = encoded.to_packed().serialize();
        (EncodedOutput::from_packed(&bytes)?, bytes.len())
    } else {
        (encoded, least_bytes_repr_for_bits(stats.bits))
    };

    let written = decode_to_file(&tree, encoded.as_str(), output)
        .with_context(|| format!("Could not decode into {}", output.display()))?;

    let original = fs::read(input)?;
    let decoded = fs::read(output)?;

    println!("Distinct tokens: {}\nTokens: {} encoded, {} decoded\nOriginal size: {} bytes\nCompressed size: {} bytes\nCompression ratio: {}%\nIdentical: {}",
        tree.leaf_count(), stats.encoded, written, original.len(), compressed_size,
        (compressed_size as f64 / original.len().max(1) as f64 * 100.0) as i32, original == decoded);

    Ok(())
}
