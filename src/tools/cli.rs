use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::info;

/// Default size of every staging, flush and refill buffer.
pub const BUFFER_SIZE: usize = 64 * 1024;

/// Marker byte that selects compression. Any other leading byte selects decompression.
pub const COMPRESS_MARKER: u8 = b'c';

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map the number of -v flags (or -q) onto a level.
    pub fn from_flags(quiet: bool, count: u64) -> Self {
        if quiet {
            return Verbosity::Quiet;
        }
        match count {
            0 => Verbosity::Errors,
            1 => Verbosity::Warnings,
            2 => Verbosity::Info,
            3 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Compress or Decompress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

impl Mode {
    /// Select the mode from the leading marker byte of the input.
    pub fn from_marker(marker: u8) -> Self {
        if marker == COMPRESS_MARKER {
            Mode::Compress
        } else {
            Mode::Decompress
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Settings shared by the compress and decompress entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOpts {
    /// Bytes held by each staging/flush/refill buffer
    pub buffer_size: usize,
}

impl CodecOpts {
    pub fn new() -> Self {
        Self {
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Use `buffer_size` bytes per buffer. Zero is raised to one.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }
}

impl Default for CodecOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for one run of the binary
#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// File to read
    pub input: String,
    /// File to write
    pub output: String,
    /// Send output to stdout instead of the output file
    pub stdout: bool,
    /// Forced mode. None means the first input byte picks the mode.
    pub op_mode: Option<Mode>,
    /// Verbosity of user information
    pub verbose: Verbosity,
    /// Buffer configuration handed to the codec
    pub codec: CodecOpts,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            input: "in.txt".to_string(),
            output: "out.txt".to_string(),
            stdout: false,
            op_mode: None,
            verbose: Verbosity::Errors,
            codec: CodecOpts::new(),
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Static Huffman byte-stream compressor",
    long_about = "
    Reads INPUT and writes OUTPUT. Unless -z or -d is given, the first byte of INPUT picks
    the mode: 'c' compresses the rest of the file, anything else decompresses it. An empty
    INPUT produces an empty OUTPUT."
)]
pub struct Args {
    /// File to read
    #[clap(default_value = "in.txt")]
    input: String,

    /// File to write
    #[clap(default_value = "out.txt")]
    output: String,

    /// Compress the whole input, no marker byte
    #[clap(short = 'z', long = "compress", conflicts_with = "decompress")]
    compress: bool,

    /// Decompress the whole input, no marker byte
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Be verbose (repeat for more, up to -vvvv)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,

    /// Size in bytes of each I/O buffer
    #[clap(short = 'b', long = "buffer-size", default_value_t = BUFFER_SIZE)]
    buffer_size: usize,
}

impl From<Args> for HuffOpts {
    fn from(args: Args) -> Self {
        let op_mode = if args.compress {
            Some(Mode::Compress)
        } else if args.decompress {
            Some(Mode::Decompress)
        } else {
            None
        };
        HuffOpts {
            input: args.input,
            output: args.output,
            stdout: args.stdout,
            op_mode,
            verbose: Verbosity::from_flags(args.quiet, args.verbose),
            codec: CodecOpts::with_buffer_size(args.buffer_size),
        }
    }
}

/// Parse the command line, set the log level and report what we are about to do.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    info!("---- Huffpack Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    match opts.op_mode {
        Some(mode) => info!("Operational mode forced to {}", mode),
        None => info!("Operational mode taken from the marker byte"),
    }
    info!("Getting input from the file {}", opts.input);
    if opts.stdout {
        info!("Sending output to stdout");
    } else {
        info!("Sending output to the file {}", opts.output);
    }
    info!("Buffer size set to {}", opts.codec.buffer_size);
    info!("---- Huffpack Initialization End ----");
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn marker_test() {
        assert_eq!(Mode::from_marker(b'c'), Mode::Compress);
        assert_eq!(Mode::from_marker(b'd'), Mode::Decompress);
        assert_eq!(Mode::from_marker(0), Mode::Decompress);
    }

    #[test]
    fn verbosity_test() {
        assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Errors);
        assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Info);
        assert_eq!(Verbosity::from_flags(false, 9), Verbosity::Trace);
        assert_eq!(Verbosity::Debug.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn defaults_test() {
        let opts = HuffOpts::from(Args::parse_from(["huffpack"]));
        assert_eq!(opts.input, "in.txt");
        assert_eq!(opts.output, "out.txt");
        assert_eq!(opts.op_mode, None);
        assert_eq!(opts.codec, CodecOpts::default());
    }

    #[test]
    fn args_test() {
        let opts = HuffOpts::from(Args::parse_from([
            "huffpack", "-d", "-vv", "-b", "0", "a.huf", "a.txt",
        ]));
        assert_eq!(opts.op_mode, Some(Mode::Decompress));
        assert_eq!(opts.verbose, Verbosity::Info);
        assert_eq!(opts.codec.buffer_size, 1);
        assert_eq!(opts.input, "a.huf");
        assert_eq!(opts.output, "a.txt");
    }

    #[test]
    fn conflicting_modes_test() {
        assert!(Args::try_parse_from(["huffpack", "-z", "-d"]).is_err());
    }
}
