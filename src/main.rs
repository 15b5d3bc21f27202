//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs::File,
    io::{self, ErrorKind, Read, Write},
    process::ExitCode,
};

use huffpack::tools::cli::{huffopts_init, HuffOpts, Mode};
use huffpack::{compress, decompress};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    // Log to stderr so that -c output on stdout stays clean. The level is narrowed by the cli.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }

    let opts = huffopts_init();

    match run(&opts) {
        Ok(()) => {
            info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Open the input and output, work out the mode and hand off to the codec.
fn run(opts: &HuffOpts) -> huffpack::Result<()> {
    let mut fin = File::open(&opts.input)?;

    // The output is created even when there turns out to be nothing to write
    let mut f_out: Box<dyn Write> = if opts.stdout {
        Box::new(io::stdout().lock())
    } else {
        Box::new(File::create(&opts.output)?)
    };

    let mode = match opts.op_mode {
        Some(mode) => mode,
        None => {
            let mut marker = [0_u8; 1];
            match fin.read_exact(&mut marker) {
                Ok(()) => Mode::from_marker(marker[0]),
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    info!("{} is empty, nothing to do", opts.input);
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
    };
    info!("Running in {} mode", mode);

    let written = match mode {
        Mode::Compress => compress(&mut fin, &mut f_out, &opts.codec)?,
        Mode::Decompress => decompress(&mut fin, &mut f_out, &opts.codec)?,
    };
    f_out.flush()?;
    info!("Wrote {} bytes.", written);
    Ok(())
}
