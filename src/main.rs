use anyhow::Context;
use clap::Parser;
use img_optimize::cli::Args;
use img_optimize::{logger, optimize_directory, verbose, OptimizeOptions};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    let options = OptimizeOptions::new(args.quality, args.max_size)?;
    verbose!(
        "Optimizing {} -> {} (quality {}, max size {}px)",
        args.source.display(),
        args.destination.display(),
        options.quality,
        options.max_size
    );

    optimize_directory(&args.source, &args.destination, &options).with_context(|| {
        format!(
            "failed to optimize {} into {}",
            args.source.display(),
            args.destination.display()
        )
    })?;

    Ok(())
}
