mod classify_cmd;
mod cli;
mod evaluate_cmd;
mod features_cmd;
mod generate_cmd;
mod shared;
mod smooth_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Classify {
            ref dataset,
            ref image,
            tree,
        } => classify_cmd::run(dataset, image, &tree),
        cli::Commands::Generate {
            ref output,
            ref image_dir,
            ref class,
            append,
        } => generate_cmd::run(output, image_dir, class.as_deref(), append),
        cli::Commands::Evaluate {
            ref train,
            ref test,
            tree,
        } => evaluate_cmd::run(train, test, &tree),
        cli::Commands::EvaluateSelf {
            ref dataset,
            training_fraction,
            split_position,
            ref exclude_class,
            tree,
        } => {
            let split = match split_position {
                Some(position) => evaluate_cmd::Split::Position(position),
                None => evaluate_cmd::Split::Fraction(training_fraction),
            };
            evaluate_cmd::run_self(dataset, split, exclude_class, &tree)
        }
        cli::Commands::Features { ref images } => features_cmd::run(images),
        cli::Commands::Smooth {
            ref image,
            ref output,
            mode,
            horizontal,
            vertical,
        } => smooth_cmd::run(image, output, mode, horizontal, vertical),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
