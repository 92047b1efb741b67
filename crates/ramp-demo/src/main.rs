//! Ramp demo — loads the builtin colormap set plus an optional user
//! directory, then writes gradient previews and an HTML gallery.
//!
//! Usage:
//!   ramp-demo [--data DIR] [--out DIR] [--sorted] [--list [--json]]

use std::path::PathBuf;
use std::process::ExitCode;

use ramp_core::ColormapRegistry;

const USAGE: &str = "usage: ramp-demo [--data DIR] [--out DIR] [--sorted] [--list [--json]]";

struct Options {
    /// Extra colormap directory to load on top of the builtins.
    data_dir: Option<PathBuf>,
    /// Output root for previews and the gallery document.
    out_dir: PathBuf,
    /// Sort the gallery lexicographically instead of registration order.
    sorted: bool,
    /// Print the forward-name listing instead of exporting.
    list: bool,
    /// Emit the listing as JSON.
    json: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        data_dir: None,
        out_dir: PathBuf::from("gallery"),
        sorted: false,
        list: false,
        json: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                let dir = args.next().ok_or("--data requires a directory")?;
                options.data_dir = Some(PathBuf::from(dir));
            }
            "--out" => {
                let dir = args.next().ok_or("--out requires a directory")?;
                options.out_dir = PathBuf::from(dir);
            }
            "--sorted" => options.sorted = true,
            "--list" => options.list = true,
            "--json" => options.json = true,
            other => return Err(format!("unknown argument `{other}`")),
        }
    }
    if options.json && !options.list {
        return Err("--json only applies to --list".to_owned());
    }
    Ok(options)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let mut registry = ColormapRegistry::builtin();
    if let Some(dir) = &options.data_dir {
        // Each issue is already warned at the point of failure.
        let issues = registry.extend_from_dir(dir);
        if !issues.is_empty() {
            tracing::warn!(
                "{} entr{} skipped while loading {}",
                issues.len(),
                if issues.len() == 1 { "y" } else { "ies" },
                dir.display()
            );
        }
    }
    tracing::info!("{} colormaps registered", registry.len());

    if options.list {
        let names = registry.names(false);
        if options.json {
            match serde_json::to_string_pretty(&names) {
                Ok(listing) => println!("{listing}"),
                Err(e) => {
                    tracing::error!("listing failed: {e}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            for name in names {
                println!("{name}");
            }
        }
        return ExitCode::SUCCESS;
    }

    let previews_dir = options.out_dir.join("previews");
    if let Err(e) = ramp_gallery::save_previews(&registry, &previews_dir) {
        tracing::error!("preview export failed: {e}");
        return ExitCode::FAILURE;
    }
    let gallery_path = options.out_dir.join("gallery.html");
    if let Err(e) = ramp_gallery::save_gallery_html(&registry, &gallery_path, options.sorted) {
        tracing::error!("gallery export failed: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!(
        "previews in {}, gallery at {}",
        previews_dir.display(),
        gallery_path.display()
    );
    ExitCode::SUCCESS
}
