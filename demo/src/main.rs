use std::io;
use std::path::PathBuf;
use std::time::Instant;

use config::ConfigType;
use misc::logging::LoggerBuilder;
use misc::*;

use crate::render::GridPrinter;

mod render;
mod scenarios;

/// Prints and sanity checks fixed-shape grids
#[derive(argh::FromArgs)]
struct Args {
    /// path to a RON config file
    #[argh(option)]
    config: Option<PathBuf>,

    /// scenario to run, can be given more than once. Defaults to the config's list, or every
    /// scenario if that is empty too
    #[argh(option)]
    scenario: Vec<String>,

    /// list scenario names and exit
    #[argh(switch)]
    list: bool,
}

fn do_main(args: Args) -> BoxedResult<()> {
    if args.list {
        for name in scenarios::all_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    // load config
    if let Some(path) = &args.config {
        info!("loading config from {:?}", path);
        config::init(ConfigType::File(path))?;
    }
    let config = config::get();

    let names = if args.scenario.is_empty() {
        &config.scenarios
    } else {
        &args.scenario
    };
    let selected = scenarios::select(names)?;

    let printer = GridPrinter::new(&config.display);
    for scenario in &selected {
        info!("running scenario"; "name" => scenario.name);
        scenario.run(&printer)?;
    }

    info!("all scenarios passed"; "count" => selected.len());
    Ok(())
}

fn main() {
    let args = argh::from_env::<Args>();

    let start = Instant::now();
    let logger = LoggerBuilder::with_env().and_then(|builder| {
        builder.init(move |out: &mut dyn io::Write| {
            write!(out, "{:.3}", start.elapsed().as_secs_f32())
        })
    });

    let logger = match logger {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };
    debug!("initialized logging"; "level" => ?logger.level());

    let exit = match do_main(args) {
        Err(e) => {
            error!("error: {}", e);

            let mut src = e.source();
            while let Some(source) = src {
                error!(" caused by: {}", source);
                src = source.source();
            }

            1
        }
        Ok(()) => 0,
    };

    info!("exiting with exit code {}", exit);

    // flush queued records before exiting
    drop(logger);
    std::process::exit(exit);
}
