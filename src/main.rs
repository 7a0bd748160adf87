//! Feeder analysis entry point: CLI wiring and config-driven report rendering.

use std::process;

use feeder_analysis::cli::{self, CliOptions};
use feeder_analysis::config::AnalysisConfig;
use feeder_analysis::io::dataset::load_records;
use feeder_analysis::io::export::export_csv;
use feeder_analysis::logging;
use feeder_analysis::report::{Classifier, FeederScope, ReportEngine, SubstationScope, ViewState};
use feeder_analysis::{Error, Result};

/// Default API port when `--port` is not given.
#[cfg(feature = "api")]
const DEFAULT_PORT: u16 = 3000;

fn load_config(cli: &CliOptions) -> Result<AnalysisConfig> {
    // --config takes priority, then --preset, then the default preset
    let mut config = match (&cli.config, &cli.preset) {
        (Some(path), _) => AnalysisConfig::from_toml_file(path)?,
        (None, Some(name)) => AnalysisConfig::from_preset(name)?,
        (None, None) => AnalysisConfig::from_preset(AnalysisConfig::DEFAULT_PRESET)?,
    };
    if let Some(path) = &cli.data {
        config.report.dataset = path.clone();
    }
    if let Some(show) = cli.blocks {
        config.report.show_blocks = show;
    }
    Ok(config)
}

fn build_view(cli: &CliOptions, classifier: &Classifier) -> Result<ViewState> {
    let mut view = ViewState::default();
    if let Some(raw) = &cli.substation {
        view = view.with_substation(SubstationScope::resolve(raw, classifier));
    }
    if let Some(raw) = &cli.feeder {
        let feeder: FeederScope = raw.parse().map_err(|e| Error::Usage(format!("{e}")))?;
        view = view.with_feeder(feeder);
    }
    if let Some(query) = &cli.query {
        view = view.with_query(query);
    }
    Ok(view.with_min_kva(cli.min_kva))
}

fn run(cli: &CliOptions) -> Result<()> {
    let config = load_config(cli)?;

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        return Err(Error::Usage(format!(
            "configuration has {} error(s)",
            errors.len()
        )));
    }

    let classifier = config.classifier()?;
    let records = load_records(&config.report.dataset)?;
    let engine = ReportEngine::new(records, classifier);

    let view = build_view(cli, engine.classifier())?;
    tracing::debug!(?view, show_blocks = config.report.show_blocks, "rendering report");
    let report = engine.render(&view, config.report.show_blocks);

    println!("{report}");

    if let Some(path) = &cli.csv_out {
        export_csv(&report, path)?;
        tracing::info!(path = %path.display(), "report written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(feeder_analysis::api::AppState {
            engine,
            show_blocks: config.report.show_blocks,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port.unwrap_or(DEFAULT_PORT)));
        let rt = tokio::runtime::Runtime::new().map_err(Error::Server)?;
        rt.block_on(feeder_analysis::api::serve(state, addr))
            .map_err(Error::Server)?;
    }

    Ok(())
}

fn main() {
    logging::init();

    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
