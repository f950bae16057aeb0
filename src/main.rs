use clap::Parser;
use inference_xds::{Configuration, ResourceGenerator};
use tracing::info;
use tracing_subscriber::{
    filter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CommandArgs {
    #[arg(long)]
    with_config_file: String,
}

fn init_tracing_logging() {
    let console_filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()));

    let console_layer = fmt::layer()
        .event_format(fmt::format().compact())
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false)
        .with_filter(filter::filter_fn(|meta| !meta.is_span()))
        .with_filter(console_filter);

    Registry::default().with(console_layer).init();
}

fn main() -> inference_xds::Result<()> {
    let args = CommandArgs::parse();
    init_tracing_logging();

    info!("Loading model from {}", args.with_config_file);
    let configuration: Configuration = serde_yaml::from_str(&std::fs::read_to_string(args.with_config_file)?)?;
    configuration.validate()?;

    let resources = ResourceGenerator::new(&configuration).generate_resources()?;
    for (type_url, resource) in resources.to_discovery_resources()?.iter() {
        println!("{type_url} {}", resource.name);
    }
    Ok(())
}
