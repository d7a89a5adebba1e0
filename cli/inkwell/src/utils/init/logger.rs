use std::sync::OnceLock;

use tracing::{debug, error};
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload::Handle;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::commands::Verbosity;

static LOGGER_HANDLE: OnceLock<Handle<EnvFilter, Registry>> = OnceLock::new();

/// The filter used unless `RUST_LOG` is set.
pub(crate) fn log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        // Show only errors
        Verbosity::Quiet => "off,inkwell=error",
        // Only show warnings
        Verbosity::Verbose(0) => "off,inkwell=warn,inkwell_client=warn,inkwell_sdk=warn",
        // Show our own info logs
        Verbosity::Verbose(1) => "off,inkwell=info,inkwell_client=info,inkwell_sdk=info",
        // Also show debug from our libraries
        Verbosity::Verbose(2) => "off,inkwell=debug,inkwell_client=debug,inkwell_sdk=debug",
        // Also show trace from our libraries
        Verbosity::Verbose(3) => "off,inkwell=trace,inkwell_client=trace,inkwell_sdk=trace",
        Verbosity::Verbose(_) => "trace",
    }
}

pub(crate) fn init_logger(verbosity: Option<Verbosity>) {
    let log_filter = log_filter(verbosity.unwrap_or_default());

    let filter_handle = LOGGER_HANDLE.get_or_init(|| {
        let (subscriber, reload_handle) = create_registry_and_filter_reload_handle();
        subscriber.init();
        reload_handle
    });

    update_filters(filter_handle, log_filter);
}

pub fn update_filters(filter_handle: &Handle<EnvFilter, Registry>, log_filter: &str) {
    let result = filter_handle.modify(|layer| {
        match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_filter)) {
            Ok(new_filter) => *layer = new_filter,
            Err(err) => {
                error!("Updating logger filter failed: {}", err);
            },
        };
    });
    if let Err(err) = result {
        error!("Updating logger filter failed: {}", err);
    }
}

pub fn create_registry_and_filter_reload_handle() -> (
    impl tracing_subscriber::layer::SubscriberExt,
    Handle<EnvFilter, Registry>,
) {
    debug!("Initializing logger");
    // Start permissive and narrow down in `update_filters`.
    let filter = EnvFilter::new("trace");
    let (filter, filter_reload_handle) = tracing_subscriber::reload::Layer::new(filter);
    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .event_format(tracing_subscriber::fmt::format())
        .with_filter(filter);
    let registry = tracing_subscriber::registry().with(log_layer);

    (registry, filter_reload_handle)
}
