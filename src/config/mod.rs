mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{
    BrokerSettings, LoggingSettings, ReceiverSettings, SenderSettings, Settings,
};

/// Prefix for environment overrides, e.g. `RABBIT_DEMO_BROKER__URI`.
pub const ENV_PREFIX: &str = "RABBIT_DEMO";

/// Loads the configuration from the default file and environment variables.
///
/// Values missing from both sources are taken from `Settings::default()`.
/// Environment values are kept as strings; numeric keys are converted when
/// deserialized, so a name like `01` stays `"01"`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(merge(partial, Settings::default()))
}

fn merge(partial: PartialSettings, default: Settings) -> Settings {
    let broker = partial.broker;
    let sender = partial.sender;
    let receiver = partial.receiver;
    let logging = partial.logging;

    Settings {
        broker: BrokerSettings {
            uri: broker
                .and_then(|b| b.uri)
                .unwrap_or(default.broker.uri),
        },
        sender: SenderSettings {
            client_name: sender
                .as_ref()
                .and_then(|s| s.client_name.clone())
                .unwrap_or(default.sender.client_name),
            message_count: sender
                .as_ref()
                .and_then(|s| s.message_count)
                .unwrap_or(default.sender.message_count),
            publish_interval_secs: sender
                .as_ref()
                .and_then(|s| s.publish_interval_secs)
                .unwrap_or(default.sender.publish_interval_secs),
        },
        receiver: ReceiverSettings {
            client_name: receiver
                .as_ref()
                .and_then(|r| r.client_name.clone())
                .unwrap_or(default.receiver.client_name),
            processing_delay_secs: receiver
                .as_ref()
                .and_then(|r| r.processing_delay_secs)
                .unwrap_or(default.receiver.processing_delay_secs),
        },
        logging: LoggingSettings {
            level: logging
                .and_then(|l| l.level)
                .unwrap_or(default.logging.level),
        },
    }
}

#[cfg(test)]
mod tests;
