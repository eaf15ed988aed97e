use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use seedgauge_config::{ConfigError, ExporterConfig, LogSettings};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_yields_defaults() -> anyhow::Result<()> {
    let config = ExporterConfig::from_lookup(lookup_from(&[]))?;
    assert_eq!(config, ExporterConfig::default());
    assert_eq!(config.poll_interval, Duration::from_secs(10));
    assert_eq!(config.poll_timeout, config.poll_interval);
    assert_eq!(config.listen_addr, "127.0.0.1:8091".parse::<SocketAddr>()?);
    assert_eq!(config.namespace, "utorrent");
    assert!(!config.verbose);
    Ok(())
}

#[test]
fn environment_overrides_every_setting() -> anyhow::Result<()> {
    let config = ExporterConfig::from_lookup(lookup_from(&[
        ("SEEDGAUGE_POLL_SECONDS", "30"),
        ("SEEDGAUGE_POLL_TIMEOUT_SECONDS", "5"),
        ("SEEDGAUGE_VERBOSE", "true"),
        ("SEEDGAUGE_LISTEN_ADDR", "0.0.0.0:9110"),
        ("SEEDGAUGE_METRIC_NAMESPACE", "qbt"),
        ("SEEDGAUGE_LOG_LEVEL", "seedgauge_app=debug"),
        ("SEEDGAUGE_LOG_FORMAT", "json"),
    ]))?;

    assert_eq!(config.poll_interval, Duration::from_secs(30));
    assert_eq!(config.poll_timeout, Duration::from_secs(5));
    assert!(config.verbose);
    assert_eq!(config.listen_addr, "0.0.0.0:9110".parse::<SocketAddr>()?);
    assert_eq!(config.namespace, "qbt");
    assert_eq!(
        config.logging,
        LogSettings {
            level: "seedgauge_app=debug".to_string(),
            format: Some("json".to_string()),
        }
    );
    Ok(())
}

#[test]
fn poll_timeout_follows_interval_when_unset() -> anyhow::Result<()> {
    let config = ExporterConfig::from_lookup(lookup_from(&[("SEEDGAUGE_POLL_SECONDS", "45")]))?;
    assert_eq!(config.poll_timeout, Duration::from_secs(45));
    Ok(())
}

#[test]
fn blank_values_fall_back_to_defaults() -> anyhow::Result<()> {
    let config = ExporterConfig::from_lookup(lookup_from(&[
        ("SEEDGAUGE_POLL_SECONDS", "   "),
        ("SEEDGAUGE_VERBOSE", ""),
    ]))?;
    assert_eq!(config.poll_interval, Duration::from_secs(10));
    assert!(!config.verbose);
    Ok(())
}

#[test]
fn empty_namespace_disables_prefix() -> anyhow::Result<()> {
    let config = ExporterConfig::from_lookup(lookup_from(&[("SEEDGAUGE_METRIC_NAMESPACE", "")]))?;
    assert!(config.namespace.is_empty());
    Ok(())
}

#[test]
fn invalid_values_name_the_variable() {
    let cases = [
        ("SEEDGAUGE_POLL_SECONDS", "0", "zero"),
        ("SEEDGAUGE_POLL_SECONDS", "ten", "not_an_integer"),
        ("SEEDGAUGE_POLL_TIMEOUT_SECONDS", "0", "zero"),
        ("SEEDGAUGE_VERBOSE", "perhaps", "not_a_bool"),
        ("SEEDGAUGE_LISTEN_ADDR", "nowhere", "not_a_socket_addr"),
        ("SEEDGAUGE_METRIC_NAMESPACE", "bad-name", "invalid_metric_namespace"),
        ("SEEDGAUGE_LOG_FORMAT", "yaml", "unknown_log_format"),
    ];

    for (key, raw, expected_reason) in cases {
        match ExporterConfig::from_lookup(lookup_from(&[(key, raw)])) {
            Err(ConfigError::InvalidField {
                field,
                value,
                reason,
            }) => {
                assert_eq!(field, key);
                assert_eq!(value.as_deref(), Some(raw));
                assert_eq!(reason, expected_reason);
            }
            Ok(config) => panic!("{key}={raw} unexpectedly accepted: {config:?}"),
        }
    }
}
