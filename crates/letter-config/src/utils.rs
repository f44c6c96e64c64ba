use config::{Config, File};
use std::path::{Path, PathBuf};

use super::*;

/// A helper function that will search for all config files in the given directory and return them as a vec
/// of the paths.
///
/// Supported file extensions are:
/// - `.toml`.
/// - `.json`.
pub fn search_config_files<P: AsRef<Path>>(
    base_dir: P,
) -> letter_utils::Result<Vec<PathBuf>> {
    // A pattern that covers all toml or json files in the config directory and subdirectories.
    let toml_pattern = format!("{}/**/*.toml", base_dir.as_ref().display());
    let json_pattern = format!("{}/**/*.json", base_dir.as_ref().display());
    tracing::trace!(
        "Loading config files from {} and {}",
        toml_pattern,
        json_pattern
    );
    let toml_files = glob::glob(&toml_pattern)?;
    let json_files = glob::glob(&json_pattern)?;
    toml_files
        .chain(json_files)
        .map(|v| v.map_err(letter_utils::Error::from))
        .collect()
}

/// Try to parse the [`OpenLetterConfig`] from the given config file(s).
pub fn parse_from_files(
    files: &[PathBuf],
) -> letter_utils::Result<OpenLetterConfig> {
    let mut builder = Config::builder();
    for config_file in files {
        tracing::trace!("Loading config file: {}", config_file.display());
        // get file extension
        let ext = config_file
            .extension()
            .map(|e| e.to_str().unwrap_or(""))
            .unwrap_or("");
        let format = match ext {
            "toml" => config::FileFormat::Toml,
            "json" => config::FileFormat::Json,
            _ => {
                tracing::warn!("Unknown file extension: {}", ext);
                continue;
            }
        };
        builder = builder
            .add_source(File::from(config_file.as_path()).format(format));
    }

    // also merge in the environment (with a prefix of LETTER).
    let builder = builder
        .add_source(config::Environment::with_prefix("LETTER").separator("_"));
    let cfg = builder.build()?;
    // and finally deserialize the config and post-process it
    let config: Result<
        OpenLetterConfig,
        serde_path_to_error::Error<config::ConfigError>,
    > = serde_path_to_error::deserialize(cfg);
    match config {
        Ok(c) => postloading_process(c),
        Err(e) => {
            tracing::error!("{}", e);
            Err(e.into())
        }
    }
}

/// Load the configuration files from the given directory.
///
/// it is the same as using the [`search_config_files`] and
/// [`parse_from_files`] functions combined.
pub fn load<P: AsRef<Path>>(
    path: P,
) -> letter_utils::Result<OpenLetterConfig> {
    parse_from_files(&search_config_files(path)?)
}

/// The postloading_process exists to validate configuration and warn about
/// configurations that degrade the service.
pub fn postloading_process(
    config: OpenLetterConfig,
) -> letter_utils::Result<OpenLetterConfig> {
    tracing::trace!("Checking configration sanity ...");
    if config.ens.provider_url().is_err() {
        tracing::warn!(
            "!!WARNING!!: No RPC provider configured for ENS lookups,
            signers will be recorded without a resolved name."
        );
    }
    tracing::trace!(
        "postloaded config: {}",
        serde_json::to_string_pretty(&config)?
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_port_and_api_key_from_env() {
        std::env::set_var("OPEN_LETTER_TEST_KEY", "deadbeefcafebabe");
        let dir = tempfile::tempdir().unwrap();
        let mut f =
            std::fs::File::create(dir.path().join("open-letter.toml")).unwrap();
        writeln!(f, "port = 4200").unwrap();
        writeln!(f, "[ens]").unwrap();
        writeln!(f, "api-key = \"$OPEN_LETTER_TEST_KEY\"").unwrap();
        drop(f);

        let config = load(dir.path()).unwrap();
        assert_eq!(config.port, 4200);
        let url = config.ens.provider_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://mainnet.infura.io/v3/deadbeefcafebabe"
        );
        std::env::remove_var("OPEN_LETTER_TEST_KEY");
    }

    #[test]
    fn port_defaults_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut f =
            std::fs::File::create(dir.path().join("open-letter.toml")).unwrap();
        writeln!(f, "[ens]").unwrap();
        writeln!(f, "http-endpoint = \"https://rpc.example.com/\"").unwrap();
        drop(f);

        let config = load(dir.path()).unwrap();
        assert_eq!(config.port, 3000);
        let url = config.ens.provider_url().unwrap();
        assert_eq!(url.as_str(), "https://rpc.example.com/");
    }

    #[test]
    fn missing_provider_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut f =
            std::fs::File::create(dir.path().join("open-letter.toml")).unwrap();
        writeln!(f, "port = 3000").unwrap();
        drop(f);

        let config = load(dir.path()).unwrap();
        assert!(matches!(
            config.ens.provider_url(),
            Err(letter_utils::Error::MissingSecrets)
        ));
    }
}
