//! Config file handlers: init, show, path.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match &args.command {
        ConfigCommand::Init { host, port } => {
            let config = Config {
                host: Some(host.clone()),
                port: *port,
                ..Config::default()
            };
            config::save_config(&config)?;
            output::print_output(
                &format!("wrote {}", config::config_path().display()),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let config = config::load_config()?;
            let out = output::render(
                &global.output,
                &config,
                || {
                    toml::to_string_pretty(&config)
                        .unwrap_or_else(|e| format!("could not render config: {e}"))
                },
                || config.host.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
