use anyhow::Context;
use quiz_config::QuizConfig;

use crate::cli::Commands;

/// Load layered configuration and apply the command's flag overrides.
pub fn load_config(command: &Commands) -> anyhow::Result<QuizConfig> {
    let mut config = QuizConfig::load_with_dotenv().context("failed to load quiz configuration")?;

    match command {
        Commands::Serve(args) => {
            if let Some(bind) = &args.bind {
                config.server.bind.clone_from(bind);
            }
            if let Some(database) = &args.database {
                config.database.path.clone_from(database);
            }
        }
        Commands::Ingest(args) => {
            if let Some(data_dir) = &args.data_dir {
                config.ingest.data_dir.clone_from(data_dir);
            }
            if let Some(manifest) = &args.manifest {
                config.ingest.manifest.clone_from(manifest);
            }
            if let Some(database) = &args.database {
                config.database.path.clone_from(database);
            }
        }
    }

    config
        .validate()
        .context("invalid configuration after applying command-line overrides")?;
    Ok(config)
}
