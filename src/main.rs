use std::process::ExitCode;
use std::sync::Arc;

use spotmap::api::DynAPI;
use spotmap::config::Config;
use spotmap::external::spots::SpotsClient;
use spotmap::server::serve;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let api = Arc::new(SpotsClient::from_config(&config)) as DynAPI;

    if let Err(err) = serve(api, &config).await {
        tracing::error!("{}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
