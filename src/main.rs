use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use student_roster::{AppState, Config, CustomError};

#[tokio::main]
async fn main() -> Result<(), CustomError> {
    let config = Config::from_env()?;

    TermLogger::init(
        config.log_level,
        ConfigBuilder::new().build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .map_err(|err| CustomError::UnknownError(err.to_string()))?;

    let state = AppState::build(&config).await?;
    let summary = state.dashboard().await;
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|err| CustomError::UnknownError(err.to_string()))?;
    println!("{}", json);

    Ok(())
}
