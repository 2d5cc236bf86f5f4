use typecatalog::{app, config::AppConfig, db, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = AppConfig::from_env()?;
    let pool = db::connect(&config.db).await?;
    db::migrate(&pool).await;

    let app = app::build_app(AppState::postgres(pool));
    app::serve(app, &config.api).await
}
