// region:    --- Imports
use livestock_admin::clock::{Clock, SystemClock};
use livestock_admin::config::{AppConfig, GatewayBackend};
use livestock_admin::database::DatabaseManager;
use livestock_admin::gateway::{Gateway, MemoryGateway, PostgresGateway};
use livestock_admin::handlers::{self, AppState};
use livestock_admin::message_broker::KafkaManager;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::Duration;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;
    info!("{:<12} --> 설정 로드: backend={:?}", "Main", config.backend);

    let gateway = build_gateway(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = AppState::new(gateway, Arc::clone(&clock), config.page_size);

    // 화면 사본 동기화 및 변경 이벤트 기반 정리
    state.spawn_view_sync();
    state.sweeper.watch_changes();

    // 시작 시 1회 정리 후 주기 실행
    state.sweeper.run_once().await.log();
    state
        .sweeper
        .start(Duration::from_secs(config.sweep_interval_secs));

    let routes_all = handlers::routes(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main

// region:    --- Gateway Setup
async fn build_gateway(
    config: &AppConfig,
) -> Result<Arc<dyn Gateway>, Box<dyn std::error::Error>> {
    match config.backend {
        GatewayBackend::Memory => {
            info!("{:<12} --> 메모리 게이트웨이 사용", "Main");
            Ok(Arc::new(MemoryGateway::new()))
        }
        GatewayBackend::Postgres => {
            let db_manager = DatabaseManager::connect(config).await?;
            if config.init_schema {
                if let Err(e) = db_manager.initialize_database().await {
                    error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
                    return Err(e.into());
                }
                info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
            }

            let kafka_manager = KafkaManager::from_config(config)?;
            kafka_manager.create_changes_topic(5, 1).await?;

            let gateway = PostgresGateway::new(
                db_manager.get_pool(),
                Some(kafka_manager.get_producer()),
            );

            // Kafka 변경 이벤트 -> 로컬 구독 채널
            let consumer = kafka_manager.get_consumer();
            let sink = gateway.change_sink();
            tokio::spawn(async move {
                if let Err(e) = consumer.forward_changes(sink).await {
                    error!("{:<12} --> 변경 구독 중단: {}", "Main", e);
                }
            });

            Ok(Arc::new(gateway))
        }
    }
}
// endregion: --- Gateway Setup
