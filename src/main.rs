//! QuizPal Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use tokio::sync::watch;
use tracing::{error, info, warn};

use QuizPal::{
    api::run_api_server,
    config::Settings,
    facades::FacadeFactory,
    handlers::{
        callbacks::handle_callback_query,
        commands::{handle_command, Command},
        inline::handle_inline_query,
        messages::handle_text_message,
    },
    i18n::I18n,
    reminders::ReminderConsumer,
    state::StateStorage,
    storage::{connection, RequestStore},
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Stored callback payloads outlive any realistic keyboard by this much
const REQUEST_RETENTION_DAYS: i64 = 30;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    dotenv::dotenv().ok();
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the rolling file writer flushing
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting QuizPal Telegram Bot...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = connection::create_pool(&settings.database).await?;
    connection::run_migrations(&db_pool).await?;

    // Initialize i18n system
    info!("Loading translations...");
    let mut i18n = I18n::new(&settings.i18n);
    i18n.load_translations().await?;

    // Initialize state management
    let state_storage = StateStorage::new(settings.redis.clone()).await?;

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Initialize facades over the registration gateway
    info!("Initializing facades...");
    let facades = FacadeFactory::new(bot.clone(), &settings)?;
    let request_store = RequestStore::new(db_pool);

    // Background workers share one shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let consumer = ReminderConsumer::new(
        &settings.redis,
        facades.clone(),
        i18n.clone(),
        settings.i18n.default_language.clone(),
    )
    .await?;
    let consumer_handle = tokio::spawn(consumer.run(shutdown_rx.clone()));

    // Daily sweep of expired callback request rows
    let purge_store = request_store.clone();
    let mut purge_shutdown = shutdown_rx.clone();
    let purge_handle = tokio::spawn(async move {
        let mut tick = tokio::time::interval(std::time::Duration::from_secs(24 * 60 * 60));
        loop {
            tokio::select! {
                _ = purge_shutdown.changed() => {
                    if *purge_shutdown.borrow() {
                        break;
                    }
                }
                _ = tick.tick() => {
                    match purge_store.purge_older_than(REQUEST_RETENTION_DAYS).await {
                        Ok(deleted) if deleted > 0 => {
                            info!(deleted = deleted, "Purged expired callback requests");
                        }
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "Callback request purge failed"),
                    }
                }
            }
        }
    });

    let api_config = settings.api.clone();
    let api_notification = facades.notification.clone();
    let api_shutdown = shutdown_rx.clone();
    let api_handle = tokio::spawn(async move {
        if let Err(e) = run_api_server(&api_config, api_notification, api_shutdown).await {
            error!(error = %e, "API server terminated with error");
        }
    });

    info!("Setting up bot handlers...");

    let facades_arc = Arc::new(facades);
    let request_store_arc = Arc::new(request_store);
    let state_storage_arc = Arc::new(state_storage);
    let i18n_arc = Arc::new(i18n);

    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![
            facades_arc,
            request_store_arc,
            state_storage_arc,
            i18n_arc
        ])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("QuizPal bot is ready!");
    dispatcher.dispatch().await;

    // Polling stopped, wind the workers down
    let _ = shutdown_tx.send(true);
    let _ = consumer_handle.await;
    let _ = purge_handle.await;
    let _ = api_handle.await;

    info!("QuizPal bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(dptree::endpoint(handle_messages)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
        .branch(Update::filter_inline_query().endpoint(handle_inline))
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    facades: Arc<FacadeFactory>,
    store: Arc<RequestStore>,
    state: Arc<StateStorage>,
    i18n: Arc<I18n>,
) -> HandlerResult {
    let result = handle_command(
        bot,
        msg,
        cmd,
        (*facades).clone(),
        (*store).clone(),
        (*state).clone(),
        (*i18n).clone(),
    )
    .await;

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }
    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    facades: Arc<FacadeFactory>,
    store: Arc<RequestStore>,
    state: Arc<StateStorage>,
    i18n: Arc<I18n>,
) -> HandlerResult {
    let result = handle_text_message(
        bot,
        msg,
        (*facades).clone(),
        (*store).clone(),
        (*state).clone(),
        (*i18n).clone(),
    )
    .await;

    if let Err(e) = result {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }
    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    facades: Arc<FacadeFactory>,
    store: Arc<RequestStore>,
    state: Arc<StateStorage>,
    i18n: Arc<I18n>,
) -> HandlerResult {
    let user_id = query.from.id.0 as i64;

    let result = handle_callback_query(
        bot,
        query,
        (*facades).clone(),
        (*store).clone(),
        (*state).clone(),
        (*i18n).clone(),
    )
    .await;

    if let Err(e) = result {
        error!(user_id = user_id, error = %e, "Error handling callback query");
        return Err(e.into());
    }
    Ok(())
}

/// Handle inline queries
async fn handle_inline(
    bot: Bot,
    query: teloxide::types::InlineQuery,
    facades: Arc<FacadeFactory>,
    i18n: Arc<I18n>,
) -> HandlerResult {
    if let Err(e) = handle_inline_query(bot, query, (*facades).clone(), (*i18n).clone()).await {
        error!(error = %e, "Error handling inline query");
        return Err(e.into());
    }
    Ok(())
}
