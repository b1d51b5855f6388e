use config::Config;
use dotenv::dotenv;
use repositories::SupabaseRepo;
use routes::{configure_cors, create_router};
use services::{posts::PostsService, upload::UploadService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::{path::PathBuf, sync::Arc};

pub use self::errors::{Error, Result};

mod config;
mod errors;
mod handlers;
mod models;
mod repositories;
mod routes;
mod services;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub posts_service: PostsService,
    pub upload_service: UploadService,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend_devblog=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::init();

    let upload_dir = PathBuf::from(&config.upload_dir);
    if let Err(err) = std::fs::create_dir_all(&upload_dir) {
        println!("🔥 Failed to create the uploads directory: {:?}", err);
        std::process::exit(1);
    }

    let db_blog = SupabaseRepo::new(&config);
    println!("✅ Supabase client is ready!");

    let app_state = AppState {
        config: config.clone(),
        posts_service: PostsService::new(Arc::new(db_blog)),
        upload_service: UploadService::new(upload_dir),
    };

    let app = create_router(Arc::new(app_state)).layer(configure_cors());

    let listener = tokio::net::TcpListener::bind(format!("[::]:{}", config.port))
        .await
        .unwrap();
    println!("✅ Server is running on port {}!", config.port);
    axum::serve(listener, app).await.unwrap();
}
