// src/main.rs

use tokio::net::TcpListener;

use hotelaria_backend::{app, config::AppState};

#[tokio::main]
async fn main() {
    // Logger primeiro: tudo daqui pra frente já sai estruturado
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Failed to initialize the application state");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Failed to run the database migrations");

    tracing::info!("✅ Database migrations applied");

    let router = app(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind the TCP listener");
    tracing::info!("🚀 Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, router).await.expect("Axum server error");
}
