use poem::{listener::TcpListener, middleware::Tracing, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;
use rta_backend::api::{
    ActivitiesApi, AuthApi, DocumentsApi, NotificationsApi, OrdersApi, ResidentsApi,
};
use rta_backend::app_data::AppData;
use rta_backend::config::{init_logging, AppSettings};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();

    if let Err(err) = init_logging() {
        eprintln!("Failed to initialize logging: {err}");
    }

    let settings = AppSettings::from_env();
    let app_data = AppData::init(settings.clone())
        .await
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;

    let api_service = OpenApiService::new(
        (
            AuthApi::new(
                app_data.storage.clone(),
                app_data.sessions.clone(),
                app_data.fanout.clone(),
            ),
            DocumentsApi::new(app_data.documents.clone(), app_data.sessions.clone()),
            OrdersApi::new(app_data.orders.clone(), app_data.sessions.clone()),
            ResidentsApi::new(app_data.storage.clone(), app_data.sessions.clone()),
            NotificationsApi::new(
                app_data.storage.clone(),
                app_data.fanout.clone(),
                app_data.sessions.clone(),
            ),
            ActivitiesApi::new(app_data.storage.clone(), app_data.sessions.clone()),
        ),
        "Report Transfer Application API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", settings.bind_addr));

    let ui = api_service.swagger_ui();
    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(Tracing);

    tracing::info!("Starting server on http://{}", settings.bind_addr);
    tracing::info!("Swagger UI available at /swagger");

    Server::new(TcpListener::bind(settings.bind_addr))
        .run(app)
        .await
}
