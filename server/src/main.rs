use error_stack::ResultExt;
use kernel::KernelError;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::config::{Config, SITE_NAME};
use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::route::{AdminRouter, ApiRouter, BookingRouter, ProfileRouter, VenueRouter};

mod config;
mod controller;
mod error;
mod extract;
mod handler;
mod request;
mod response;
mod route;

const DEFAULT_LOG_FILTER: &str =
    "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info";

fn router(app: AppModule) -> axum::Router {
    axum::Router::new()
        .route_venue()
        .route_booking()
        .route_profile()
        .route_api()
        .route_admin()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(app)
}

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN is not set, the admin panel will refuse every request");
    }

    let app = AppModule::new(&config).await?;

    let tcp = TcpListener::bind(config.bind_addr)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen on {}", config.bind_addr))?;
    tracing::info!("{SITE_NAME} listening on {}", config.bind_addr);

    axum::serve(tcp, router(app).into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::extract::USER_ID_HEADER;
    use crate::handler::AppModule;

    async fn app(admin_token: Option<&str>) -> axum::Router {
        let config = Config {
            bind_addr: ([127, 0, 0, 1], 0).into(),
            admin_token: admin_token.map(str::to_string),
            log_dir: "./logs/".into(),
            utc_offset: time::UtcOffset::UTC,
        };
        super::router(AppModule::new(&config).await.unwrap())
    }

    async fn status_of(app: &axum::Router, request: Request<Body>) -> StatusCode {
        app.clone().oneshot(request).await.unwrap().status()
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn admin_requires_the_configured_token() {
        let app = app(Some("secret")).await;
        let anonymous = Request::get("/admin/statistics").body(Body::empty()).unwrap();
        assert_eq!(status_of(&app, anonymous).await, StatusCode::UNAUTHORIZED);

        let wrong = Request::get("/admin/statistics")
            .header(header::AUTHORIZATION, "Bearer nope")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(&app, wrong).await, StatusCode::UNAUTHORIZED);

        let right = Request::get("/admin/statistics")
            .header(header::AUTHORIZATION, "Bearer secret")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(&app, right).await, StatusCode::OK);
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn admin_is_closed_without_a_token() {
        let app = app(None).await;
        let request = Request::get("/admin/bookings")
            .header(header::AUTHORIZATION, "Bearer anything")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(&app, request).await, StatusCode::UNAUTHORIZED);
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn customer_routes() {
        let app = app(None).await;
        let anonymous = Request::get("/profile").body(Body::empty()).unwrap();
        assert_eq!(status_of(&app, anonymous).await, StatusCode::UNAUTHORIZED);

        let stranger = Request::get("/profile")
            .header(USER_ID_HEADER, Uuid::new_v4().to_string())
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(&app, stranger).await, StatusCode::NOT_FOUND);

        let missing = Request::get(format!("/api/venues/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(&app, missing).await, StatusCode::NOT_FOUND);

        let listing = Request::get("/venues?page=1&has_sauna=on")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(&app, listing).await, StatusCode::OK);

        let low_page = Request::get("/venues?page=0").body(Body::empty()).unwrap();
        assert_eq!(status_of(&app, low_page).await, StatusCode::OK);
    }

    async fn json_of(app: &axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn booking_form_reports_past_date_with_other_fields() {
        let app = app(Some("secret")).await;
        let venue = serde_json::json!({
            "name": "Blue Lagoon",
            "address": "Samarkand",
            "hourly_rate": "80000",
            "capacity": 25,
            "opening_time": "09:00",
            "closing_time": "21:00"
        });
        let (status, created) = json_of(
            &app,
            Request::post("/admin/venues")
                .header(header::AUTHORIZATION, "Bearer secret")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(venue.to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let venue_id = created["id"].as_str().unwrap().to_string();

        let form = serde_json::json!({
            "booking_date": "2000-01-01",
            "start_time": "10:00",
            "duration_hours": 2,
            "number_of_people": 4,
            "customer_name": "Aziza Karimova",
            "customer_phone": "+998901234567",
            "customer_address": "Tashkent",
            "customer_age": 0
        });
        let (status, body) = json_of(
            &app,
            Request::post(format!("/venues/{venue_id}/book"))
                .header(USER_ID_HEADER, Uuid::new_v4().to_string())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["booking_date"].is_array());
        assert!(body["fields"]["customer_age"].is_array());

        let delete = Request::delete(format!("/admin/venues/{venue_id}"))
            .header(header::AUTHORIZATION, "Bearer secret")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(&app, delete).await, StatusCode::NO_CONTENT);
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn venue_form_reports_price_and_hours_together() {
        let app = app(Some("secret")).await;
        let venue = serde_json::json!({
            "name": "Blue Lagoon",
            "address": "Samarkand",
            "hourly_rate": "9999999999.99",
            "capacity": 25,
            "opening_time": "nine",
            "closing_time": "21:00"
        });
        let (status, body) = json_of(
            &app,
            Request::post("/admin/venues")
                .header(header::AUTHORIZATION, "Bearer secret")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(venue.to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["price_per_hour"].is_array());
        assert!(body["fields"]["opening_time"].is_array());
    }
}
