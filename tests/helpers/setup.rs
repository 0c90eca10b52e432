use actix_web::{web, App, HttpResponse, HttpServer};
use duewatch_api::Application;
use duewatch_infra::{Config, DuewatchContext};
use duewatch_sdk::DuewatchSDK;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Mutex;

pub const DAY: i64 = 1000 * 60 * 60 * 24;

/// Expiry every successful stub verification reports
pub const CERT_EXPIRES_AT: i64 = 4102444800000;

pub type Notifications = web::Data<Mutex<Vec<Value>>>;

pub struct TestApp {
    pub config: Config,
    /// Payloads received by the notification webhook
    pub notifications: Notifications,
}

impl TestApp {
    pub fn notifications_about(&self, id: &str) -> Vec<Value> {
        self.notifications
            .lock()
            .expect("Notifications lock poisoned")
            .iter()
            .filter(|n| n["id"] == id)
            .cloned()
            .collect()
    }
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// Serves `configure` on a random port as a background task
fn spawn_stub<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub listener");
    let port = listener
        .local_addr()
        .expect("Stub listener has an address")
        .port();
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .listen(listener)
        .expect("Failed to start stub server")
        .workers(1)
        .run();
    let _ = actix_web::rt::spawn(server);
    format!("http://127.0.0.1:{}", port)
}

// The verification result is picked from the download url
async fn verify(body: web::Json<Value>) -> HttpResponse {
    let url = body["downloadUrl"].as_str().unwrap_or_default();
    if url.contains("broken") {
        return HttpResponse::UnprocessableEntity().finish();
    }
    let result = if url.contains("revoked") {
        "revoked"
    } else if url.contains("expired") {
        "expired"
    } else {
        "valid"
    };
    HttpResponse::Ok().json(json!({
        "result": result,
        "detail": { "certName": "Acme" },
        "expiresAt": CERT_EXPIRES_AT,
    }))
}

async fn receive_notification(
    body: web::Json<Value>,
    notifications: Notifications,
) -> HttpResponse {
    notifications
        .lock()
        .expect("Notifications lock poisoned")
        .push(body.into_inner());
    HttpResponse::Ok().finish()
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, DuewatchSDK, String) {
    let verifier_address = spawn_stub(|cfg| {
        cfg.route("/verify", web::post().to(verify));
    });

    let notifications: Notifications = web::Data::new(Mutex::new(Vec::new()));
    let sink = notifications.clone();
    let notifier_address = spawn_stub(move |cfg| {
        cfg.app_data(sink.clone())
            .route("/notify", web::post().to(receive_notification));
    });

    let mut config = Config::new();
    config.port = 0; // Random port
    config.verifier_url = Some(format!("{}/verify", verifier_address));
    config.notifier_webhook_url = Some(format!("{}/notify", notifier_address));

    let ctx = DuewatchContext::create(config.clone());
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        notifications,
    };
    let sdk = DuewatchSDK::new(address.clone());
    (app, sdk, address)
}
