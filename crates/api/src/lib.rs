mod dispatcher;
mod error;
mod job_schedulers;
mod memo;
mod monitor;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use duewatch_infra::DuewatchContext;
use job_schedulers::{start_memo_reminders_job_scheduler, start_verification_job_scheduler};
use std::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    memo::configure_routes(cfg);
    monitor::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    shutdown: CancellationToken,
}

impl Application {
    pub async fn new(context: DuewatchContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let shutdown = CancellationToken::new();
        Application::start_job_schedulers(context, shutdown.clone());

        Ok(Self {
            server,
            port,
            shutdown,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: DuewatchContext, shutdown: CancellationToken) {
        start_verification_job_scheduler(context.clone(), shutdown.clone());
        start_memo_reminders_job_scheduler(context, shutdown);
    }

    async fn configure_server(context: DuewatchContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        info!("Listening on port {}", port);
        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.shutdown.cancel();
        res
    }
}
