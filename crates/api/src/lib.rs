mod admin;
mod cron;
mod dispatch;
mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod status;
mod user;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, web::Data, App, HttpServer};
use job_schedulers::start_send_reminders_job;
use nudge_infra::NudgeContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub use dispatch::{dispatch_reminders, DispatchReport, UserDispatchOutcome};
pub use error::NudgeError;
pub use shared::auth::{Claims, CRON_SECRET_HEADER};

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    admin::configure_routes(cfg);
    cron::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
    user::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: NudgeContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: NudgeContext) {
        start_send_reminders_job(context);
    }

    async fn configure_server(context: NudgeContext) -> Result<(Server, u16), std::io::Error> {
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
                .app_data(Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
