use crate::configuration::Settings;
use crate::domain::EmailAddress;
use crate::email_client::EmailClient;
use crate::email_templates::EmailTemplates;
use crate::routes::{ContactRecipient, health_check, json_config, submit_contact};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web::Data};
use anyhow::Context;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_client = configuration
            .email_client
            .client()
            .context("Failed to build the email provider client.")?;
        let templates = EmailTemplates::new().context("Failed to load the email templates.")?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener =
            TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}"))?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            email_client,
            templates,
            configuration.contact.recipient_email,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    templates: EmailTemplates,
    recipient: EmailAddress,
) -> Result<Server, std::io::Error> {
    let email_client = Data::new(email_client);
    let templates = Data::new(templates);
    let recipient = Data::new(ContactRecipient(recipient));
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(email_client.clone())
            .app_data(templates.clone())
            .app_data(recipient.clone())
            .service(health_check)
            .service(submit_contact)
    })
    .listen(listener)?
    .run();
    Ok(server)
}
