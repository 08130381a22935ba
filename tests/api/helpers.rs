use once_cell::sync::Lazy;
use portfolio_contact::email_client::SendEmailRequest;
use portfolio_contact::get_configuration;
use portfolio_contact::startup::Application;
use portfolio_contact::telemetry::{get_subscriber, init_subscriber};
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub recipient: String,
}

impl TestApp {
    pub async fn post_contact(&self, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/contact", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact_raw(&self, body: &'static str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/contact", &self.address))
            .header("Content-Type", "text/plain")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Bodies of every request the email provider received, in order.
    pub async fn relayed_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
            .iter()
            .map(|request| {
                let body: SendEmailRequest =
                    serde_json::from_slice(&request.body).expect("Invalid email request body");
                serde_json::json!({
                    "from": body.from,
                    "to": body.to,
                    "reply_to": body.reply_to,
                    "subject": body.subject,
                    "html": body.html,
                    "text": body.text,
                })
            })
            .collect()
    }
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to set subscriber");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to set subscriber");
    }
});

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = 0;
        c.email_client.base_url = email_server.uri();
        c.email_client.timeout = Some(std::time::Duration::from_millis(500));
        c
    };
    let recipient = configuration.contact.recipient_email.as_ref().to_string();

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        email_server,
        recipient,
    }
}
