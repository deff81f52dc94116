use clap::{Arg, Command};
use spaces_backend::{
    config::Config,
    init_tracing,
    services::alarm_service::{AlarmEvent, AlarmForwarder},
};
use std::io::Read;
use validator::Validate;

fn read_event(path: Option<&String>) -> Result<AlarmEvent, Box<dyn std::error::Error>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    // Only the logging and webhook settings matter here; JWT settings are not checked
    let config: Config = envy::from_env()?;
    config.validate()?;
    init_tracing(&config);

    let matches = Command::new("Alarm Forwarder")
        .version("1.0")
        .about("Relays alarm notifications to a chat webhook")
        .arg(
            Arg::new("event-file")
                .short('f')
                .long("event-file")
                .value_name("PATH")
                .help("Notification event JSON (reads stdin when omitted)"),
        )
        .arg(
            Arg::new("webhook-url")
                .short('w')
                .long("webhook-url")
                .value_name("URL")
                .help("Chat webhook URL (defaults to ALARM_WEBHOOK_URL)"),
        )
        .get_matches();

    let webhook_url = match matches.get_one::<String>("webhook-url") {
        Some(url) => url.clone(),
        None => config
            .alarm_webhook_url
            .clone()
            .ok_or("no webhook URL given and ALARM_WEBHOOK_URL is not set")?,
    };

    let event = read_event(matches.get_one::<String>("event-file"))?;
    let forwarder = AlarmForwarder::new(webhook_url);

    match forwarder.forward(&event).await {
        Ok(count) => {
            tracing::info!(count, "Alarm event relayed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to relay alarm event: {}", e);
            Err(e.into())
        }
    }
}
