use campus_scheduler_utils::create_random_secret;
use chrono_tz::Tz;
use tracing::{info, warn};

/// Mail relay endpoint the dispatcher posts outbound notifications to.
/// SMTP itself lives behind the relay and is not this service's concern.
#[derive(Debug, Clone)]
pub struct MailRelayConfig {
    pub url: String,
    pub key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret expected in the `campus-admin-api-key` header of the
    /// manual trigger endpoint
    pub admin_api_key: String,
    /// Timezone in which calendar days are computed for the match window
    pub scheduler_timezone: Tz,
    /// Wall-clock hour (in `scheduler_timezone`) at which the daily
    /// reminder scan starts
    pub reminder_scan_hour: u32,
    /// Lead-time values (whole days) the scan iterates, in order
    pub reminder_lead_times: Vec<u32>,
    /// Recipient of the synthetic reminder emitted in degraded mode
    pub fallback_email: String,
    /// Outbound mail relay; `None` means sends are logged and dropped
    pub mail_relay: Option<MailRelayConfig>,
}

pub fn parse_lead_times(raw: &str) -> Result<Vec<u32>, String> {
    let mut lead_times = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<u32>() {
            Ok(0) | Err(_) => return Err(part.to_string()),
            Ok(days) => {
                if !lead_times.contains(&days) {
                    lead_times.push(days);
                }
            }
        }
    }
    if lead_times.is_empty() {
        return Err(raw.to_string());
    }
    Ok(lead_times)
}

impl Config {
    pub fn new() -> Self {
        let admin_api_key = match std::env::var("ADMIN_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find ADMIN_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(30);
                info!(
                    "Admin API key for the manual trigger endpoint was generated and set to: {}",
                    key
                );
                key
            }
        };

        let default_port = "5100";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let scheduler_timezone = match std::env::var("SCHEDULER_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given SCHEDULER_TIMEZONE: {} is not a valid timezone name, falling back to UTC.",
                        tz
                    );
                    Tz::UTC
                }
            },
            Err(_) => Tz::UTC,
        };

        let default_scan_hour = 6;
        let reminder_scan_hour = match std::env::var("REMINDER_SCAN_HOUR") {
            Ok(hour) => match hour.parse::<u32>() {
                Ok(hour) if hour < 24 => hour,
                _ => {
                    warn!(
                        "The given REMINDER_SCAN_HOUR: {} is not an hour between 0 and 23, falling back to {}.",
                        hour, default_scan_hour
                    );
                    default_scan_hour
                }
            },
            Err(_) => default_scan_hour,
        };

        let reminder_lead_times = match std::env::var("REMINDER_LEAD_TIMES") {
            Ok(raw) => match parse_lead_times(&raw) {
                Ok(lead_times) => lead_times,
                Err(bad) => {
                    warn!(
                        "The given REMINDER_LEAD_TIMES contains an invalid entry: {}, falling back to 1,3,7.",
                        bad
                    );
                    vec![1, 3, 7]
                }
            },
            Err(_) => vec![1, 3, 7],
        };

        let fallback_email = std::env::var("FALLBACK_EMAIL")
            .unwrap_or_else(|_| "degraded@campus.local".to_string());

        let mail_relay = match std::env::var("MAIL_RELAY_URL") {
            Ok(url) => Some(MailRelayConfig {
                url,
                key: std::env::var("MAIL_RELAY_KEY").unwrap_or_default(),
                from: std::env::var("MAIL_FROM")
                    .unwrap_or_else(|_| "no-reply@campus.local".to_string()),
            }),
            Err(_) => {
                info!("Did not find MAIL_RELAY_URL environment variable. Outbound notifications will be logged and dropped.");
                None
            }
        };

        Self {
            port,
            admin_api_key,
            scheduler_timezone,
            reminder_scan_hour,
            reminder_lead_times,
            fallback_email,
            mail_relay,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
