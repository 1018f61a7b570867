mod mail;

pub use mail::{IMailer, NoopMailer, RelayMailer};
