use time::macros::format_description;
use tracing_subscriber::{fmt::time::LocalTime, EnvFilter};

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    // Already initialized is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn format_number(num: usize) -> String {
    let digits = num.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Keep the first two octets of an address and mask the rest.
pub fn redact_address(address: &str) -> String {
    let parts: Vec<&str> = address.split('.').collect();
    if parts.len() != 4 {
        return "*".repeat(address.len());
    }

    format!("{}.{}.*.*", parts[0], parts[1])
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if let Some(top) = args.top {
        if top == 0 {
            anyhow::bail!("--top must be greater than 0");
        }
    }

    Ok(())
}
