use anyhow::{Context, bail};

pub const DEFAULT_PORT: u16 = 8080;

/// Listening port from `PORT`. Unset or blank means [`DEFAULT_PORT`].
pub fn port_from_env() -> anyhow::Result<u16> {
    parse_port(std::env::var("PORT").ok().as_deref())
}

pub fn parse_port(value: Option<&str>) -> anyhow::Result<u16> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_PORT);
    };

    let port = value
        .parse::<u16>()
        .with_context(|| format!("PORT must be a number between 1 and 65535, got '{}'", value))?;
    if port == 0 {
        bail!("PORT must be a number between 1 and 65535, got '0'");
    }
    Ok(port)
}
