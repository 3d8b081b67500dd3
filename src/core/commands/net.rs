use std::fs::File;
use std::process::Command as Process;

use reqwest::blocking::{Client, Response};

use super::{CommandContext, CommandError};
use crate::core::outcome::{Outcome, Output};

const PING_COUNT: &str = "4";
const FALLBACK_FILENAME: &str = "downloaded_file";

#[cfg(windows)]
const PING_COUNT_FLAG: &str = "-n";
#[cfg(not(windows))]
const PING_COUNT_FLAG: &str = "-c";

/// Runs the system `ping` and hands back whatever it printed.
pub fn ping(_ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let host = args.first().ok_or(CommandError::Usage("ping <host>"))?;

    let output = Process::new("ping")
        .args([PING_COUNT_FLAG, PING_COUNT, host.as_str()])
        .output()
        .map_err(|e| CommandError::failed("ping", e))?;
    Ok(Output::normal(String::from_utf8_lossy(&output.stdout)).into())
}

pub fn wget(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let url = args.first().ok_or(CommandError::Usage("wget <url>"))?;
    let filename = download_name(url);

    let mut response = fetch(url).map_err(|e| CommandError::failed("wget", e))?;
    let mut file =
        File::create(ctx.cwd().join(filename)).map_err(|e| CommandError::failed("wget", e))?;
    response
        .copy_to(&mut file)
        .map_err(|e| CommandError::failed("wget", e))?;

    Ok(Output::normal(format!("Downloaded {}", filename)).into())
}

pub fn curl(_ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let url = args.first().ok_or(CommandError::Usage("curl <url>"))?;

    let body = fetch(url)
        .and_then(Response::text)
        .map_err(|e| CommandError::failed("curl", e))?;
    Ok(Output::normal(body).into())
}

/// GET with non-2xx statuses turned into errors.
fn fetch(url: &str) -> reqwest::Result<Response> {
    Client::new().get(url).send()?.error_for_status()
}

fn download_name(url: &str) -> &str {
    match url.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => FALLBACK_FILENAME,
    }
}
