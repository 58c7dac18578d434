//! Boundary adapter CLI.
//!
//! # Responsibility
//! - Stand in for the excluded interactive form layer: read a fully
//!   populated order request from JSON, apply the boundary fee-defaulting
//!   rule, invoke the core, and write the artifact to disk.
//! - Keep all business logic in `ipogen_core`; this binary is glue only.

use ipogen_core::{default_log_level, init_logging, OrderRequest, OrderService};
use log::error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (request_path, output_dir) = match args.as_slice() {
        [request] => (PathBuf::from(request), PathBuf::from(".")),
        [request, output] => (PathBuf::from(request), PathBuf::from(output)),
        _ => {
            eprintln!("usage: ipogen_cli <request.json> [output-dir]");
            return ExitCode::from(2);
        }
    };

    let log_dir = std::env::temp_dir().join("ipogen-logs");
    if let Some(log_dir) = log_dir.to_str() {
        if let Err(message) = init_logging(default_log_level(), log_dir) {
            eprintln!("warning: logging unavailable: {message}");
        }
    }

    match run(&request_path, &output_dir) {
        Ok(artifact_path) => {
            println!("wrote {}", artifact_path.display());
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("event=generation_failed module=cli error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(request_path: &Path, output_dir: &Path) -> Result<PathBuf, String> {
    let raw = fs::read_to_string(request_path)
        .map_err(|err| format!("cannot read `{}`: {err}", request_path.display()))?;
    let mut request: OrderRequest = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid request file `{}`: {err}", request_path.display()))?;

    let service = OrderService::standard();

    // Boundary rule: blank fees are resolved against catalog defaults before
    // the core is invoked. An explicit 0 is kept as entered.
    let mut total: u64 = 0;
    for (code, selection) in request.tasks.iter_mut() {
        let fee = service
            .catalog()
            .resolve_fee(code, selection.fee)
            .map_err(|err| err.to_string())?;
        selection.fee = Some(fee);
        let name = service
            .catalog()
            .lookup_task(code)
            .map_err(|err| err.to_string())?
            .name;
        println!("Task {code}: {name} — ${}", format_dollars(fee));
        total += fee;
    }
    println!("Total fee: ${}", format_dollars(total));

    let generated = service
        .generate(&request)
        .map_err(|err| err.to_string())?;

    let artifact_path = output_dir.join(&generated.file_name);
    write_atomically(&artifact_path, &generated.bytes)?;
    Ok(artifact_path)
}

/// Writes via a temp file and rename so a failed write leaves no artifact.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let tmp_path = path.with_extension("rtf.tmp");
    fs::write(&tmp_path, bytes)
        .map_err(|err| format!("cannot write `{}`: {err}", tmp_path.display()))?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(format!("cannot finalize `{}`: {err}", path.display()));
    }
    Ok(())
}

/// Groups a dollar amount with thousands separators for the summary lines.
fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::format_dollars;

    #[test]
    fn dollars_are_grouped_by_thousands() {
        assert_eq!(format_dollars(0), "0");
        assert_eq!(format_dollars(999), "999");
        assert_eq!(format_dollars(20_000), "20,000");
        assert_eq!(format_dollars(1_234_567), "1,234,567");
    }
}
