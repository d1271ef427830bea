// src/output.rs
use crate::analytics::engine::AnalyticsResult;
use crate::mc::config::SimulationConfig;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn write_terminal_to_csv(path: &Path, result: &AnalyticsResult) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "path_id,s_t,payoff,loss")?;
    let rows = result
        .terminal_prices
        .iter()
        .zip(&result.payoffs)
        .zip(&result.losses);
    for (i, ((s_t, payoff), loss)) in rows.enumerate() {
        writeln!(file, "{},{},{},{}", i, s_t, payoff, loss)?;
    }
    file.flush()
}

pub fn write_summary_to_csv(path: &Path, summary_data: &[(&str, String)]) -> io::Result<()> {
    let mut file = File::create(path)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}

/// Key/value rows describing one run, parameters first
pub fn summary_rows(config: &SimulationConfig, result: &AnalyticsResult) -> Vec<(&'static str, String)> {
    vec![
        ("s0", config.s0.to_string()),
        ("mu", config.mu.to_string()),
        ("sigma", config.sigma.to_string()),
        ("t", config.t.to_string()),
        ("steps", config.steps.to_string()),
        ("n_sims", config.n_sims.to_string()),
        ("seed", config.seed.map(|s| s.to_string()).unwrap_or_default()),
        ("strike", result.strike.to_string()),
        ("call_price", format!("{:.6}", result.call_price)),
        ("std_error", format!("{:.6}", result.std_error)),
        ("reference_price", format!("{:.6}", result.reference_price)),
        ("var_95", format!("{:.6}", result.var_95)),
        ("cvar_95", format!("{:.6}", result.cvar_95)),
        ("max_drawdown", format!("{:.6}", result.max_drawdown)),
        ("worst_max_drawdown", format!("{:.6}", result.worst_max_drawdown)),
        (
            "generated_at",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
    ]
}
