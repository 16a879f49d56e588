use std::io::Write;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::adapter::{
    Calculation, CalculatorForm, Debouncer, PRESETS, calculate, find_preset, format_currency,
};
use crate::core::{Field, validate};
use crate::error::{AppError, Result};

#[derive(Parser, Debug)]
#[command(
    name = "goalsaver",
    version,
    about = "Monthly savings needed to reach a goal, with compound growth"
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the calculator page and JSON API
    Serve {
        #[arg(long, env = "GOALSAVER_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Project a single goal
    Project(ProjectArgs),
    /// List the example presets
    Presets,
    /// Read field edits from stdin and recalculate as they arrive
    Interactive {
        #[arg(
            long,
            env = "GOALSAVER_DEBOUNCE_MS",
            default_value_t = 300,
            help = "Quiet interval before recalculating, in milliseconds"
        )]
        debounce_ms: u64,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long, allow_hyphen_values = true, help = "Savings goal, e.g. 50000")]
    pub goal: String,
    #[arg(long, allow_hyphen_values = true, help = "Time horizon in years")]
    pub years: String,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Expected annual return in percent, e.g. 7"
    )]
    pub rate: String,
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    pub current_savings: String,
    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,
    #[arg(long, help = "Fail instead of warning when a field is invalid")]
    pub strict: bool,
}

/// Output of the interactive mode, in the order it was produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Notice(String),
    Calculation(Calculation),
}

pub fn run_project<W: Write>(args: &ProjectArgs, out: &mut W) -> Result<()> {
    let mut form = CalculatorForm::new();
    for (field, raw) in [
        (Field::GoalAmount, &args.goal),
        (Field::TimeHorizonYears, &args.years),
        (Field::AnnualReturnPercent, &args.rate),
        (Field::CurrentSavings, &args.current_savings),
    ] {
        form.input(field, raw);
    }

    for (field, normalized) in form.commit_all() {
        if normalized.valid {
            continue;
        }
        if args.strict {
            validate(field, form.text(field))?;
        }
        if let Some(message) = normalized.message {
            warn!(field = field.short_name(), "{message}");
            writeln!(out, "warning: {message}")?;
        }
    }

    let calculation = form.calculate();
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &calculation)?;
        writeln!(out)?;
    } else {
        write_calculation(out, &calculation)?;
    }
    Ok(())
}

pub fn write_calculation<W: Write>(out: &mut W, calculation: &Calculation) -> Result<()> {
    let display = &calculation.display;
    writeln!(out, "Monthly payment:  {}", display.monthly_payment)?;
    writeln!(out, "Total principal:  {}", display.total_principal)?;
    writeln!(out, "Interest earned:  {}", display.interest_earned)?;
    writeln!(out, "Final amount:     {}", display.final_amount)?;
    writeln!(out, "Progress:         {:.1}%", display.progress_ratio)?;
    Ok(())
}

pub fn write_presets<W: Write>(out: &mut W) -> Result<()> {
    for preset in &PRESETS {
        writeln!(
            out,
            "{:<12} {:<20} goal {} over {} years at {}%",
            preset.key,
            preset.name,
            format_currency(preset.goal_amount),
            preset.time_horizon_years,
            preset.annual_return_percent
        )?;
    }
    Ok(())
}

/// Drives one form from line commands:
/// `<field> <text>`, `preset <key>`, `reset`, `quit`.
///
/// Every change schedules a recalculation; edits arriving within `quiet` of
/// each other collapse into a single result.
pub async fn run_interactive<R>(
    input: R,
    quiet: Duration,
    feedback: UnboundedSender<Feedback>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut form = CalculatorForm::new();
    let mut debouncer = Debouncer::new(quiet);
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "reset" => {
                form.reset();
            }
            "preset" => match find_preset(rest) {
                Ok(preset) => {
                    form.apply_preset(preset);
                }
                Err(e) => {
                    notify(&feedback, e.to_string());
                    continue;
                }
            },
            name => {
                let Some(field) = Field::from_name(name) else {
                    notify(&feedback, AppError::UnknownField(name.to_string()).to_string());
                    continue;
                };
                form.input(field, rest);
                if let Some(message) = form.commit(field).message {
                    notify(&feedback, message);
                }
            }
        }

        let domain = form.domain();
        let sink = feedback.clone();
        debug!(?domain, "scheduling recalculation");
        debouncer.schedule(async move {
            // Receiver gone means the session is over.
            let _ = sink.send(Feedback::Calculation(calculate(domain)));
        });
    }

    debouncer.flush().await;
    Ok(())
}

fn notify(feedback: &UnboundedSender<Feedback>, message: String) {
    let _ = feedback.send(Feedback::Notice(message));
}
