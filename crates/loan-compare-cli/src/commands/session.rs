use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

use loan_compare_core::presentation::format_currency;
use loan_compare_core::scenario::{self, defaults};
use loan_compare_core::ScenarioBook;

use crate::commands::compare::{self, ReportSections};
use crate::input::scenario_arg;
use crate::output;
use crate::OutputFormat;

/// Arguments for the interactive session
#[derive(Args)]
pub struct SessionArgs {
    /// Starting monthly income (default 1,500,000)
    #[arg(long)]
    pub income: Option<Decimal>,

    #[command(flatten)]
    pub sections: ReportSections,
}

/// What the loop should do after a line has been handled.
#[derive(Debug)]
pub enum Reply {
    /// State changed: a confirmation plus the recomputed report.
    Updated(String, Value),
    Show(Value),
    Info(String),
    Quit,
    Nothing,
}

/// Scenario book and income for the duration of one interactive run.
pub struct Session {
    book: ScenarioBook,
    income: Decimal,
    sections: ReportSections,
}

impl Session {
    pub fn new(income: Decimal, sections: ReportSections) -> Self {
        Self {
            book: ScenarioBook::new(),
            income,
            sections,
        }
    }

    pub fn book(&self) -> &ScenarioBook {
        &self.book
    }

    pub fn handle(&mut self, line: &str) -> Result<Reply, Box<dyn std::error::Error>> {
        let trimmed = line.trim();
        let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (trimmed, ""),
        };

        match cmd {
            "" => Ok(Reply::Nothing),
            "quit" | "exit" => Ok(Reply::Quit),
            "help" => Ok(Reply::Info(HELP.to_string())),
            "add" => {
                let draft = scenario_arg::parse_scenario(arg)?;
                let name = self.book.add_draft(draft)?.name.clone();
                self.updated(format!("¡{name} agregado!"))
            }
            "remove" => {
                let position: usize = arg
                    .parse()
                    .map_err(|_| format!("usage: remove <n> (1..={})", self.book.len()))?;
                if position == 0 {
                    return Err("scenario numbers start at 1".into());
                }
                let removed = self.book.remove(position - 1)?;
                self.updated(format!("{} eliminado", removed.name))
            }
            "clear" => {
                self.book.clear();
                self.updated("Créditos borrados".to_string())
            }
            "income" => {
                let cleaned: String = arg.chars().filter(|c| *c != '_' && *c != '$').collect();
                let income = Decimal::from_str(&cleaned)
                    .map_err(|_| format!("invalid income '{arg}'"))?;
                scenario::validate_income(income)?;
                self.income = income;
                self.updated(format!("Ingresos: {}", format_currency(income)))
            }
            "list" => Ok(Reply::Info(self.listing())),
            "show" => Ok(Reply::Show(self.render()?)),
            other => Ok(Reply::Info(format!(
                "Unknown command: {other}. Type help for commands."
            ))),
        }
    }

    fn updated(&self, message: String) -> Result<Reply, Box<dyn std::error::Error>> {
        debug!(scenarios = self.book.len(), income = %self.income, "session state changed");
        Ok(Reply::Updated(message, self.render()?))
    }

    fn render(&self) -> Result<Value, Box<dyn std::error::Error>> {
        compare::render(&self.book, self.income, self.sections)
    }

    fn listing(&self) -> String {
        if self.book.is_empty() {
            return "Créditos guardados: 0".to_string();
        }
        let mut out = format!("Créditos guardados: {}", self.book.len());
        for (i, s) in self.book.iter().enumerate() {
            out.push_str(&format!(
                "\n  {}. {} | {} | {}% | {} meses",
                i + 1,
                s.name,
                format_currency(s.principal),
                s.annual_rate_pct.normalize(),
                s.term_months
            ));
        }
        out
    }
}

const HELP: &str = "Commands:
  add <name>,<principal>,<rate>,<term>   Add a scenario (blank fields take defaults)
  remove <n>                             Remove scenario n (see list)
  clear                                  Remove every scenario
  income <amount>                        Set monthly income
  list                                   List saved scenarios
  show                                   Print the comparison report
  help                                   Show this help
  quit, exit                             End session";

pub fn run_session(
    args: SessionArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let income = args.income.unwrap_or(defaults::MONTHLY_INCOME);
    scenario::validate_income(income)?;
    let mut session = Session::new(income, args.sections);

    eprintln!(
        "loanc v{} | ingresos {} | type help for commands\n",
        env!("CARGO_PKG_VERSION"),
        format_currency(income)
    );

    while let Some(line) = read_input() {
        match session.handle(&line) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Nothing) => {}
            Ok(Reply::Info(text)) => eprintln!("{text}"),
            Ok(Reply::Show(value)) => output::format_output(&format, &value),
            Ok(Reply::Updated(message, value)) => {
                eprintln!("{}", message.green());
                output::format_output(&format, &value);
            }
            Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
        }
    }

    eprintln!("Session ended with {} scenario(s).", session.book().len());
    Ok(())
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    eprint!("> ");
    io::stderr().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(_) => None,
    }
}
