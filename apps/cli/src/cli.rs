//! # Command Line
//!
//! Turns `argv` into a [`Cli`].
//!
//! ## Grammar
//! ```text
//! matolinha [--config FILE] [--db FILE] <command> [args] [options]
//!
//!   add    <cliente> <quantidade> [--preco P] [--tipo vista|emprestimo|pago]
//!   edit   <id> <cliente> <quantidade> <preco> <tipo>
//!   remove <id> [--yes]
//!   pay    <id>
//!   show   <id> [--json]
//!   today  [--date D] [--json]
//!   summary [--date D] [--json]
//!   stats   [--date D] [--json]
//!   report  [--date D]
//!   help
//! ```
//! Options may appear anywhere after the program name. An option the
//! command does not take is a usage error.

use chrono::NaiveDate;
use matolinha_core::validation::validate_sale_id;
use matolinha_core::{Money, SaleKind};
use std::path::PathBuf;

use crate::error::AppError;

/// Usage text printed by `help`.
pub const USAGE: &str = "\
Pão Matolinha - registo de vendas

Uso: matolinha [--config FICHEIRO] [--db FICHEIRO] <comando> [argumentos]

Comandos:
  add <cliente> <quantidade> [--preco P] [--tipo T]   Registar uma venda
  edit <id> <cliente> <quantidade> <preco> <tipo>     Editar uma venda
  remove <id> [--yes]                                 Remover uma venda
  pay <id>                                            Marcar empréstimo como pago
  show <id> [--json]                                  Detalhes de uma venda
  today [--date AAAA-MM-DD] [--json]                  Vendas do dia (hoje)
  summary [--date AAAA-MM-DD] [--json]                Resumo do dia
  stats [--date AAAA-MM-DD] [--json]                  Totais do painel
  report [--date AAAA-MM-DD]                          Relatório para WhatsApp
  help                                                Esta ajuda

Tipos: vista, emprestimo, pago
";

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub config_path: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        client: String,
        quantity: i64,
        /// `None` means the configured default price.
        unit_price: Option<Money>,
        kind: SaleKind,
    },
    Edit {
        id: String,
        client: String,
        quantity: i64,
        unit_price: Money,
        kind: SaleKind,
    },
    Remove {
        id: String,
        assume_yes: bool,
    },
    Pay {
        id: String,
    },
    Show {
        id: String,
        json: bool,
    },
    Today {
        date: Option<NaiveDate>,
        json: bool,
    },
    Summary {
        date: Option<NaiveDate>,
        json: bool,
    },
    Stats {
        date: Option<NaiveDate>,
        json: bool,
    },
    Report {
        date: Option<NaiveDate>,
    },
    Help,
}

/// Options collected before the command is known.
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    db: Option<PathBuf>,
    price: Option<String>,
    kind: Option<String>,
    date: Option<String>,
    yes: bool,
    json: bool,
    help: bool,
}

impl Options {
    /// Command-specific options present on the command line.
    fn given(&self) -> Vec<&'static str> {
        let mut given = Vec::new();
        if self.price.is_some() {
            given.push("--preco");
        }
        if self.kind.is_some() {
            given.push("--tipo");
        }
        if self.date.is_some() {
            given.push("--date");
        }
        if self.yes {
            given.push("--yes");
        }
        if self.json {
            given.push("--json");
        }
        given
    }
}

/// Parses the arguments after the program name.
pub fn parse_args<I>(args: I) -> Result<Cli, AppError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let mut opts = Options::default();
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--config" => opts.config = Some(PathBuf::from(option_value(&args, &mut i)?)),
            "--db" => opts.db = Some(PathBuf::from(option_value(&args, &mut i)?)),
            "--preco" | "--price" => opts.price = Some(option_value(&args, &mut i)?),
            "--tipo" | "--kind" => opts.kind = Some(option_value(&args, &mut i)?),
            "--date" | "--data" => opts.date = Some(option_value(&args, &mut i)?),
            "--yes" | "-y" => opts.yes = true,
            "--json" => opts.json = true,
            "--help" | "-h" => opts.help = true,
            _ if arg.starts_with("--") => {
                return Err(AppError::usage(format!("Opção desconhecida: {arg}")));
            }
            _ => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let command = if opts.help {
        Command::Help
    } else {
        build_command(&positional, &opts)?
    };

    Ok(Cli {
        config_path: opts.config,
        db_path: opts.db,
        command,
    })
}

/// Consumes the value following the option at `args[*i]`.
fn option_value(args: &[String], i: &mut usize) -> Result<String, AppError> {
    let name = &args[*i];
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| AppError::usage(format!("A opção {name} precisa de um valor")))
}

fn build_command(positional: &[String], opts: &Options) -> Result<Command, AppError> {
    let Some((name, rest)) = positional.split_first() else {
        return Ok(Command::Help);
    };

    let allowed: &[&str] = match name.as_str() {
        "add" | "nova" => &["--preco", "--tipo"],
        "remove" | "remover" => &["--yes"],
        "show" | "ver" => &["--json"],
        "today" | "hoje" | "summary" | "resumo" | "stats" => &["--date", "--json"],
        "report" | "relatorio" => &["--date"],
        "help" | "ajuda" => &["--preco", "--tipo", "--date", "--yes", "--json"],
        "edit" | "editar" | "pay" | "pagar" => &[],
        other => return Err(AppError::usage(format!("Comando desconhecido: {other}"))),
    };
    if let Some(option) = opts.given().into_iter().find(|o| !allowed.contains(o)) {
        return Err(AppError::usage(format!(
            "A opção {option} não se aplica ao comando '{name}'"
        )));
    }

    let command = match name.as_str() {
        "add" | "nova" => {
            let [client, quantity] = expect_args::<2>(name, rest)?;
            Command::Add {
                client,
                quantity: parse_quantity(&quantity)?,
                unit_price: opts.price.as_deref().map(parse_price).transpose()?,
                kind: match opts.kind.as_deref() {
                    Some(kind) => parse_kind(kind)?,
                    None => SaleKind::default(),
                },
            }
        }
        "edit" | "editar" => {
            let [id, client, quantity, price, kind] = expect_args::<5>(name, rest)?;
            Command::Edit {
                id: parse_id(&id)?,
                client,
                quantity: parse_quantity(&quantity)?,
                unit_price: parse_price(&price)?,
                kind: parse_kind(&kind)?,
            }
        }
        "remove" | "remover" => {
            let [id] = expect_args::<1>(name, rest)?;
            Command::Remove {
                id: parse_id(&id)?,
                assume_yes: opts.yes,
            }
        }
        "pay" | "pagar" => {
            let [id] = expect_args::<1>(name, rest)?;
            Command::Pay { id: parse_id(&id)? }
        }
        "show" | "ver" => {
            let [id] = expect_args::<1>(name, rest)?;
            Command::Show {
                id: parse_id(&id)?,
                json: opts.json,
            }
        }
        "today" | "hoje" => {
            expect_args::<0>(name, rest)?;
            Command::Today {
                date: parse_date_opt(opts)?,
                json: opts.json,
            }
        }
        "summary" | "resumo" => {
            expect_args::<0>(name, rest)?;
            Command::Summary {
                date: parse_date_opt(opts)?,
                json: opts.json,
            }
        }
        "stats" => {
            expect_args::<0>(name, rest)?;
            Command::Stats {
                date: parse_date_opt(opts)?,
                json: opts.json,
            }
        }
        "report" | "relatorio" => {
            expect_args::<0>(name, rest)?;
            Command::Report {
                date: parse_date_opt(opts)?,
            }
        }
        "help" | "ajuda" => Command::Help,
        other => return Err(AppError::usage(format!("Comando desconhecido: {other}"))),
    };

    Ok(command)
}

fn expect_args<const N: usize>(command: &str, rest: &[String]) -> Result<[String; N], AppError> {
    <[String; N]>::try_from(rest.to_vec()).map_err(|_| {
        AppError::usage(format!(
            "'{command}' espera {N} argumento(s), recebeu {}. Veja 'matolinha help'.",
            rest.len()
        ))
    })
}

fn parse_id(raw: &str) -> Result<String, AppError> {
    Ok(validate_sale_id(raw)?)
}

fn parse_quantity(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Quantidade inválida: '{raw}'")))
}

fn parse_price(raw: &str) -> Result<Money, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Preço inválido: '{raw}'")))
}

fn parse_kind(raw: &str) -> Result<SaleKind, AppError> {
    raw.parse().map_err(|_| {
        AppError::validation(format!(
            "Tipo de venda inválido: '{raw}' (use vista, emprestimo ou pago)"
        ))
    })
}

fn parse_date_opt(opts: &Options) -> Result<Option<NaiveDate>, AppError> {
    opts.date.as_deref().map(parse_date).transpose()
}

/// Accepts `2025-03-01` and `01/03/2025`.
fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| AppError::validation(format!("Data inválida: '{raw}'")))
}
