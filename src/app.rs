//! Document the command line interface
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::env;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use structopt::clap::AppSettings;
use structopt::StructOpt;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use crate::commands::{currencies, eval};
use crate::default_currencies::default_currencies;
use crate::error::ParserError;
use crate::models::{Currency, HasName};
use crate::parser::value_expr::eval_expression;
use crate::parser::Tokenizer;
use crate::{Error, List};

#[derive(Debug, StructOpt)]
enum Command {
    /// Evaluate a money expression
    #[structopt(alias = "calc", setting = AppSettings::AllowNegativeNumbers)]
    Eval {
        #[structopt(flatten)]
        options: CommonOpts,
        /// The expression, for example: 10 EUR - €2.5
        #[structopt(required = true, allow_hyphen_values = true)]
        expression: Vec<String>,
    },
    /// List the known currencies
    #[structopt(alias = "commodities")]
    Currencies {
        #[structopt(flatten)]
        options: CommonOpts,
        /// Show only the currencies matching this regular expression
        pattern: Option<String>,
    },
    /// Interactive calculator
    Repl(CommonOpts),
}

#[derive(Debug, StructOpt)]
#[structopt(about = "Money and currency calculator",
version = env ! ("CARGO_PKG_VERSION"),
author = env ! ("CARGO_PKG_AUTHORS"),
name = "money"
)]
struct Opt {
    #[structopt(subcommand)]
    cmd: Command,
}

/// Command line options
#[derive(Debug, StructOpt, Clone, Default)]
pub struct CommonOpts {
    /// Currency definitions file
    #[structopt(name = "FILE", short = "f", long = "file", parse(from_os_str))]
    pub input_file: Option<PathBuf>,

    /// Do not load the builtin currencies
    #[structopt(long = "no-defaults")]
    pub no_defaults: bool,

    /// Ignore init file if it exists
    #[allow(dead_code)]
    #[structopt(long = "args-only")]
    args_only: bool,

    /// Init file
    #[allow(dead_code)]
    #[structopt(long = "init-file", parse(from_os_str))]
    init_file: Option<PathBuf>,

    #[structopt(long = "force-color")]
    pub force_color: bool,

    /// Currency codes that are not three uppercase letters will cause warnings.
    #[structopt(long = "strict")]
    pub strict: bool,

    /// Currency codes that are not three uppercase letters will cause errors.
    #[structopt(long = "pedantic")]
    pub pedantic: bool,
}

impl CommonOpts {
    pub fn new() -> Self {
        CommonOpts::default()
    }
}

/// Loads the currencies named by the options
///
/// Definitions from the input file come first, the builtin ones fill the gaps.
impl TryFrom<&CommonOpts> for List<Currency> {
    type Error = Error;

    fn try_from(options: &CommonOpts) -> Result<Self, Self::Error> {
        let mut currencies = match &options.input_file {
            Some(file) => Tokenizer::try_from(file)?.tokenize()?.to_list()?,
            None => List::new(),
        };
        if !options.no_defaults {
            currencies.append(&default_currencies()?);
        }
        check_codes(&currencies, options)?;
        Ok(currencies)
    }
}

fn check_codes(currencies: &List<Currency>, options: &CommonOpts) -> Result<(), Error> {
    lazy_static! {
        static ref RE_CODE: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
    }
    if !(options.strict || options.pedantic) {
        return Ok(());
    }
    let mut codes: Vec<&str> = currencies.values().map(|c| c.get_name()).collect();
    codes.sort_unstable();
    for code in codes.iter().filter(|c| !RE_CODE.is_match(c)) {
        if options.pedantic {
            return Err(Error {
                message: vec![
                    "Error: ".bold().bright_red(),
                    "currency code ".normal(),
                    code.bold(),
                    " is not three uppercase letters".normal(),
                ],
            });
        }
        eprintln!(
            "{} currency code {} is not three uppercase letters",
            "Warning:".yellow().bold(),
            code.bold()
        );
    }
    Ok(())
}

const INIT_FILE_FLAG: &str = "--init-file";
const NO_INIT_FILE_FLAG: &str = "--args-only";
const INIT_PATH_UNDER_HOME: &str = "~/.moneyrc";
const INIT_PATH: &str = ".moneyrc";

fn init_paths(args: &[String]) -> Vec<String> {
    let mut possible_paths: Vec<String> = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        if arg == NO_INIT_FILE_FLAG {
            return vec![];
        } else if arg == INIT_FILE_FLAG {
            if let Some(path) = args.get(i + 1) {
                possible_paths.push(path.clone());
            }
        }
    }
    possible_paths.push(shellexpand::tilde(INIT_PATH_UNDER_HOME).to_string());
    possible_paths.push(INIT_PATH.to_string());
    possible_paths
}

/// Options from the init file that are not on the command line already
fn init_file_options(file: &Path, args: &[String]) -> Result<Vec<String>, Error> {
    let mut aliases = HashMap::new();
    aliases.insert("-f", "--file");
    let contents = read_to_string(file)
        .map_err(|e| ParserError::CannotReadFile(format!("{} ({})", file.display(), e)))?;
    let mut options = Vec::new();
    for line in contents.lines() {
        let option = line.trim();
        match option.chars().next() {
            Some(';') | Some('#') | Some('!') | Some('%') => (), // a comment
            Some(_) if option.starts_with("--") => {
                let mut iter = option.split_whitespace();
                let flag = match iter.next() {
                    Some(flag) => flag,
                    None => continue,
                };
                if !args
                    .iter()
                    .any(|x| x == flag || aliases.get(x.as_str()) == Some(&flag))
                {
                    options.push(flag.to_string());
                    let rest = iter.collect::<Vec<&str>>().join(" ");
                    if !rest.is_empty() {
                        options.push(rest);
                    }
                }
            }
            Some(_) => {
                return Err(ParserError::UnexpectedInput(Some(format!(
                    "Bad config file {:?}\n{}",
                    file, line
                )))
                .into())
            }
            None => (),
        }
    }
    Ok(options)
}

/// Entry point for the command line app
///
/// Load the options from one of the files, add them to the supplied command line options
/// and call the command accordingly.
pub fn run_app(mut args: Vec<String>) -> Result<(), Error> {
    // Look for any file with configuration options
    let possible_paths = init_paths(&args);
    let config_file = possible_paths
        .iter()
        .map(Path::new)
        .find(|file| file.exists());

    // The options go right after the subcommand, before any expression
    if let Some(file) = config_file {
        let extra = init_file_options(file, &args)?;
        let position = args.len().min(2);
        args.splice(position..position, extra);
    }

    // Build options from the argument vector
    let opt: Opt = match Opt::from_iter_safe(args.iter()) {
        Ok(opt) => opt,
        Err(e) => match e.kind {
            structopt::clap::ErrorKind::HelpDisplayed
            | structopt::clap::ErrorKind::VersionDisplayed => {
                println!("{}", e.message);
                return Ok(());
            }
            _ => {
                return Err(Error {
                    message: vec![e.message.as_str().normal()],
                })
            }
        },
    };

    match opt.cmd {
        Command::Eval {
            options,
            expression,
        } => {
            set_color(&options);
            eval::execute(&options, expression.join(" ").as_str())
        }
        Command::Currencies { options, pattern } => {
            set_color(&options);
            currencies::execute(&options, pattern.as_deref())
        }
        Command::Repl(options) => {
            set_color(&options);
            repl(&options)
        }
    }
}

fn set_color(options: &CommonOpts) {
    if options.force_color {
        env::set_var("CLICOLOR_FORCE", "1");
    }
}

const PROMPT: &str = ">> ";

fn repl(options: &CommonOpts) -> Result<(), Error> {
    let currencies = List::<Currency>::try_from(options)?;
    let mut rl = Editor::<()>::new();
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line);
                match repl_line(line, &currencies) {
                    Ok(true) => (),
                    Ok(false) => break,
                    Err(e) => eprintln!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                return Err(Error {
                    message: vec![format!("{}", err).as_str().bright_red()],
                })
            }
        }
    }
    Ok(())
}

/// Runs a line of the interactive session, returns false when the session is over
fn repl_line(line: &str, currencies: &List<Currency>) -> Result<bool, Error> {
    let words = match shlex::split(line) {
        Some(words) => words,
        None => {
            return Err(Error {
                message: vec!["Unbalanced quotes".bright_red()],
            })
        }
    };
    match words.first().map(|w| w.as_str()) {
        None => Ok(true),
        Some("exit") | Some("quit") => Ok(false),
        Some("currencies") | Some("commodities") => {
            currencies::print_currencies(currencies, words.get(1).map(|w| w.as_str()))?;
            Ok(true)
        }
        Some("eval") | Some("calc") => {
            println!("{}", eval_expression(&words[1..].join(" "), currencies)?);
            Ok(true)
        }
        Some(_) => {
            println!("{}", eval_expression(&words.join(" "), currencies)?);
            Ok(true)
        }
    }
}
