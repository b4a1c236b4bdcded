//! Subcommands of the `gridsync` binary.

use anyhow::{Context, bail};
use gridsync_core::{Client, Config, ExportFormat, SheetKey, Spreadsheet};
use gridsync_engine::engine::{CellRef, column_letters, column_number, format_address};
use std::io::Write;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// A1 label to coordinates.
    Label(String),
    /// Coordinates to an A1 label.
    Coordinates(usize, usize),
    Column(String),
    List,
    Show {
        spreadsheet: String,
        sheet: Option<String>,
    },
    Get {
        spreadsheet: String,
        sheet: String,
        address: String,
    },
    Set {
        spreadsheet: String,
        sheet: String,
        address: String,
        value: String,
    },
    Create(String),
    Export {
        spreadsheet: String,
        format: ExportFormat,
    },
}

impl Command {
    pub(crate) fn parse(words: &[String]) -> anyhow::Result<Command> {
        let name = words[0].as_str();
        let args: Vec<&str> = words[1..].iter().map(String::as_str).collect();
        let command = match (name, args.as_slice()) {
            ("address", [label]) => Command::Label(label.to_string()),
            ("address", [col, row]) => Command::Coordinates(
                col.parse()
                    .with_context(|| format!("column must be a number, not {:?}", col))?,
                row.parse()
                    .with_context(|| format!("row must be a number, not {:?}", row))?,
            ),
            ("column", [column]) => Command::Column(column.to_string()),
            ("list", []) => Command::List,
            ("show", [spreadsheet]) => Command::Show {
                spreadsheet: spreadsheet.to_string(),
                sheet: None,
            },
            ("show", [spreadsheet, sheet]) => Command::Show {
                spreadsheet: spreadsheet.to_string(),
                sheet: Some(sheet.to_string()),
            },
            ("get", [spreadsheet, sheet, address]) => Command::Get {
                spreadsheet: spreadsheet.to_string(),
                sheet: sheet.to_string(),
                address: address.to_string(),
            },
            ("set", [spreadsheet, sheet, address, value]) => Command::Set {
                spreadsheet: spreadsheet.to_string(),
                sheet: sheet.to_string(),
                address: address.to_string(),
                value: value.to_string(),
            },
            ("create", [title]) => Command::Create(title.to_string()),
            ("export", [spreadsheet, format]) => Command::Export {
                spreadsheet: spreadsheet.to_string(),
                format: format.parse()?,
            },
            (
                "address" | "column" | "list" | "show" | "get" | "set" | "create" | "export",
                _,
            ) => bail!("wrong number of arguments for {}", name),
            _ => bail!("Unknown command: {}", name),
        };
        Ok(command)
    }

    /// Commands that never contact the remote service.
    pub(crate) fn is_offline(&self) -> bool {
        matches!(
            self,
            Command::Label(_) | Command::Coordinates(..) | Command::Column(_)
        )
    }

    pub(crate) fn run_offline(&self) -> anyhow::Result<()> {
        match self {
            Command::Label(label) => {
                let cell = CellRef::parse(label)?;
                println!("{} {}", cell.col(), cell.row());
            }
            Command::Coordinates(col, row) => println!("{}", format_address(*col, *row)?),
            Command::Column(column) => match column.parse::<usize>() {
                Ok(number) => println!("{}", column_letters(number)?),
                Err(_) => println!("{}", column_number(column)?),
            },
            _ => bail!("this command needs the remote service"),
        }
        Ok(())
    }

    pub(crate) fn run(&self, config: &Config) -> anyhow::Result<()> {
        if self.is_offline() {
            return self.run_offline();
        }
        let client = Client::from_config(config)?;
        match self {
            Command::List => {
                for listing in client.list_spreadsheets()? {
                    println!("{}\t{}", listing.id, listing.name);
                }
            }
            Command::Show { spreadsheet, sheet } => {
                let spreadsheet = client.open(spreadsheet)?;
                match sheet {
                    Some(key) => {
                        let sheet = spreadsheet.sheet(sheet_key(key))?;
                        for row in sheet.rows() {
                            println!("{}", row.join("\t"));
                        }
                    }
                    None => print_summary(&spreadsheet),
                }
            }
            Command::Get {
                spreadsheet,
                sheet,
                address,
            } => {
                let sheet = client.open(spreadsheet)?.sheet(sheet_key(sheet))?;
                println!("{}", sheet.get(address.as_str())?);
            }
            Command::Set {
                spreadsheet,
                sheet,
                address,
                value,
            } => {
                let sheet = client.open(spreadsheet)?.sheet(sheet_key(sheet))?;
                sheet.update(address.as_str(), value.as_str())?;
            }
            Command::Create(title) => {
                let spreadsheet = client.create_spreadsheet(Some(title))?;
                println!("{}\t{}", spreadsheet.id(), spreadsheet.url());
            }
            Command::Export {
                spreadsheet,
                format,
            } => {
                let bytes = client.open(spreadsheet)?.export(*format)?;
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&bytes)?;
                stdout.flush()?;
            }
            Command::Label(_) | Command::Coordinates(..) | Command::Column(_) => {
                self.run_offline()?
            }
        }
        Ok(())
    }
}

/// Numeric keys select by position, anything else by title.
fn sheet_key(key: &str) -> SheetKey {
    match key.parse::<isize>() {
        Ok(index) => SheetKey::Index(index),
        Err(_) => SheetKey::Title(key.to_string()),
    }
}

fn print_summary(spreadsheet: &Spreadsheet) {
    println!("{}", spreadsheet);
    println!("{}", spreadsheet.url());
    for sheet in spreadsheet {
        println!("  [{}] {}", sheet.index(), sheet);
    }
}
