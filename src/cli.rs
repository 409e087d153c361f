// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn name_arg() -> Arg {
    Arg::new("name").required(true)
}

fn label_cmd(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(Command::new("add").arg(name_arg()))
        .subcommand(Command::new("rm").arg(name_arg()))
        .subcommand(Command::new("list"))
}

/// Fields shared by `tx add` and `tx edit`.
fn transaction_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("desc").long("desc").required(required))
        .arg(Arg::new("amount").long("amount").required(required))
        .arg(
            Arg::new("date")
                .long("date")
                .required(required)
                .help("YYYY-MM-DD"),
        )
        .arg(
            Arg::new("card")
                .long("card")
                .help("Card for a planned movement (ignored for settled ones)"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .help("One of the configured categories; empty clears it"),
        )
        .arg(
            Arg::new("installment")
                .long("installment")
                .value_name("N/M")
                .help("Installment number out of total, e.g. 3/12; empty clears it"),
        )
}

fn tx_cmd() -> Command {
    let add = transaction_fields(Command::new("add").about("Record a transaction"), true)
        .arg(
            Arg::new("income")
                .long("income")
                .action(ArgAction::SetTrue)
                .help("Record as income instead of expense"),
        )
        .arg(
            Arg::new("planned")
                .long("planned")
                .action(ArgAction::SetTrue)
                .help("Forward-looking entry, not yet settled"),
        );

    let edit = transaction_fields(Command::new("edit").about("Edit a transaction"), false)
        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
        .arg(
            Arg::new("kind")
                .long("kind")
                .value_parser(["expense", "income"]),
        )
        .arg(
            Arg::new("planned")
                .long("planned")
                .action(ArgAction::SetTrue)
                .conflicts_with("settled"),
        )
        .arg(Arg::new("settled").long("settled").action(ArgAction::SetTrue));

    let rm = Command::new("rm")
        .about("Delete a transaction")
        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)));

    let list = json_args(
        Command::new("list")
            .about("Filter and sort transactions")
            .arg(
                Arg::new("query")
                    .long("query")
                    .short('q')
                    .help("Case-insensitive match on description, category or card"),
            )
            .arg(Arg::new("from").long("from").help("YYYY-MM-DD, inclusive"))
            .arg(Arg::new("to").long("to").help("YYYY-MM-DD, inclusive"))
            .arg(Arg::new("category").long("category"))
            .arg(
                Arg::new("kind")
                    .long("kind")
                    .value_parser(["expense", "income"]),
            )
            .arg(
                Arg::new("settled")
                    .long("settled")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("planned"),
            )
            .arg(Arg::new("planned").long("planned").action(ArgAction::SetTrue))
            .arg(
                Arg::new("sort")
                    .long("sort")
                    .value_parser([
                        "date-desc",
                        "date-asc",
                        "amount-desc",
                        "amount-asc",
                        "description",
                    ])
                    .default_value("date-desc"),
            )
            .arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize)),
            ),
    );

    Command::new("tx")
        .about("Record and browse transactions")
        .subcommand_required(true)
        .subcommand(add)
        .subcommand(edit)
        .subcommand(rm)
        .subcommand(list)
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Totals, calendar and monthly series")
        .subcommand_required(true)
        .subcommand(json_args(
            Command::new("summary").about("Settled, planned and combined totals"),
        ))
        .subcommand(json_args(
            Command::new("calendar")
                .about("Per-day totals for a week or month")
                .arg(Arg::new("date").long("date").help("Reference day, defaults to today"))
                .arg(
                    Arg::new("view")
                        .long("view")
                        .value_parser(["week", "month"])
                        .default_value("month"),
                ),
        ))
        .subcommand(json_args(
            Command::new("series")
                .about("Trailing monthly cashflow")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .help("Number of months, defaults to the configured value"),
                )
                .arg(Arg::new("now").long("now").help("Last month to include, defaults to today")),
        ))
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Show or change preferences")
        .subcommand_required(true)
        .subcommand(Command::new("show"))
        .subcommand(
            Command::new("set")
                .arg(
                    Arg::new("week-start")
                        .long("week-start")
                        .value_parser(["monday", "sunday"]),
                )
                .arg(
                    Arg::new("series-months")
                        .long("series-months")
                        .value_parser(value_parser!(usize)),
                ),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Write all data to a file")
        .arg(
            Arg::new("out")
                .long("out")
                .required(true)
                .help("Destination path, '-' for stdout"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("json")
                .help("json (everything) or csv (transactions only)"),
        )
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .version(clap::crate_version!())
        .about("Track income and expenses, settled and planned")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Use this database file instead of the default location"),
        )
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(tx_cmd())
        .subcommand(label_cmd("category", "Manage the category list"))
        .subcommand(label_cmd("card", "Manage the card list"))
        .subcommand(report_cmd())
        .subcommand(settings_cmd())
        .subcommand(export_cmd())
}
