use crate::guess::DateOrder;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reorg")]
#[command(author, version, long_about = None)]
#[command(about = "Reorganize a directory tree using pluggable naming strategies")]
pub struct Args {
    /// Organizer strategy to run (see --list)
    #[arg(short, long, value_name = "KEY", required_unless_present = "list")]
    pub organizer: Option<String>,

    /// Only consider files whose MIME type contains this substring (e.g. "video")
    #[arg(short, long, value_name = "SUBSTR")]
    pub mime: Option<String>,

    /// Report intended operations without touching the filesystem
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Bypass the organizer's eligibility check
    #[arg(short, long)]
    pub force: bool,

    /// List available organizers and exit
    #[arg(short, long)]
    pub list: bool,

    /// How to read two-digit DD.DD.DD dates found in directory names
    #[arg(long, value_enum, value_name = "ORDER")]
    pub date_order: Option<DateOrderArg>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Target root directory
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrderArg {
    /// yy.mm.dd
    YearFirst,
    /// dd.mm.yy
    DayFirst,
    /// mm.dd.yy
    MonthFirst,
}

impl From<DateOrderArg> for DateOrder {
    fn from(arg: DateOrderArg) -> Self {
        match arg {
            DateOrderArg::YearFirst => DateOrder::YearFirst,
            DateOrderArg::DayFirst => DateOrder::DayFirst,
            DateOrderArg::MonthFirst => DateOrder::MonthFirst,
        }
    }
}
