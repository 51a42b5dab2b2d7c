use anyhow::Result;
use console::{pad_str, style, Alignment, StyledObject};
use rust_decimal::Decimal;

use crate::args::Args;
use crate::ledger::{ExpenseLedger, ExpenseRecord, Filter};
use crate::parse::{parse_amount, parse_date, ValidationError};
use crate::terminal;

const DATE_WIDTH: usize = 12;
const AMOUNT_WIDTH: usize = 10;
const CATEGORY_WIDTH: usize = 15;
const SEPARATOR_WIDTH: usize = 55;

pub fn main(args: Args) -> Result<()> {
    if args.no_color {
        console::set_colors_enabled(false);
    }
    let mut cli = Cli::new();
    cli.run()
}

/// Menu-loop driver. Owns the ledger and threads it through each operation;
/// the ledger is only ever mutated at the commit point of a fully-validated
/// add.
pub struct Cli {
    ledger: ExpenseLedger,
}

/// Outcome of an interactive operation's prompt phase. Validation failures
/// and cancelled prompts are ordinary outcomes the menu loop reports and
/// moves on from, never errors that propagate.
enum Outcome<T> {
    Ok(T),
    Invalid(ValidationError),
    Cancelled,
}

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Add,
    View,
    Filter,
    Summary,
    Exit,
    Invalid,
}

impl Choice {
    fn parse(input: &str) -> Choice {
        match input.trim() {
            "1" => Choice::Add,
            "2" => Choice::View,
            "3" => Choice::Filter,
            "4" => Choice::Summary,
            "5" => Choice::Exit,
            _ => Choice::Invalid,
        }
    }
}

impl Cli {
    pub fn new() -> Self {
        Self {
            ledger: ExpenseLedger::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            print_menu();
            // Closed stdin at the menu is a request to exit, not an error.
            let Some(choice) = terminal::prompt("Enter your choice (1-5)") else {
                println!();
                println!("Exiting Expense Tracker. Goodbye!");
                return Ok(());
            };
            match Choice::parse(&choice) {
                Choice::Add => self.main_add(),
                Choice::View => self.main_view(),
                Choice::Filter => self.main_filter(),
                Choice::Summary => self.main_summary(),
                Choice::Exit => {
                    println!("Exiting Expense Tracker. Goodbye!");
                    return Ok(());
                }
                Choice::Invalid => {
                    log::debug!("Rejected menu choice {:?}", choice.trim());
                    println!(
                        "{}",
                        style("Invalid choice! Please enter a number between 1 and 5.").red()
                    );
                }
            }
        }
    }

    fn main_add(&mut self) {
        println!("{}", style_header("Add New Expense"));
        match prompt_record() {
            Outcome::Ok(record) => {
                log::info!(
                    "Adding expense: {} {} [{}]",
                    record.date,
                    record.amount,
                    record.category
                );
                self.ledger.add(record);
                println!("{}", style("Expense added successfully!").green());
            }
            Outcome::Invalid(err) => println!("{}", style(err).red()),
            Outcome::Cancelled => println!("Operation cancelled."),
        }
    }

    fn main_view(&self) {
        println!("{}", style_header("All Expenses"));
        for line in view_lines(&self.ledger) {
            println!("{line}");
        }
    }

    fn main_filter(&self) {
        println!("{}", style_header("Filter Expenses"));
        match prompt_filter() {
            Outcome::Ok(filter) => {
                let matched = self.ledger.filter(&filter);
                log::debug!(
                    "Filter matched {} of {} records",
                    matched.len(),
                    self.ledger.len()
                );
                if matched.is_empty() {
                    println!("No expenses found for the given filters.");
                    return;
                }
                let category = filter.category.as_deref().unwrap_or("All");
                println!("Filtered Expenses (Category: {category})");
                for line in table_lines(matched.into_iter()) {
                    println!("{line}");
                }
            }
            Outcome::Invalid(err) => println!("{}", style(err).red()),
            Outcome::Cancelled => println!("Operation cancelled."),
        }
    }

    fn main_summary(&self) {
        println!("{}", style_header("Expense Summary"));
        for line in summary_lines(&self.ledger) {
            println!("{line}");
        }
    }
}

/// Prompts for all four fields of a new record, in order. Either parse
/// failure discards the whole entry; there is no re-prompt.
fn prompt_record() -> Outcome<ExpenseRecord> {
    let Some(date) = terminal::prompt("Enter date (YYYY-MM-DD)") else {
        return Outcome::Cancelled;
    };
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(err) => return Outcome::Invalid(err),
    };
    let Some(amount) = terminal::prompt("Enter amount (e.g. 45.75)") else {
        return Outcome::Cancelled;
    };
    let amount = match parse_amount(amount.trim()) {
        Ok(amount) => amount,
        Err(err) => return Outcome::Invalid(err),
    };
    let Some(category) = terminal::prompt("Enter category (e.g. Food, Transport)") else {
        return Outcome::Cancelled;
    };
    let Some(description) = terminal::prompt("Enter description") else {
        return Outcome::Cancelled;
    };
    Outcome::Ok(ExpenseRecord {
        date,
        amount,
        category: category.trim().to_string(),
        description: description.trim().to_string(),
    })
}

fn prompt_filter() -> Outcome<Filter> {
    let Some(category) = terminal::prompt("Enter category to filter (leave blank for all)") else {
        return Outcome::Cancelled;
    };
    let Some(start) = terminal::prompt("Enter start date (YYYY-MM-DD, leave blank for none)")
    else {
        return Outcome::Cancelled;
    };
    let Some(end) = terminal::prompt("Enter end date (YYYY-MM-DD, leave blank for none)") else {
        return Outcome::Cancelled;
    };

    let start = match parse_optional_date(start.trim()) {
        Ok(start) => start,
        Err(err) => return Outcome::Invalid(err),
    };
    let end = match parse_optional_date(end.trim()) {
        Ok(end) => end,
        Err(err) => return Outcome::Invalid(err),
    };

    let category = category.trim();
    let category = (!category.is_empty()).then(|| category.to_string());
    Outcome::Ok(Filter::new(category, start, end))
}

fn parse_optional_date(input: &str) -> Result<Option<chrono::NaiveDate>, ValidationError> {
    if input.is_empty() {
        return Ok(None);
    }
    parse_date(input).map(Some)
}

fn print_menu() {
    println!();
    println!("===================================");
    println!("       Expense Tracker Menu        ");
    println!("===================================");
    println!("1. Add Expense");
    println!("2. View All Expenses");
    println!("3. Filter Expenses");
    println!("4. Show Summary");
    println!("5. Exit");
    println!("===================================");
}

fn view_lines(ledger: &ExpenseLedger) -> Vec<String> {
    if ledger.is_empty() {
        return vec!["No expenses recorded yet.".to_string()];
    }
    table_lines(ledger.records().iter())
}

fn summary_lines(ledger: &ExpenseLedger) -> Vec<String> {
    if ledger.is_empty() {
        return vec!["No expenses to summarize.".to_string()];
    }
    let mut lines = vec![
        format!("Total Expenses: {}", style_amount(ledger.total())),
        String::new(),
        "Expenses by Category:".to_string(),
    ];
    for (category, total) in ledger.totals_by_category() {
        lines.push(format!(
            "  {} {}",
            pad_str(category, CATEGORY_WIDTH, Alignment::Left, None),
            style_amount(total)
        ));
    }
    lines
}

fn table_lines<'a>(records: impl Iterator<Item = &'a ExpenseRecord>) -> Vec<String> {
    let mut lines = vec![
        style(table_header()).bold().to_string(),
        "-".repeat(SEPARATOR_WIDTH),
    ];
    lines.extend(records.map(format_row));
    lines
}

fn table_header() -> String {
    format!(
        "{}{}{}{}",
        pad_str("Date", DATE_WIDTH, Alignment::Left, None),
        pad_str("Amount", AMOUNT_WIDTH, Alignment::Left, None),
        pad_str("Category", CATEGORY_WIDTH, Alignment::Left, None),
        "Description",
    )
}

fn format_row(record: &ExpenseRecord) -> String {
    let amount = format!("${}", format_amount(record.amount));
    format!(
        "{}{}{}{}",
        pad_str(
            &record.date.format("%Y-%m-%d").to_string(),
            DATE_WIDTH,
            Alignment::Left,
            None
        ),
        pad_str(&amount, AMOUNT_WIDTH, Alignment::Left, None),
        pad_str(&record.category, CATEGORY_WIDTH, Alignment::Left, None),
        record.description,
    )
}

/// Always two decimal places, even for amounts entered as integers.
fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

fn style_amount(amount: Decimal) -> StyledObject<String> {
    let styled = style(format!("${}", format_amount(amount))).bold();
    if amount < Decimal::ZERO {
        styled.red()
    } else {
        styled.green()
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;

    fn record(date: &str, amount: &str, category: &str, description: &str) -> ExpenseRecord {
        ExpenseRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount: Decimal::from_str_exact(amount).unwrap(),
            category: category.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn empty_ledger_view_reports_no_expenses() {
        assert_eq!(
            view_lines(&ExpenseLedger::new()),
            vec!["No expenses recorded yet."]
        );
    }

    #[test]
    fn empty_ledger_summary_reports_nothing_to_summarize() {
        assert_eq!(
            summary_lines(&ExpenseLedger::new()),
            vec!["No expenses to summarize."]
        );
    }

    #[test]
    fn summary_reports_total_and_per_category_sums() {
        console::set_colors_enabled(false);
        let mut ledger = ExpenseLedger::new();
        ledger.add(record("2024-03-01", "10.00", "Food", "Lunch"));
        ledger.add(record("2024-03-02", "20.00", "Food", "Dinner"));
        ledger.add(record("2024-03-03", "5.00", "Transport", "Bus ticket"));
        let lines = summary_lines(&ledger);
        assert_eq!(lines[0], "Total Expenses: $35.00");
        assert_eq!(lines[2], "Expenses by Category:");
        assert!(lines[3].starts_with("  Food") && lines[3].ends_with("$30.00"));
        assert!(lines[4].starts_with("  Transport") && lines[4].ends_with("$5.00"));
    }

    #[test]
    fn view_lists_records_under_the_header() {
        console::set_colors_enabled(false);
        let mut ledger = ExpenseLedger::new();
        ledger.add(record("2024-03-15", "45.75", "Food", "Lunch"));
        let lines = view_lines(&ledger);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "-".repeat(SEPARATOR_WIDTH));
        assert_eq!(lines[2], "2024-03-15  $45.75    Food           Lunch");
    }

    #[test]
    fn row_shows_all_four_fields_at_fixed_widths() {
        let row = format_row(&record("2024-03-15", "45.75", "Food", "Lunch"));
        assert_eq!(row, "2024-03-15  $45.75    Food           Lunch");
    }

    #[test]
    fn header_columns_line_up_with_rows() {
        let header = table_header();
        assert_eq!(header.find("Amount"), Some(DATE_WIDTH));
        assert_eq!(header.find("Category"), Some(DATE_WIDTH + AMOUNT_WIDTH));
        assert_eq!(
            header.find("Description"),
            Some(DATE_WIDTH + AMOUNT_WIDTH + CATEGORY_WIDTH)
        );
    }

    #[rstest]
    fn amounts_render_with_two_decimal_places(
        #[values(("45.75", "45.75"), ("100", "100.00"), ("-3", "-3.00"), ("1.5", "1.50"))]
        (input, expected): (&str, &str),
    ) {
        assert_eq!(format_amount(Decimal::from_str_exact(input).unwrap()), expected);
    }

    #[rstest]
    fn menu_choices_parse_after_trimming(
        #[values(("1", Choice::Add), (" 2 ", Choice::View), ("3", Choice::Filter), ("4\n", Choice::Summary), ("5", Choice::Exit))]
        (input, expected): (&str, Choice),
    ) {
        assert_eq!(Choice::parse(input), expected);
    }

    #[rstest]
    fn unknown_menu_input_is_invalid(#[values("9", "0", "", "add", "15")] input: &str) {
        assert_eq!(Choice::parse(input), Choice::Invalid);
    }
}
