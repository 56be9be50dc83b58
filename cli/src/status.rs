use savings_core::{SavingsView, TITLE};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

const FILLED_CELL: char = '█';
const EMPTY_CELL: char = '░';

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(field: &'static str, value: String) -> StatusRow {
    StatusRow { field, value }
}

pub fn render_bar(segments: &[bool]) -> String {
    segments
        .iter()
        .map(|&filled| if filled { FILLED_CELL } else { EMPTY_CELL })
        .collect()
}

pub fn render_status(view: &SavingsView) -> String {
    let goal = if view.goal_text.is_empty() {
        "-".to_string()
    } else {
        view.goal_text.clone()
    };

    let rows = vec![
        row("Goal", goal),
        row("Current Savings", format!("{:.2}", view.current_savings)),
        row("Achieved", format!("{}%", view.percent_text())),
        row("Remaining", format!("{:.2}", view.remaining)),
        row("Progress", render_bar(&view.segments)),
    ];

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    format!("{}\n{}", TITLE, table)
}

pub fn show_status(view: &SavingsView) {
    println!("{}", render_status(view));
}
