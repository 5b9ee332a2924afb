//! Output formatting for the CLI

use crate::{
    grid::{ACTIONS, GridEnvironment, env},
    q_learning::{QTable, QValue},
};

/// Placeholder printed for table cells that were never written
pub const UNSET_PLACEHOLDER: &str = "----";

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render the Q-table as one labeled grid per action
///
/// For each of UP, RIGHT, DOWN, LEFT: a `height x width` grid of
/// tab-separated values, set cells with two decimals and unset cells as the
/// literal placeholder.
pub fn render_q_table(table: &QTable) -> String {
    let mut out = String::new();
    for action in ACTIONS {
        out.push('\n');
        out.push_str(action.label());
        out.push('\n');
        for y in 0..table.height() {
            let row: Vec<String> = (0..table.width())
                .map(|x| match table.entry(x, y, action) {
                    QValue::Unset => UNSET_PLACEHOLDER.to_string(),
                    QValue::Value(v) => format!("{v:.2}"),
                })
                .collect();
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
    }
    out
}

/// Render the greedy policy as a character grid
///
/// Visited open cells show the arrow of their greedy action, unvisited open
/// cells show `.`, and every other cell shows its map character.
pub fn render_policy(environment: &GridEnvironment, table: &QTable) -> String {
    let mut out = String::new();
    for y in 0..environment.height() {
        for x in 0..environment.width() {
            let shown = match environment.get(x as i32, y as i32) {
                Some(env::OPEN) if table.visited(x, y) => table.greedy_action(x, y).arrow(),
                Some(env::OPEN) => '.',
                Some(cell) => cell,
                None => ' ',
            };
            out.push(shown);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Action, AgentState, DEFAULT_MAP};

    #[test]
    fn q_table_rendering_distinguishes_unset_from_written_zero() {
        let environment = GridEnvironment::parse(DEFAULT_MAP).unwrap();
        let mut table = QTable::new(&environment);
        let state = AgentState::new(&environment, 0, 0);
        table.set(&state, Action::Up, 0.0);

        let rendered = render_q_table(&table);
        assert!(rendered.contains("UP"));
        assert!(rendered.contains("0.00"));
        assert!(rendered.contains(UNSET_PLACEHOLDER));
    }

    #[test]
    fn policy_rendering_keeps_walls_and_terminals() {
        let environment = GridEnvironment::parse(DEFAULT_MAP).unwrap();
        let mut table = QTable::new(&environment);
        let state = AgentState::new(&environment, 5, 2);
        table.set(&state, Action::Right, 1.0);

        let rendered = render_policy(&environment, &table);
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1], ".###..-");
        assert_eq!(&rows[2][5..], ">+");
    }
}
