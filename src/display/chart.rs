use crate::stats::HistoryLog;

const LEVELS: usize = 10;
const MIN_COLUMN: usize = 3;
/// Widest plot area before date labels give way to snapshot numbers.
const MAX_PLOT_WIDTH: usize = 120;

/// Plots saved win rates on a 0-100% axis as a connected line, one column per
/// snapshot in save order, labelled with the snapshot date when the dates
/// fit. `None` when there is nothing to plot.
pub fn render_chart(history: &HistoryLog) -> Option<String> {
    if history.is_empty() {
        return None;
    }

    let levels: Vec<usize> = history.iter().map(|s| level(s.win_rate)).collect();
    let (labels, column) = axis_labels(history);
    let width = levels.len() * column;

    let mut grid = vec![vec![' '; width]; LEVELS + 1];
    let centers: Vec<usize> = (0..levels.len()).map(|i| i * column + column / 2).collect();

    for pair in 0..levels.len().saturating_sub(1) {
        connect(
            &mut grid,
            (centers[pair], levels[pair]),
            (centers[pair + 1], levels[pair + 1]),
        );
    }
    for (&col, &lvl) in centers.iter().zip(&levels) {
        grid[lvl][col] = '●';
    }

    let mut out = String::new();
    for row in (0..=LEVELS).rev() {
        let mut line = format!("{:>4}% ┤", row * 100 / LEVELS);
        line.extend(grid[row].iter());
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str("      └");
    out.push_str(&"─".repeat(width));
    out.push('\n');

    let mut axis = String::from("       ");
    for label in &labels {
        axis.push_str(&format!("{:^width$}", label, width = column));
    }
    out.push_str(axis.trim_end());
    out.push('\n');

    Some(out)
}

/// Dates when they fit in the plot width, otherwise 1-based snapshot numbers.
fn axis_labels(history: &HistoryLog) -> (Vec<String>, usize) {
    let dates: Vec<String> = history.iter().map(|s| s.date.clone()).collect();
    let column = column_for(&dates);
    if column * dates.len() <= MAX_PLOT_WIDTH {
        return (dates, column);
    }

    let numbers: Vec<String> = (1..=dates.len()).map(|i| i.to_string()).collect();
    let column = column_for(&numbers);
    (numbers, column)
}

fn column_for(labels: &[String]) -> usize {
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (widest + 1).max(MIN_COLUMN)
}

// Draws a step from point `a` to point `b`: across on a's row to the midpoint,
// vertically to b's row, then across to b.
fn connect(grid: &mut [Vec<char>], a: (usize, usize), b: (usize, usize)) {
    let (from_col, from_lvl) = a;
    let (to_col, to_lvl) = b;

    if from_lvl == to_lvl {
        for col in from_col + 1..to_col {
            grid[from_lvl][col] = '─';
        }
        return;
    }

    let mid = (from_col + to_col) / 2;
    for col in from_col + 1..mid {
        grid[from_lvl][col] = '─';
    }
    for col in mid + 1..to_col {
        grid[to_lvl][col] = '─';
    }

    let (low, high) = if from_lvl < to_lvl {
        (from_lvl, to_lvl)
    } else {
        (to_lvl, from_lvl)
    };
    for row in grid.iter_mut().take(high).skip(low + 1) {
        row[mid] = '│';
    }

    if to_lvl > from_lvl {
        grid[from_lvl][mid] = '┘';
        grid[to_lvl][mid] = '┌';
    } else {
        grid[from_lvl][mid] = '┐';
        grid[to_lvl][mid] = '└';
    }
}

fn level(rate: f64) -> usize {
    (rate.clamp(0.0, 100.0) / (100.0 / LEVELS as f64)).round() as usize
}
