/// Narrowest a column is squeezed to when fitting the terminal.
const MIN_COLUMN: usize = 5;
const GAP: &str = "  ";

/// Render an aligned plain-text table. Numeric cells are right-aligned.
///
/// With `max_width`, the widest columns give up characters first and
/// overflowing cells end in `…`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    if let Some(limit) = max_width {
        shrink_to(&mut widths, limit);
    }

    let header_line = join_cells(headers.iter().copied(), &widths, |_| false);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let cells = (0..widths.len()).map(|index| row.get(index).map_or("-", String::as_str));
        lines.push(join_cells(cells, &widths, is_numeric));
    }
    lines.join("\n")
}

fn join_cells<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
    right_align: impl Fn(&str) -> bool,
) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| {
            let text = clip(cell, width);
            if right_align(text.as_str()) {
                format!("{text:>width$}")
            } else {
                format!("{text:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join(GAP)
        .trim_end()
        .to_string()
}

fn shrink_to(widths: &mut [usize], limit: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > limit {
        let Some(widest) = widths
            .iter_mut()
            .filter(|width| **width > MIN_COLUMN)
            .max_by_key(|width| **width)
        else {
            return;
        };
        *widest -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok()
}
