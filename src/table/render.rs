use super::cell::CellValue;
use super::column::Column;

const MAX_CELL_WIDTH: usize = 40;

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        clipped.push('…');
        clipped
    }
}

/// Renders rows as aligned plain-text columns. Numbers are right-aligned.
pub fn render_text<'a, T: 'a>(
    columns: &[Column<T>],
    rows: impl IntoIterator<Item = &'a T>,
) -> String {
    let mut cells: Vec<Vec<(String, bool)>> = Vec::new();
    cells.push(columns.iter().map(|c| (c.label.to_string(), false)).collect());
    for row in rows {
        cells.push(
            columns
                .iter()
                .map(|c| {
                    let value = c.value(row);
                    let numeric = matches!(value, CellValue::Number(_));
                    (clip(&value.to_string()), numeric)
                })
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            cells
                .iter()
                .map(|line| line[i].0.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for (line_no, line) in cells.iter().enumerate() {
        let rendered: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|((text, numeric), width)| {
                if *numeric {
                    format!("{:>width$}", text, width = width)
                } else {
                    format!("{:<width$}", text, width = width)
                }
            })
            .collect();
        out.push_str(rendered.join("  ").trim_end());
        out.push('\n');
        if line_no == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("  "));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct Part {
        code: &'static str,
        stock: Decimal,
    }

    #[test]
    fn aligns_columns() {
        let columns = vec![
            Column::new("code", "Code", |p: &Part| p.code.into()),
            Column::new("stock", "Stock", |p: &Part| p.stock.into()),
        ];
        let rows = [
            Part {
                code: "BRG-6204",
                stock: dec!(12),
            },
            Part {
                code: "V",
                stock: dec!(3.5),
            },
        ];
        let text = render_text(&columns, &rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Code      Stock");
        assert_eq!(lines[1], "--------  -----");
        assert_eq!(lines[2], "BRG-6204     12");
        assert_eq!(lines[3], "V           3.5");
    }

    #[test]
    fn clips_long_text() {
        let long = "x".repeat(100);
        assert_eq!(clip(&long).chars().count(), MAX_CELL_WIDTH);
    }
}
